//! `jokestore count` command.

use serde_json::{json, Value};

use crate::error::Result;
use crate::index::RecordIndex;

/// Execute the `count` command: `{"count": N}`.
///
/// # Errors
///
/// Returns a store error.
pub fn run(index: &RecordIndex) -> Result<Value> {
    let count = index.len()?;
    Ok(json!({ "count": count }))
}
