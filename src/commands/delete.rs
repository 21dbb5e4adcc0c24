//! `jokestore delete` command.

use serde_json::{json, Value};

use crate::error::Result;
use crate::index::RecordIndex;

/// Execute the `delete` command: `{}`.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or a store error.
pub fn run(index: &RecordIndex, id: &str) -> Result<Value> {
    index.delete(id)?;
    Ok(json!({}))
}
