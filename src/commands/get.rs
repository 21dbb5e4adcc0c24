//! `jokestore get` command.

use serde_json::{json, Value};

use crate::error::Result;
use crate::index::RecordIndex;

/// Execute the `get` command: `{"joke": ...}`.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or a store error.
pub fn run(index: &RecordIndex, id: &str) -> Result<Value> {
    let body = index.read_by_id(id)?;
    Ok(json!({ "joke": body }))
}
