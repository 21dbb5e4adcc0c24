//! `jokestore random` command.

use serde_json::{json, Value};

use crate::error::Result;
use crate::index::RecordIndex;

/// Execute the `random` command: `{"id": ..., "joke": ...}`.
///
/// # Errors
///
/// Returns `Empty` when there are no jokes, or a store error.
pub fn run(index: &RecordIndex) -> Result<Value> {
    let record = index.read_random()?;
    Ok(json!({ "id": record.id, "joke": record.body }))
}
