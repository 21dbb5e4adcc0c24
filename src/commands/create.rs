//! `jokestore create` command.

use serde_json::{json, Value};

use crate::error::Result;
use crate::index::RecordIndex;

/// Execute the `create` command: `{"id": ...}`.
///
/// # Errors
///
/// Returns `Validation` for an over-long joke, or an allocation/store error.
pub fn run(index: &RecordIndex, joke: &str) -> Result<Value> {
    let id = index.create(joke)?;
    Ok(json!({ "id": id }))
}
