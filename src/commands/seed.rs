//! `jokestore seed` command.

use serde_json::{json, Value};

use crate::error::Result;
use crate::index::RecordIndex;
use crate::seed::{seed_if_empty, SAMPLE_JOKES};

/// Execute the `seed` command: `{"seeded": N}`.
///
/// # Errors
///
/// Returns a store or allocation error from seeding.
pub fn run(index: &RecordIndex) -> Result<Value> {
    let seeded = seed_if_empty(index, SAMPLE_JOKES)?;
    Ok(json!({ "seeded": seeded }))
}
