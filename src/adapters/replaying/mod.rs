//! Replaying adapters that serve recorded interactions back.

pub mod id_gen;
pub mod store;

pub use id_gen::ReplayingIdGenerator;
pub use store::ReplayingStore;

use std::sync::{Mutex, PoisonError};

use crate::cassette::format::Port;
use crate::cassette::replayer::CassetteReplayer;

/// Take the next recorded output for `port::method`.
///
/// # Panics
///
/// Panics if the cassette has no such interaction left.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: Port,
    method: &str,
) -> serde_json::Value {
    let mut replayer = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    replayer.next_interaction(port, method).output.clone()
}
