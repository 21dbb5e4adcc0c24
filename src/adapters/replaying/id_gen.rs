//! Replaying adapter for the `IdGenerator` port.

use std::sync::Mutex;

use super::next_output;
use crate::cassette::format::Port;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::IdGenerator;

/// Serves recorded identifiers in order.
pub struct ReplayingIdGenerator {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingIdGenerator {
    /// Creates a replaying ID generator from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl IdGenerator for ReplayingIdGenerator {
    fn generate_id(&self) -> String {
        let output = next_output(&self.replayer, Port::IdGen, "generate_id");
        output.as_str().expect("id_gen::generate_id: expected string output").to_string()
    }
}
