//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction, Port};

/// Interactions for one port/method pair plus a read cursor.
#[derive(Debug, Default)]
struct Stream {
    interactions: Vec<Interaction>,
    cursor: usize,
}

/// Serves a cassette's interactions back in recorded order, independently
/// for each port/method pair.
#[derive(Debug)]
pub struct CassetteReplayer {
    streams: HashMap<(Port, String), Stream>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut streams: HashMap<(Port, String), Stream> = HashMap::new();
        for interaction in &cassette.interactions {
            streams
                .entry((interaction.port, interaction.method.clone()))
                .or_default()
                .interactions
                .push(interaction.clone());
        }
        Self { streams }
    }

    /// Number of interactions not yet served, across all streams.
    #[cfg(test)]
    pub fn remaining(&self) -> usize {
        self.streams.values().map(|s| s.interactions.len() - s.cursor).sum()
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the pair,
    /// naming what was requested and what the cassette holds.
    pub fn next_interaction(&mut self, port: Port, method: &str) -> &Interaction {
        let key = (port, method.to_string());
        if !self.streams.contains_key(&key) {
            let mut available: Vec<String> =
                self.streams.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        }

        let stream = self.streams.get_mut(&key).expect("stream checked above");
        assert!(
            stream.cursor < stream.interactions.len(),
            "Cassette exhausted: all {count} interactions for port={port} method={method:?} \
             have been consumed. Last interaction was seq={last_seq}.",
            count = stream.interactions.len(),
            last_seq = stream.interactions.last().map_or(0, |i| i.seq),
        );

        let interaction = &stream.interactions[stream.cursor];
        stream.cursor += 1;
        interaction
    }
}
