//! Collects port calls into a cassette file.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use super::format::{encode_outcome, Cassette, Interaction, Port};

/// Recorder shared between a recording adapter and its session.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Locks a shared recorder. A recorder poisoned by a panicking caller is
/// still usable: every interaction it holds was pushed whole.
pub fn lock(recorder: &SharedRecorder) -> MutexGuard<'_, CassetteRecorder> {
    recorder.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Accumulates interactions in call order and writes them on [`finish`].
///
/// [`finish`]: CassetteRecorder::finish
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Creates an empty recorder that will write to `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        let cassette = Cassette {
            name: name.into(),
            recorded_at: Utc::now(),
            commit: commit.into(),
            interactions: Vec::new(),
        };
        Self { path: path.into(), cassette }
    }

    /// Wraps the recorder for sharing with a recording adapter.
    #[must_use]
    pub fn into_shared(self) -> SharedRecorder {
        Arc::new(Mutex::new(self))
    }

    /// Appends a raw interaction; `seq` is assigned here.
    pub fn record(&mut self, port: Port, method: &str, input: Value, output: Value) {
        let seq = self.cassette.interactions.len() as u64;
        self.cassette.interactions.push(Interaction {
            seq,
            port,
            method: method.to_string(),
            input,
            output,
        });
    }

    /// Records an identifier draw.
    pub fn record_draw(&mut self, id: &str) {
        self.record(Port::IdGen, "generate_id", Value::Null, Value::String(id.to_string()));
    }

    /// Records a store call and its result in the `Ok`/`Err` encoding.
    ///
    /// # Panics
    ///
    /// Panics if `input` or the `Ok` value cannot be represented as JSON.
    pub fn record_store_call<I, T, E>(&mut self, method: &str, input: &I, result: &Result<T, E>)
    where
        I: Serialize,
        T: Serialize,
        E: std::fmt::Display,
    {
        let input = serde_json::to_value(input).expect("store call input is not JSON");
        self.record(Port::Store, method, input, encode_outcome(result));
    }

    /// Stamps the recording time and writes the cassette to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(mut self) -> std::io::Result<PathBuf> {
        self.cassette.recorded_at = Utc::now();
        self.cassette.save(&self.path)?;
        Ok(self.path)
    }
}
