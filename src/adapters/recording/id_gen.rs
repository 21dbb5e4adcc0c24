//! Recording adapter for the `IdGenerator` port.

use std::sync::Arc;

use crate::cassette::recorder::{lock, SharedRecorder};
use crate::ports::IdGenerator;

/// Records every drawn identifier while delegating to an inner generator.
pub struct RecordingIdGenerator {
    inner: Arc<dyn IdGenerator>,
    recorder: SharedRecorder,
}

impl RecordingIdGenerator {
    /// Creates a recording generator wrapping `inner`.
    pub fn new(inner: Arc<dyn IdGenerator>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl IdGenerator for RecordingIdGenerator {
    fn generate_id(&self) -> String {
        let id = self.inner.generate_id();
        lock(&self.recorder).record_draw(&id);
        id
    }
}
