//! Recording adapters that capture interactions to cassettes.
//!
//! Each adapter forwards to a live port and appends the call to a
//! [`SharedRecorder`](crate::cassette::recorder::SharedRecorder).

pub mod id_gen;
pub mod store;

pub use id_gen::RecordingIdGenerator;
pub use store::RecordingStore;
