//! Port implementations.
//!
//! - `live`: real entropy and real stores (file snapshot, process memory).
//! - `recording`: wrap a live adapter and capture every call to a cassette.
//! - `replaying`: serve calls back from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
