//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the record core and an
//! external collaborator (the key/value + set store, identifier entropy).
//! Implementations live in `src/adapters/`.

pub mod id_gen;
pub mod store;

pub use id_gen::IdGenerator;
pub use store::{KeyValueStore, StoreFailure};
