//! Live adapters for real external interactions.

pub mod file;
pub mod id_gen;
pub mod memory;

pub use file::FileStore;
pub use id_gen::RandomIdGenerator;
pub use memory::MemoryStore;
