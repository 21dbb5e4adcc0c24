//! Identifier allocation.
//!
//! Candidates are drawn from an [`IdGenerator`] and committed with the
//! store's conditional set-add on the index: a candidate is allocated iff
//! the add reports it as newly inserted. Checking and reserving are one
//! atomic step, so concurrent allocators never hand out the same id.

use std::sync::Arc;

use crate::error::{RecordError, Result};
use crate::ports::{IdGenerator, KeyValueStore};

/// Hands out identifiers that are reserved in the index.
pub struct IdAllocator {
    store: Arc<dyn KeyValueStore>,
    id_gen: Arc<dyn IdGenerator>,
    index_key: String,
    max_attempts: u32,
}

impl IdAllocator {
    /// Creates an allocator reserving ids in the set `index_key`.
    ///
    /// `max_attempts` bounds the number of candidates drawn per allocation.
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        id_gen: Arc<dyn IdGenerator>,
        index_key: impl Into<String>,
        max_attempts: u32,
    ) -> Self {
        Self { store, id_gen, index_key: index_key.into(), max_attempts }
    }

    /// Allocates a fresh identifier.
    ///
    /// On success the id is already a member of the index; the caller owns
    /// it and must either write its body or remove it again.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Store`] if the store fails, or
    /// [`RecordError::Capacity`] if every candidate collided.
    pub fn allocate(&self) -> Result<String> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.id_gen.generate_id();
            let reserved = self
                .store
                .set_add(&self.index_key, &candidate)
                .map_err(|e| RecordError::store("set_add", e))?;
            if reserved {
                return Ok(candidate);
            }
            log::debug!("identifier collision on attempt {attempt}: {candidate}");
        }
        log::error!("gave up allocating an identifier after {} attempts", self.max_attempts);
        Err(RecordError::Capacity { attempts: self.max_attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::MemoryStore;
    use crate::error::ErrorKind;
    use crate::test_support::{FaultyStore, ScriptedIds};

    const INDEX: &str = "idx";

    #[test]
    fn first_free_candidate_is_reserved() {
        let store = Arc::new(MemoryStore::new());
        let alloc =
            IdAllocator::new(store.clone(), Arc::new(ScriptedIds::new(&["AAAAAAAA"])), INDEX, 4);

        assert_eq!(alloc.allocate().unwrap(), "AAAAAAAA");
        assert!(store.set_contains(INDEX, "AAAAAAAA").unwrap());
    }

    #[test]
    fn collisions_are_resampled() {
        let store = Arc::new(MemoryStore::new());
        store.set_add(INDEX, "AAAAAAAA").unwrap();
        store.set_add(INDEX, "BBBBBBBB").unwrap();
        let ids = ScriptedIds::new(&["AAAAAAAA", "BBBBBBBB", "AAAAAAAA", "CCCCCCCC"]);
        let alloc = IdAllocator::new(store.clone(), Arc::new(ids), INDEX, 4);

        assert_eq!(alloc.allocate().unwrap(), "CCCCCCCC");
        assert_eq!(store.set_size(INDEX).unwrap(), 3);
    }

    #[test]
    fn exhaustion_is_a_capacity_error() {
        let store = Arc::new(MemoryStore::new());
        store.set_add(INDEX, "AAAAAAAA").unwrap();
        let ids = ScriptedIds::new(&["AAAAAAAA", "AAAAAAAA", "AAAAAAAA"]);
        let alloc = IdAllocator::new(store.clone(), Arc::new(ids), INDEX, 3);

        let err = alloc.allocate().unwrap_err();
        assert!(matches!(err, RecordError::Capacity { attempts: 3 }));
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(store.set_size(INDEX).unwrap(), 1);
    }

    #[test]
    fn store_failure_is_wrapped() {
        let store = Arc::new(FaultyStore::new());
        store.fail("set_add");
        let alloc = IdAllocator::new(store, Arc::new(ScriptedIds::new(&["AAAAAAAA"])), INDEX, 3);

        let err = alloc.allocate().unwrap_err();
        assert!(matches!(err, RecordError::Store { operation: "set_add", .. }));
    }

    #[test]
    fn tiny_id_space_fills_then_reports_capacity() {
        // Two-letter alphabet, length 1: exactly two ids exist.
        let store = Arc::new(MemoryStore::new());
        let gen = crate::adapters::live::RandomIdGenerator::new("ab", 1).unwrap();
        let alloc = IdAllocator::new(store.clone(), Arc::new(gen), INDEX, 64);

        let first = alloc.allocate().unwrap();
        let second = alloc.allocate().unwrap();
        assert_ne!(first, second);
        assert!(matches!(alloc.allocate(), Err(RecordError::Capacity { attempts: 64 })));
    }
}
