//! In-process adapter for the `KeyValueStore` port.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use rand::seq::IteratorRandom;

use crate::ports::store::{KeyValueStore, StoreFailure};

#[derive(Debug, Default)]
struct MemoryState {
    sets: HashMap<String, HashSet<String>>,
    values: HashMap<String, String>,
}

/// Store held entirely in process memory.
///
/// Every operation takes one lock, so each call is atomic with respect to
/// the others. Used by `--backend memory` and as the store double in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreFailure> {
        self.state.lock().map_err(|e| format!("memory store lock poisoned: {e}").into())
    }
}

impl KeyValueStore for MemoryStore {
    fn set_add(&self, set: &str, member: &str) -> Result<bool, StoreFailure> {
        let mut state = self.lock()?;
        Ok(state.sets.entry(set.to_string()).or_default().insert(member.to_string()))
    }

    fn set_remove(&self, set: &str, member: &str) -> Result<bool, StoreFailure> {
        let mut state = self.lock()?;
        Ok(state.sets.get_mut(set).is_some_and(|members| members.remove(member)))
    }

    fn set_contains(&self, set: &str, member: &str) -> Result<bool, StoreFailure> {
        let state = self.lock()?;
        Ok(state.sets.get(set).is_some_and(|members| members.contains(member)))
    }

    fn set_random_member(&self, set: &str) -> Result<Option<String>, StoreFailure> {
        let state = self.lock()?;
        let mut rng = rand::thread_rng();
        Ok(state.sets.get(set).and_then(|members| members.iter().choose(&mut rng)).cloned())
    }

    fn set_size(&self, set: &str) -> Result<u64, StoreFailure> {
        let state = self.lock()?;
        Ok(state.sets.get(set).map_or(0, |members| members.len() as u64))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreFailure> {
        let mut state = self.lock()?;
        state.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreFailure> {
        let state = self.lock()?;
        Ok(state.values.get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<bool, StoreFailure> {
        let mut state = self.lock()?;
        Ok(state.values.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_add_reports_new_members_only() {
        let store = MemoryStore::new();
        assert!(store.set_add("idx", "a").unwrap());
        assert!(!store.set_add("idx", "a").unwrap());
        assert!(store.set_add("idx", "b").unwrap());
        assert_eq!(store.set_size("idx").unwrap(), 2);
    }

    #[test]
    fn set_remove_and_contains() {
        let store = MemoryStore::new();
        store.set_add("idx", "a").unwrap();
        assert!(store.set_contains("idx", "a").unwrap());
        assert!(store.set_remove("idx", "a").unwrap());
        assert!(!store.set_remove("idx", "a").unwrap());
        assert!(!store.set_contains("idx", "a").unwrap());
        assert!(!store.set_contains("missing", "a").unwrap());
    }

    #[test]
    fn random_member_of_empty_set_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.set_random_member("idx").unwrap(), None);
        store.set_add("idx", "a").unwrap();
        store.set_remove("idx", "a").unwrap();
        assert_eq!(store.set_random_member("idx").unwrap(), None);
    }

    #[test]
    fn random_member_covers_all_members() {
        let store = MemoryStore::new();
        for m in ["a", "b", "c"] {
            store.set_add("idx", m).unwrap();
        }
        let mut seen = HashSet::new();
        for _ in 0..300 {
            seen.insert(store.set_random_member("idx").unwrap().unwrap());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn values_put_get_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.put("k", "v1").unwrap();
        store.put("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert!(store.delete("k").unwrap());
        assert!(!store.delete("k").unwrap());
        assert_eq!(store.get("k").unwrap(), None);
    }
}
