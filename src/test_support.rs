//! Port doubles shared by unit tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;

use crate::adapters::live::MemoryStore;
use crate::adapters::replaying::ReplayingStore;
use crate::cassette::format::{encode_outcome, Cassette, Interaction, Port};
use crate::cassette::replayer::CassetteReplayer;
use crate::config::{IdSettings, RecordSettings};
use crate::index::RecordIndex;
use crate::ports::store::{KeyValueStore, StoreFailure};
use crate::ports::IdGenerator;

/// Serves a fixed list of identifiers, then panics.
pub struct ScriptedIds(Mutex<VecDeque<String>>);

impl ScriptedIds {
    pub fn new(ids: &[&str]) -> Self {
        Self(Mutex::new(ids.iter().map(|s| (*s).to_string()).collect()))
    }
}

impl IdGenerator for ScriptedIds {
    fn generate_id(&self) -> String {
        self.0.lock().unwrap().pop_front().expect("scripted ids exhausted")
    }
}

/// Memory store whose individual methods can be switched to fail or stall.
#[derive(Default)]
pub struct FaultyStore {
    inner: MemoryStore,
    failing: Mutex<HashSet<&'static str>>,
    delays: Mutex<HashMap<&'static str, Duration>>,
}

impl FaultyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, method: &'static str) {
        self.failing.lock().unwrap().insert(method);
    }

    pub fn heal(&self, method: &'static str) {
        self.failing.lock().unwrap().remove(method);
    }

    pub fn delay(&self, method: &'static str, by: Duration) {
        self.delays.lock().unwrap().insert(method, by);
    }

    fn check(&self, method: &'static str) -> Result<(), StoreFailure> {
        let delay = self.delays.lock().unwrap().get(method).copied();
        if let Some(by) = delay {
            std::thread::sleep(by);
        }
        if self.failing.lock().unwrap().contains(method) {
            return Err(format!("injected {method} failure").into());
        }
        Ok(())
    }
}

impl KeyValueStore for FaultyStore {
    fn set_add(&self, set: &str, member: &str) -> Result<bool, StoreFailure> {
        self.check("set_add")?;
        self.inner.set_add(set, member)
    }

    fn set_remove(&self, set: &str, member: &str) -> Result<bool, StoreFailure> {
        self.check("set_remove")?;
        self.inner.set_remove(set, member)
    }

    fn set_contains(&self, set: &str, member: &str) -> Result<bool, StoreFailure> {
        self.check("set_contains")?;
        self.inner.set_contains(set, member)
    }

    fn set_random_member(&self, set: &str) -> Result<Option<String>, StoreFailure> {
        self.check("set_random_member")?;
        self.inner.set_random_member(set)
    }

    fn set_size(&self, set: &str) -> Result<u64, StoreFailure> {
        self.check("set_size")?;
        self.inner.set_size(set)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreFailure> {
        self.check("put")?;
        self.inner.put(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreFailure> {
        self.check("get")?;
        self.inner.get(key)
    }

    fn delete(&self, key: &str) -> Result<bool, StoreFailure> {
        self.check("delete")?;
        self.inner.delete(key)
    }
}

/// Record index over `store` with random ids and default settings.
pub fn index_over(store: Arc<dyn KeyValueStore>) -> RecordIndex {
    let id = IdSettings::default();
    let gen = crate::adapters::live::RandomIdGenerator::from_settings(&id).unwrap();
    RecordIndex::new(store, Arc::new(gen), &id, RecordSettings::default())
}

/// Record index whose store answers with the recorded `(method, outcome)`
/// pairs, in order per method. Unscripted calls panic.
pub fn replayed_index(calls: &[(&str, Result<Value, &str>)]) -> RecordIndex {
    let interactions = calls
        .iter()
        .enumerate()
        .map(|(seq, (method, outcome))| Interaction {
            seq: seq as u64,
            port: Port::Store,
            method: (*method).to_string(),
            input: Value::Null,
            output: encode_outcome(outcome),
        })
        .collect();
    let cassette =
        Cassette { name: "scripted".into(), recorded_at: Utc::now(), commit: "test".into(), interactions };
    let store = Arc::new(ReplayingStore::new(CassetteReplayer::new(&cassette)));
    RecordIndex::new(
        store,
        Arc::new(ScriptedIds::new(&[])),
        &IdSettings::default(),
        RecordSettings::default(),
    )
}
