//! Recording adapter for the `KeyValueStore` port.

use std::sync::Arc;

use serde::Serialize;

use crate::cassette::recorder::{lock, SharedRecorder};
use crate::ports::store::{KeyValueStore, StoreFailure};

/// Records store calls while delegating to an inner store.
pub struct RecordingStore {
    inner: Arc<dyn KeyValueStore>,
    recorder: SharedRecorder,
}

impl RecordingStore {
    /// Creates a recording store wrapping `inner`.
    pub fn new(inner: Arc<dyn KeyValueStore>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }

    fn record<T: Serialize, I: Serialize>(
        &self,
        method: &str,
        input: &I,
        result: Result<T, StoreFailure>,
    ) -> Result<T, StoreFailure> {
        lock(&self.recorder).record_store_call(method, input, &result);
        result
    }
}

#[derive(Serialize)]
struct SetInput<'a> {
    set: &'a str,
}

#[derive(Serialize)]
struct MemberInput<'a> {
    set: &'a str,
    member: &'a str,
}

#[derive(Serialize)]
struct KeyInput<'a> {
    key: &'a str,
}

#[derive(Serialize)]
struct PutInput<'a> {
    key: &'a str,
    value: &'a str,
}

impl KeyValueStore for RecordingStore {
    fn set_add(&self, set: &str, member: &str) -> Result<bool, StoreFailure> {
        self.record("set_add", &MemberInput { set, member }, self.inner.set_add(set, member))
    }

    fn set_remove(&self, set: &str, member: &str) -> Result<bool, StoreFailure> {
        self.record("set_remove", &MemberInput { set, member }, self.inner.set_remove(set, member))
    }

    fn set_contains(&self, set: &str, member: &str) -> Result<bool, StoreFailure> {
        self.record(
            "set_contains",
            &MemberInput { set, member },
            self.inner.set_contains(set, member),
        )
    }

    fn set_random_member(&self, set: &str) -> Result<Option<String>, StoreFailure> {
        self.record("set_random_member", &SetInput { set }, self.inner.set_random_member(set))
    }

    fn set_size(&self, set: &str) -> Result<u64, StoreFailure> {
        self.record("set_size", &SetInput { set }, self.inner.set_size(set))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreFailure> {
        self.record("put", &PutInput { key, value }, self.inner.put(key, value))
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreFailure> {
        self.record("get", &KeyInput { key }, self.inner.get(key))
    }

    fn delete(&self, key: &str) -> Result<bool, StoreFailure> {
        self.record("delete", &KeyInput { key }, self.inner.delete(key))
    }
}
