//! Replaying adapter for the `KeyValueStore` port.

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use super::next_output;
use crate::cassette::format::{decode_outcome, Port};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::store::{KeyValueStore, StoreFailure};

/// Serves recorded store results from a cassette, ignoring arguments.
pub struct ReplayingStore {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingStore {
    /// Creates a replaying store from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn replay<T: DeserializeOwned>(&self, method: &str) -> Result<T, StoreFailure> {
        decode_outcome(&next_output(&self.replayer, Port::Store, method)).map_err(Into::into)
    }
}

impl KeyValueStore for ReplayingStore {
    fn set_add(&self, _set: &str, _member: &str) -> Result<bool, StoreFailure> {
        self.replay("set_add")
    }

    fn set_remove(&self, _set: &str, _member: &str) -> Result<bool, StoreFailure> {
        self.replay("set_remove")
    }

    fn set_contains(&self, _set: &str, _member: &str) -> Result<bool, StoreFailure> {
        self.replay("set_contains")
    }

    fn set_random_member(&self, _set: &str) -> Result<Option<String>, StoreFailure> {
        self.replay("set_random_member")
    }

    fn set_size(&self, _set: &str) -> Result<u64, StoreFailure> {
        self.replay("set_size")
    }

    fn put(&self, _key: &str, _value: &str) -> Result<(), StoreFailure> {
        self.replay("put")
    }

    fn get(&self, _key: &str) -> Result<Option<String>, StoreFailure> {
        self.replay("get")
    }

    fn delete(&self, _key: &str) -> Result<bool, StoreFailure> {
        self.replay("delete")
    }
}
