//! The record index: live identifiers and their immutable bodies.
//!
//! Two structures live in the store and are kept in lockstep:
//!
//! ```text
//! <index_key>          set of live ids
//! <key_prefix>:<id>    body of each live record
//! ```
//!
//! A record goes `absent -> live` only through [`RecordIndex::create`] and
//! `live -> absent` only through [`RecordIndex::delete`]. Both touch the
//! set first and the body second; when the second step fails the first is
//! undone so that neither half outlives the operation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::allocator::IdAllocator;
use crate::config::{IdSettings, RecordSettings};
use crate::error::{RecordError, Result};
use crate::ports::{IdGenerator, KeyValueStore};

/// Samples [`RecordIndex::read_random`] draws before giving up on ids whose
/// body is missing, either deleted meanwhile or not yet written by a create.
const RANDOM_READ_ATTEMPTS: u32 = 16;

/// An `(id, body)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier.
    pub id: String,
    /// Record text.
    #[serde(rename = "joke")]
    pub body: String,
}

/// Create, read and delete operations over the store.
pub struct RecordIndex {
    store: Arc<dyn KeyValueStore>,
    allocator: IdAllocator,
    settings: RecordSettings,
}

impl RecordIndex {
    /// Builds an index over `store`, allocating ids drawn from `id_gen`.
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        id_gen: Arc<dyn IdGenerator>,
        ids: &IdSettings,
        settings: RecordSettings,
    ) -> Self {
        let allocator =
            IdAllocator::new(Arc::clone(&store), id_gen, settings.index_key.clone(), ids.max_attempts);
        Self { store, allocator, settings }
    }

    /// Stores `body` under a freshly allocated id and returns the id.
    ///
    /// # Errors
    ///
    /// [`RecordError::Validation`] if `body` exceeds the length limit (the
    /// store is not touched), [`RecordError::Capacity`] if no id could be
    /// allocated, [`RecordError::Store`] on store failure.
    pub fn create(&self, body: &str) -> Result<String> {
        let length = body.chars().count();
        if length > self.settings.max_body_chars {
            return Err(RecordError::Validation { length, max: self.settings.max_body_chars });
        }

        let id = self.allocator.allocate()?;
        if let Err(source) = self.store.put(&self.settings.record_key(&id), body) {
            match self.store.set_remove(&self.settings.index_key, &id) {
                Ok(_) => log::warn!("body write for {id} failed, released its index entry"),
                Err(e) => log::error!("body write for {id} failed, index entry left behind: {e}"),
            }
            return Err(RecordError::store("put", source));
        }

        log::debug!("created record {id}");
        Ok(id)
    }

    /// Returns the body of record `id`.
    ///
    /// # Errors
    ///
    /// [`RecordError::NotFound`] if `id` is not indexed, [`RecordError::Store`]
    /// on store failure or if an indexed id has no body.
    pub fn read_by_id(&self, id: &str) -> Result<String> {
        if !self.contains(id)? {
            return Err(RecordError::NotFound { id: id.to_string() });
        }
        match self.fetch(id)? {
            Some(body) => Ok(body),
            None if self.contains(id)? => Err(self.missing_body(id)),
            None => Err(RecordError::NotFound { id: id.to_string() }),
        }
    }

    /// Returns a record sampled uniformly from the index.
    ///
    /// A sampled id without a body belongs to a create or delete still in
    /// flight and is skipped in favour of a fresh sample.
    ///
    /// # Errors
    ///
    /// [`RecordError::Empty`] if there are no records, [`RecordError::Store`]
    /// on store failure or if every sample lacked a body.
    pub fn read_random(&self) -> Result<Record> {
        for attempt in 1..=RANDOM_READ_ATTEMPTS {
            let id = self
                .store
                .set_random_member(&self.settings.index_key)
                .map_err(|e| RecordError::store("set_random_member", e))?
                .ok_or(RecordError::Empty)?;

            if let Some(body) = self.fetch(&id)? {
                return Ok(Record { id, body });
            }
            if !self.contains(&id)? {
                log::debug!("sampled record {id} was deleted before its body was read");
            } else if attempt == RANDOM_READ_ATTEMPTS {
                return Err(self.missing_body(&id));
            } else {
                log::debug!("sampled record {id} has no body yet");
            }
        }
        Err(RecordError::store(
            "set_random_member",
            format!("sampled records kept disappearing after {RANDOM_READ_ATTEMPTS} attempts"),
        ))
    }

    /// Removes record `id` from the index and erases its body.
    ///
    /// # Errors
    ///
    /// [`RecordError::NotFound`] if `id` is not indexed (or another caller
    /// deleted it first), [`RecordError::Store`] on store failure.
    pub fn delete(&self, id: &str) -> Result<()> {
        if !self.contains(id)? {
            return Err(RecordError::NotFound { id: id.to_string() });
        }
        let removed = self
            .store
            .set_remove(&self.settings.index_key, id)
            .map_err(|e| RecordError::store("set_remove", e))?;
        if !removed {
            return Err(RecordError::NotFound { id: id.to_string() });
        }

        match self.store.delete(&self.settings.record_key(id)) {
            Ok(true) => {}
            Ok(false) => log::warn!("deleted record {id} had no body"),
            Err(source) => {
                match self.store.set_add(&self.settings.index_key, id) {
                    Ok(true) => log::warn!("body erase for {id} failed, restored its index entry"),
                    Ok(false) => log::error!("body erase for {id} failed, id was re-allocated meanwhile"),
                    Err(e) => log::error!("body erase for {id} failed, body orphaned: {e}"),
                }
                return Err(RecordError::store("delete", source));
            }
        }

        log::debug!("deleted record {id}");
        Ok(())
    }

    /// Number of live records.
    ///
    /// # Errors
    ///
    /// [`RecordError::Store`] on store failure.
    pub fn len(&self) -> Result<u64> {
        self.store.set_size(&self.settings.index_key).map_err(|e| RecordError::store("set_size", e))
    }

    /// Returns `true` if there are no live records.
    ///
    /// # Errors
    ///
    /// [`RecordError::Store`] on store failure.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Returns `true` if `id` is in the index.
    ///
    /// # Errors
    ///
    /// [`RecordError::Store`] on store failure.
    pub fn contains(&self, id: &str) -> Result<bool> {
        self.store
            .set_contains(&self.settings.index_key, id)
            .map_err(|e| RecordError::store("set_contains", e))
    }

    fn fetch(&self, id: &str) -> Result<Option<String>> {
        self.store.get(&self.settings.record_key(id)).map_err(|e| RecordError::store("get", e))
    }

    fn missing_body(&self, id: &str) -> RecordError {
        log::error!("record {id} is indexed but has no body");
        RecordError::store("get", format!("record {id} is indexed but has no body"))
    }
}
