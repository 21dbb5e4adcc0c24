//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::{FileStore, MemoryStore, RandomIdGenerator};
use crate::adapters::recording::{RecordingIdGenerator, RecordingStore};
use crate::adapters::replaying::{ReplayingIdGenerator, ReplayingStore};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::{Backend, Config};
use crate::index::RecordIndex;
use crate::ports::store::{KeyValueStore, StoreFailure};
use crate::ports::IdGenerator;

/// Bundles the store and ID generator with the settings they serve.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying). The ports are shared handles, so one context
/// can back any number of concurrent [`RecordIndex`] users.
pub struct ServiceContext {
    /// Key/value + set store.
    pub store: Arc<dyn KeyValueStore>,
    /// Identifier candidate source.
    pub id_gen: Arc<dyn IdGenerator>,
    /// Effective configuration.
    pub config: Config,
}

impl ServiceContext {
    /// Creates a live context using the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the file store cannot be opened or the id
    /// settings are unusable.
    pub fn live(config: Config) -> Result<Self, String> {
        let store: Arc<dyn KeyValueStore> = match config.backend {
            Backend::File => Arc::new(FileStore::open(&config.store_path).map_err(|e| {
                format!("Failed to open store {}: {e}", config.store_path.display())
            })?),
            Backend::Memory => Arc::new(MemoryStore::new()),
        };
        let id_gen = RandomIdGenerator::from_settings(&config.id).map_err(|e| e.to_string())?;
        Ok(Self { store, id_gen: Arc::new(id_gen), config })
    }

    /// Creates a live context whose ports are recorded into a new session
    /// under `root`.
    ///
    /// The context must be dropped before [`RecordingSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if the live context or the session directory
    /// cannot be created.
    pub fn recording_at(config: Config, root: &Path) -> Result<(Self, RecordingSession), String> {
        let live = Self::live(config)?;
        let session = RecordingSession::new(root)?;
        let ctx = Self {
            store: Arc::new(RecordingStore::new(live.store, Arc::clone(&session.store))),
            id_gen: Arc::new(RecordingIdGenerator::new(live.id_gen, Arc::clone(&session.id_gen))),
            config: live.config,
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context serving both ports from one cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path, config: Config) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        Ok(Self {
            store: Arc::new(ReplayingStore::new(CassetteReplayer::new(&cassette))),
            id_gen: Arc::new(ReplayingIdGenerator::new(CassetteReplayer::new(&cassette))),
            config,
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette panic with a clear message
    /// when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(cassettes: &CassetteConfig, config: Config) -> Result<Self, String> {
        let replayers = cassettes.load_all()?;
        Ok(Self {
            store: match replayers.store {
                Some(r) => Arc::new(ReplayingStore::new(r)),
                None => Arc::new(PanickingStore),
            },
            id_gen: match replayers.id_gen {
                Some(r) => Arc::new(ReplayingIdGenerator::new(r)),
                None => Arc::new(PanickingIdGenerator),
            },
            config,
        })
    }

    /// Builds a record index over this context's ports.
    #[must_use]
    pub fn index(&self) -> RecordIndex {
        RecordIndex::new(
            Arc::clone(&self.store),
            Arc::clone(&self.id_gen),
            &self.config.id,
            self.config.records.clone(),
        )
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingIdGenerator;
impl IdGenerator for PanickingIdGenerator {
    fn generate_id(&self) -> String {
        panic!("IdGenerator port not configured in CassetteConfig: no cassette loaded for id_gen");
    }
}

struct PanickingStore;
impl PanickingStore {
    fn unconfigured() -> ! {
        panic!("KeyValueStore port not configured in CassetteConfig: no cassette loaded for store");
    }
}

impl KeyValueStore for PanickingStore {
    fn set_add(&self, _set: &str, _member: &str) -> Result<bool, StoreFailure> {
        Self::unconfigured()
    }
    fn set_remove(&self, _set: &str, _member: &str) -> Result<bool, StoreFailure> {
        Self::unconfigured()
    }
    fn set_contains(&self, _set: &str, _member: &str) -> Result<bool, StoreFailure> {
        Self::unconfigured()
    }
    fn set_random_member(&self, _set: &str) -> Result<Option<String>, StoreFailure> {
        Self::unconfigured()
    }
    fn set_size(&self, _set: &str) -> Result<u64, StoreFailure> {
        Self::unconfigured()
    }
    fn put(&self, _key: &str, _value: &str) -> Result<(), StoreFailure> {
        Self::unconfigured()
    }
    fn get(&self, _key: &str) -> Result<Option<String>, StoreFailure> {
        Self::unconfigured()
    }
    fn delete(&self, _key: &str) -> Result<bool, StoreFailure> {
        Self::unconfigured()
    }
}
