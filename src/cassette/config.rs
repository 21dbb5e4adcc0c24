//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Per-port cassette file paths. Ports without a path panic if called
/// during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the store port cassette file.
    pub store: Option<PathBuf>,
    /// Path to the ID generator port cassette file.
    pub id_gen: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
#[derive(Debug)]
pub struct PortReplayers {
    /// Replayer for the store port.
    pub store: Option<CassetteReplayer>,
    /// Replayer for the ID generator port.
    pub id_gen: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Returns a config where all port paths are `None`.
    #[must_use]
    pub fn panic_on_unspecified() -> Self {
        Self::default()
    }

    /// Load a cassette file and create a replayer over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, String> {
        Ok(CassetteReplayer::new(&Cassette::load(path)?))
    }

    /// Load all configured per-port cassette files.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        Ok(PortReplayers {
            store: self.store.as_deref().map(Self::load_cassette).transpose()?,
            id_gen: self.id_gen.as_deref().map(Self::load_cassette).transpose()?,
        })
    }
}
