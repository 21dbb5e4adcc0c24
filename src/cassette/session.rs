//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError};

use chrono::Utc;

use super::format::Port;
use super::recorder::{CassetteRecorder, SharedRecorder};

/// Per-port recorders writing into one timestamped directory.
pub struct RecordingSession {
    /// Recorder for store interactions.
    pub store: SharedRecorder,
    /// Recorder for ID generator interactions.
    pub id_gen: SharedRecorder,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a session writing to `<root>/<UTC timestamp>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already exists or cannot be created.
    pub fn new(root: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let commit = get_commit_hash();
        let make_recorder = |port: Port| -> SharedRecorder {
            let path = output_dir.join(port.cassette_file());
            CassetteRecorder::new(path, format!("{timestamp}-{port}"), &commit).into_shared()
        };

        Ok(Self {
            store: make_recorder(Port::Store),
            id_gen: make_recorder(Port::IdGen),
            output_dir,
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every port's cassette and return the output directory.
    ///
    /// All recording adapters must have been dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds a recorder or a file
    /// cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(recorder: SharedRecorder, port: Port) -> Result<(), String> {
            let recorder = Arc::try_unwrap(recorder)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner);
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.store, Port::Store)?;
        finish_one(self.id_gen, Port::IdGen)?;
        Ok(self.output_dir)
    }
}

/// Current git commit hash, or "unknown" when git is unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| {
            log::warn!("could not get git commit hash, recording 'unknown'");
            "unknown".to_string()
        })
}
