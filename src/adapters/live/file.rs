//! File-backed adapter for the `KeyValueStore` port.
//!
//! The whole store is one JSON snapshot. Every operation takes an advisory
//! lock on a sibling `.lock` file (shared for reads, exclusive for writes),
//! loads the snapshot, and for writes replaces it through a temp file and
//! rename. Each call is therefore atomic across threads and processes that
//! share the same path.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};

use crate::ports::store::{KeyValueStore, StoreFailure};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    sets: BTreeMap<String, BTreeSet<String>>,
    #[serde(default)]
    values: BTreeMap<String, String>,
}

/// Releases the advisory lock when dropped.
struct LockGuard(File);

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.0);
    }
}

/// Store persisted as a JSON snapshot file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl FileStore {
    /// Opens (or prepares to create) the store at `path`.
    ///
    /// Parent directories are created. The snapshot itself is written on
    /// the first mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or lock file cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreFailure> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create store directory {}: {e}", parent.display()))?;
        }
        let mut lock_name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);
        let store = Self { path, lock_path };
        drop(store.lock_file()?);
        Ok(store)
    }

    /// Path of the JSON snapshot.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_file(&self) -> Result<File, StoreFailure> {
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| format!("Failed to open lock file {}: {e}", self.lock_path.display()).into())
    }

    fn load(&self) -> Result<Snapshot, StoreFailure> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Snapshot::default()),
            Err(e) => return Err(format!("Failed to read store {}: {e}", self.path.display()).into()),
        };
        if content.trim().is_empty() {
            return Ok(Snapshot::default());
        }
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse store {}: {e}", self.path.display()).into())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreFailure> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        let mut tmp_name = self.path.file_name().map(ToOwned::to_owned).unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp = self.path.with_file_name(tmp_name);
        fs::write(&tmp, json)
            .map_err(|e| format!("Failed to write store {}: {e}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| format!("Failed to replace store {}: {e}", self.path.display()))?;
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&Snapshot) -> T) -> Result<T, StoreFailure> {
        let file = self.lock_file()?;
        fs2::FileExt::lock_shared(&file)?;
        let _guard = LockGuard(file);
        let snapshot = self.load()?;
        Ok(f(&snapshot))
    }

    /// Runs `f` under the exclusive lock; `f` returns its output and whether
    /// the snapshot changed.
    fn update<T>(&self, f: impl FnOnce(&mut Snapshot) -> (T, bool)) -> Result<T, StoreFailure> {
        let file = self.lock_file()?;
        fs2::FileExt::lock_exclusive(&file)?;
        let _guard = LockGuard(file);
        let mut snapshot = self.load()?;
        let (out, dirty) = f(&mut snapshot);
        if dirty {
            self.save(&snapshot)?;
        }
        Ok(out)
    }
}

impl KeyValueStore for FileStore {
    fn set_add(&self, set: &str, member: &str) -> Result<bool, StoreFailure> {
        self.update(|snap| {
            let added = snap.sets.entry(set.to_string()).or_default().insert(member.to_string());
            (added, added)
        })
    }

    fn set_remove(&self, set: &str, member: &str) -> Result<bool, StoreFailure> {
        self.update(|snap| {
            let removed = snap.sets.get_mut(set).is_some_and(|members| members.remove(member));
            if snap.sets.get(set).is_some_and(BTreeSet::is_empty) {
                snap.sets.remove(set);
            }
            (removed, removed)
        })
    }

    fn set_contains(&self, set: &str, member: &str) -> Result<bool, StoreFailure> {
        self.read(|snap| snap.sets.get(set).is_some_and(|members| members.contains(member)))
    }

    fn set_random_member(&self, set: &str) -> Result<Option<String>, StoreFailure> {
        self.read(|snap| {
            let mut rng = rand::thread_rng();
            snap.sets.get(set).and_then(|members| members.iter().choose(&mut rng)).cloned()
        })
    }

    fn set_size(&self, set: &str) -> Result<u64, StoreFailure> {
        self.read(|snap| snap.sets.get(set).map_or(0, |members| members.len() as u64))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreFailure> {
        self.update(|snap| {
            snap.values.insert(key.to_string(), value.to_string());
            ((), true)
        })
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreFailure> {
        self.read(|snap| snap.values.get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<bool, StoreFailure> {
        self.update(|snap| {
            let removed = snap.values.remove(key).is_some();
            (removed, removed)
        })
    }
}
