//! Runtime configuration.
//!
//! Settings are layered: built-in defaults, then an optional YAML file,
//! then `JOKESTORE_*` environment variables. CLI flags are applied on top
//! by the command dispatcher. [`Config::validate`] runs last.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The 62 ASCII alphanumerics used for identifiers by default.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Environment variable naming a YAML config file.
pub const CONFIG_ENV: &str = "JOKESTORE_CONFIG";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for [`Config`].
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_yaml::Error,
    },

    /// An environment override could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    Env {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },

    /// A setting is out of range.
    #[error("Invalid setting {field}: {reason}")]
    Invalid {
        /// Dotted field name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Which store adapter backs the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// JSON snapshot file guarded by an advisory lock.
    File,
    /// Process-local memory; contents vanish on exit.
    Memory,
}

/// Identifier allocation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdSettings {
    /// Number of characters per identifier.
    pub length: usize,
    /// Characters identifiers are drawn from.
    pub alphabet: String,
    /// Candidates drawn before allocation gives up.
    pub max_attempts: u32,
}

impl Default for IdSettings {
    fn default() -> Self {
        Self { length: 8, alphabet: DEFAULT_ALPHABET.to_string(), max_attempts: 16 }
    }
}

#[cfg(test)]
impl IdSettings {
    /// Returns `true` if `id` has the configured length and alphabet.
    pub fn accepts(&self, id: &str) -> bool {
        id.chars().count() == self.length && id.chars().all(|c| self.alphabet.contains(c))
    }
}

/// Record layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecordSettings {
    /// Maximum body length in characters.
    pub max_body_chars: usize,
    /// Key of the set holding live identifiers.
    pub index_key: String,
    /// Prefix of per-record body keys (`<prefix>:<id>`).
    pub key_prefix: String,
}

impl Default for RecordSettings {
    fn default() -> Self {
        Self {
            max_body_chars: 256,
            index_key: "rs2JokeIdIndex".to_string(),
            key_prefix: "rs1Jokes".to_string(),
        }
    }
}

impl RecordSettings {
    /// Returns the body key for `id`.
    #[must_use]
    pub fn record_key(&self, id: &str) -> String {
        format!("{}:{id}", self.key_prefix)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Store adapter.
    pub backend: Backend,
    /// Snapshot path for the file backend.
    pub store_path: PathBuf,
    /// Seed sample records when the index is empty at startup.
    pub seed_on_start: bool,
    /// Identifier settings.
    pub id: IdSettings,
    /// Record settings.
    pub records: RecordSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::File,
            store_path: PathBuf::from(".jokestore/store.json"),
            seed_on_start: true,
            id: IdSettings::default(),
            records: RecordSettings::default(),
        }
    }
}

impl Config {
    /// Loads configuration from defaults, an optional YAML file, and the
    /// environment.
    ///
    /// `file` takes precedence over `JOKESTORE_CONFIG`. A `.env` file in
    /// the working directory is loaded into the environment first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, an override
    /// is malformed, or the final settings are invalid.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env_file = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match file.map(Path::to_path_buf).or(env_file) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a YAML config file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        serde_yaml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Applies `JOKESTORE_*` overrides looked up through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("JOKESTORE_BACKEND") {
            self.backend = match value.to_ascii_lowercase().as_str() {
                "file" => Backend::File,
                "memory" => Backend::Memory,
                _ => return Err(ConfigError::Env { var: "JOKESTORE_BACKEND", value }),
            };
        }
        if let Some(value) = lookup("JOKESTORE_STORE_PATH") {
            self.store_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("JOKESTORE_ID_LENGTH") {
            self.id.length = parse_env("JOKESTORE_ID_LENGTH", value)?;
        }
        if let Some(value) = lookup("JOKESTORE_ID_ALPHABET") {
            self.id.alphabet = value;
        }
        if let Some(value) = lookup("JOKESTORE_MAX_ATTEMPTS") {
            self.id.max_attempts = parse_env("JOKESTORE_MAX_ATTEMPTS", value)?;
        }
        if let Some(value) = lookup("JOKESTORE_SEED_ON_START") {
            self.seed_on_start = parse_env("JOKESTORE_SEED_ON_START", value)?;
        }
        Ok(())
    }

    /// Checks that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.length == 0 {
            return Err(invalid("id.length", "must be at least 1"));
        }
        if self.id.alphabet.is_empty() {
            return Err(invalid("id.alphabet", "must not be empty"));
        }
        let mut seen = HashSet::new();
        for c in self.id.alphabet.chars() {
            if c == ':' || c.is_whitespace() {
                return Err(invalid("id.alphabet", format!("contains reserved character {c:?}")));
            }
            if !seen.insert(c) {
                return Err(invalid("id.alphabet", format!("contains {c:?} more than once")));
            }
        }
        if self.id.max_attempts == 0 {
            return Err(invalid("id.max_attempts", "must be at least 1"));
        }
        if self.records.max_body_chars == 0 {
            return Err(invalid("records.max_body_chars", "must be at least 1"));
        }
        if self.records.index_key.is_empty() {
            return Err(invalid("records.index_key", "must not be empty"));
        }
        if self.records.key_prefix.is_empty() {
            return Err(invalid("records.key_prefix", "must not be empty"));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env { var, value })
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.id.length, 8);
        assert_eq!(config.id.alphabet.chars().count(), 62);
        assert_eq!(config.records.max_body_chars, 256);
        assert_eq!(config.records.record_key("abc"), "rs1Jokes:abc");
    }

    #[test]
    fn yaml_file_overrides_defaults_partially() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jokestore.yaml");
        std::fs::write(&path, "backend: memory\nid:\n  length: 12\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.id.length, 12);
        assert_eq!(config.id.alphabet, DEFAULT_ALPHABET);
        assert_eq!(config.records, RecordSettings::default());
    }

    #[test]
    fn unknown_yaml_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "bogus: 1\n").unwrap();

        assert!(matches!(Config::from_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_file_is_read_error() {
        let result = Config::from_file(Path::new("/nonexistent/jokestore.yaml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = Config::default();
        config
            .apply_env(lookup_from(&[
                ("JOKESTORE_BACKEND", "Memory"),
                ("JOKESTORE_ID_LENGTH", "10"),
                ("JOKESTORE_MAX_ATTEMPTS", "4"),
                ("JOKESTORE_SEED_ON_START", "false"),
                ("JOKESTORE_STORE_PATH", "/tmp/x.json"),
            ]))
            .unwrap();

        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.id.length, 10);
        assert_eq!(config.id.max_attempts, 4);
        assert!(!config.seed_on_start);
        assert_eq!(config.store_path, PathBuf::from("/tmp/x.json"));
    }

    #[test]
    fn malformed_env_override_is_reported() {
        let mut config = Config::default();
        let err = config.apply_env(lookup_from(&[("JOKESTORE_ID_LENGTH", "eight")])).unwrap_err();
        assert!(err.to_string().contains("JOKESTORE_ID_LENGTH"));
    }

    #[test]
    fn validate_rejects_bad_alphabets() {
        let mut config = Config::default();
        config.id.alphabet = "aab".into();
        assert!(config.validate().is_err());

        config.id.alphabet = "ab:".into();
        assert!(config.validate().is_err());

        config.id.alphabet = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_limits() {
        let mut config = Config::default();
        config.id.length = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.id.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.records.max_body_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn accepts_checks_length_and_alphabet() {
        let settings = IdSettings::default();
        assert!(settings.accepts("A1b2C3d4"));
        assert!(!settings.accepts("A1b2C3d"));
        assert!(!settings.accepts("A1b2C3d-"));
    }
}
