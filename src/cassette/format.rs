//! On-disk cassette layout and the encoding of port results.
//!
//! A cassette is a YAML document listing the calls made on the `store` and
//! `id_gen` ports in call order. Fallible store calls are written as
//! `{"Ok": value}` or `{"Err": "message"}`; identifier draws are written as
//! the bare id string.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Port a recorded call was made on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Port {
    /// The key/value + set store.
    Store,
    /// The identifier candidate source.
    IdGen,
}

impl Port {
    /// Every port, in the order session cassettes are written.
    pub const ALL: [Port; 2] = [Port::Store, Port::IdGen];

    /// Name used in cassettes and file names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Port::Store => "store",
            Port::IdGen => "id_gen",
        }
    }

    /// File name of this port's cassette inside a session directory.
    #[must_use]
    pub fn cassette_file(self) -> String {
        format!("{}.cassette.yaml", self.as_str())
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position in the recording, starting at 0.
    pub seq: u64,
    /// Port the call was made on.
    pub port: Port,
    /// Port method, e.g. `set_add`.
    pub method: String,
    /// Arguments, for reading the cassette; replay ignores them.
    pub input: Value,
    /// What the call returned.
    pub output: Value,
}

/// A recorded session on one or both ports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Session name.
    pub name: String,
    /// When recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Git commit of the recording binary, or `unknown`.
    pub commit: String,
    /// Calls in the order they were made.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Reads and parses a cassette YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }

    /// Writes the cassette as YAML to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let yaml = serde_yaml::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(path, yaml)
    }
}

/// Encodes a store result as `{"Ok": value}` or `{"Err": "message"}`.
///
/// # Panics
///
/// Panics if the `Ok` value cannot be represented as JSON.
pub fn encode_outcome<T: Serialize, E: fmt::Display>(result: &Result<T, E>) -> Value {
    match result {
        Ok(v) => json!({ "Ok": serde_json::to_value(v).expect("store result is not JSON") }),
        Err(e) => json!({ "Err": e.to_string() }),
    }
}

/// Decodes an output written by [`encode_outcome`].
///
/// # Panics
///
/// Panics if the output is neither `Ok` nor `Err`, or the `Ok` value does
/// not deserialize into `T`.
pub fn decode_outcome<T: DeserializeOwned>(output: &Value) -> Result<T, String> {
    if let Some(err) = output.get("Err") {
        return Err(err.as_str().map_or_else(|| err.to_string(), ToString::to_string));
    }
    let ok = output
        .get("Ok")
        .unwrap_or_else(|| panic!("recorded output is neither Ok nor Err: {output}"));
    Ok(serde_json::from_value(ok.clone())
        .unwrap_or_else(|e| panic!("recorded Ok value {ok} has the wrong shape: {e}")))
}
