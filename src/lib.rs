//! Core library entry for the `jokestore` CLI.
//!
//! A record store for short texts addressed by random, collision-checked
//! identifiers. The store is an injected capability
//! ([`ports::KeyValueStore`]); [`index::RecordIndex`] keeps the identifier
//! set and record bodies consistent on top of it.

pub mod adapters;
pub mod allocator;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod index;
pub mod logging;
pub mod ports;
pub mod seed;

#[cfg(test)]
mod test_support;

use clap::Parser;
use thiserror::Error;

pub use error::{ErrorKind, RecordError};
pub use index::{Record, RecordIndex};

/// Failure of a whole CLI invocation.
#[derive(Debug, Error)]
pub enum RunError {
    /// Arguments could not be parsed (also used for `--help`/`--version`).
    #[error(transparent)]
    Usage(#[from] clap::Error),
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// The store or a recording session could not be set up.
    #[error("{0}")]
    Setup(String),
    /// A record operation failed.
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl RunError {
    /// Returns the stable classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage(_) | Self::Config(_) => ErrorKind::Validation,
            Self::Setup(_) => ErrorKind::Internal,
            Self::Record(e) => e.kind(),
        }
    }
}

/// Run the CLI with the provided arguments, printing the JSON payload of
/// the selected command to stdout.
///
/// # Errors
///
/// Returns an error when argument parsing, configuration, store setup, or
/// the command itself fails.
pub fn run<I, T>(args: I) -> Result<(), RunError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    let payload = commands::dispatch(&cli)?;
    println!("{payload}");
    Ok(())
}
