//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Backend;

/// Top-level CLI parser for `jokestore`.
#[derive(Debug, Parser)]
#[command(name = "jokestore", version, about = "Store and serve short jokes")]
pub struct Cli {
    /// YAML config file (takes precedence over `JOKESTORE_CONFIG`).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Snapshot file for the file backend.
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Store backend.
    #[arg(long, global = true, value_enum)]
    pub backend: Option<Backend>,

    /// Do not seed sample jokes into an empty store before running.
    #[arg(long, global = true)]
    pub no_seed: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print a random joke with its ID.
    Random,
    /// Print the joke with the given ID.
    Get {
        /// Joke ID.
        id: String,
    },
    /// Store a new joke and print its ID.
    Create {
        /// Joke text (at most 256 characters).
        joke: String,
    },
    /// Delete the joke with the given ID.
    Delete {
        /// Joke ID.
        id: String,
    },
    /// Seed the sample jokes if the store is empty.
    Seed,
    /// Print the number of stored jokes.
    Count,
}
