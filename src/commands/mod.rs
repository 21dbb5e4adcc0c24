//! Command dispatch and handlers.
//!
//! Each handler maps one subcommand onto one [`RecordIndex`] operation and
//! returns the JSON payload to print.

pub mod count;
pub mod create;
pub mod delete;
pub mod get;
pub mod random;
pub mod seed;

use std::env;
use std::path::Path;

use serde_json::Value;

use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command};
use crate::config::{Config, ConfigError};
use crate::context::ServiceContext;
use crate::index::RecordIndex;
use crate::seed::{seed_if_empty, SAMPLE_JOKES};
use crate::RunError;

/// Environment variable naming a directory to record cassettes into.
pub const RECORD_ENV: &str = "JOKESTORE_RECORD";

/// Dispatch a parsed command to its handler.
///
/// When `JOKESTORE_RECORD` is set to a directory path, all port
/// interactions are recorded to per-port cassette files under it.
///
/// # Errors
///
/// Returns an error if configuration, store setup, or the handler fails.
pub fn dispatch(cli: &Cli) -> Result<Value, RunError> {
    let config = effective_config(cli)?;

    let (ctx, session) = if let Ok(dir) = env::var(RECORD_ENV) {
        let (ctx, session) =
            ServiceContext::recording_at(config, Path::new(&dir)).map_err(RunError::Setup)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(config).map_err(RunError::Setup)?, None)
    };

    let result = dispatch_with_context(&cli.command, &ctx);

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        return settle(result, finish_recording(session));
    }

    result
}

/// Combines a command result with the outcome of saving its recording.
///
/// The command's own error takes precedence; a failed save is then only logged.
fn settle(result: Result<Value, RunError>, saved: Result<(), RunError>) -> Result<Value, RunError> {
    match (result, saved) {
        (Ok(payload), Ok(())) => Ok(payload),
        (Ok(_), Err(save_err)) => Err(save_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(save_err)) => {
            log::error!("recording could not be saved: {save_err}");
            Err(err)
        }
    }
}

/// Loads configuration and applies the CLI flag overrides.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded.
pub fn effective_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(path) = &cli.store {
        config.store_path.clone_from(path);
    }
    if cli.no_seed {
        config.seed_on_start = false;
    }
    Ok(config)
}

/// Dispatch a command with the given service context.
///
/// Seeds an empty store first when `seed_on_start` is set, except for the
/// `seed` command itself.
///
/// # Errors
///
/// Returns an error if seeding or the handler fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<Value, RunError> {
    let index = ctx.index();
    if ctx.config.seed_on_start && *command != Command::Seed {
        seed_if_empty(&index, SAMPLE_JOKES)?;
    }
    Ok(run_command(command, &index)?)
}

fn run_command(command: &Command, index: &RecordIndex) -> crate::error::Result<Value> {
    match command {
        Command::Random => random::run(index),
        Command::Get { id } => get::run(index, id),
        Command::Create { joke } => create::run(index, joke),
        Command::Delete { id } => delete::run(index, id),
        Command::Seed => seed::run(index),
        Command::Count => count::run(index),
    }
}

/// Finish a recording session and log the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), RunError> {
    let output_dir = session.finish().map_err(RunError::Setup)?;
    log::info!("recording saved to: {}", output_dir.display());
    Ok(())
}
