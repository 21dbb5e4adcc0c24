//! Binary entrypoint for the `jokestore` CLI.

use std::process::ExitCode;

use jokestore::RunError;

fn main() -> ExitCode {
    jokestore::logging::init();

    // Recording is handled in commands::dispatch via JOKESTORE_RECORD=<dir>.
    match jokestore::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(RunError::Usage(err)) => err.exit(),
        Err(err) => {
            let kind = err.kind();
            log::debug!("command failed ({kind}): {err}");
            println!("{}", serde_json::json!({ "error": err.to_string(), "kind": kind.as_str() }));
            ExitCode::from(kind.exit_code())
        }
    }
}
