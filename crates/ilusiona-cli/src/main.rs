use ilusiona_core::logging;
use std::process::ExitCode;

mod cli;

use crate::cli::CliCommand;

fn main() -> ExitCode {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    // Parse CLI and dispatch.
    match CliCommand::run_from_args() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("ilusiona error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
