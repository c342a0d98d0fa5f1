//! Flipflop: compose image/video prompts from tags and snippet catalogs.
//!
//! This is the main entry point for the `flipflop` CLI. It parses arguments,
//! loads config, installs logging, dispatches to the appropriate command
//! handler, and handles errors with proper exit codes.

mod cli;
mod commands;

use cli::Cli;
use commands::Context;
use flipflop::{exit_codes, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let result = Context::from_args(cli.global).and_then(|ctx| {
        logging::init(ctx.config.log_level);
        commands::dispatch(&ctx, cli.command)
    });

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
