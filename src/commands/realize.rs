//! Implementation of the `flipflop realize` command.

use super::Context;
use crate::cli::RealizeArgs;
use flipflop::error::Result;
use flipflop::realize;
use flipflop::template;

/// Realize a template and return the resulting template JSON.
///
/// Unrealizable tags are logged and kept random. With `--strict` they fail
/// the command instead and nothing is written.
pub fn cmd_realize(ctx: &Context, args: RealizeArgs) -> Result<String> {
    let mut state = ctx.read_state(&args.template)?;
    let catalog = ctx.load_catalog()?;

    let report = realize::realize_in_place(&mut state, &catalog);
    if args.strict {
        report.require_complete()?;
    }
    template::serialize(&state).to_json()
}
