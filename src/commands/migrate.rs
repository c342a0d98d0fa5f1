//! Implementation of the `flipflop migrate` command.

use super::read_file;
use crate::cli::MigrateArgs;
use flipflop::error::Result;
use flipflop::template;

/// Upgrade a template of any supported version to the current format.
///
/// The original `saved_at` is kept so a migrated file still says when it
/// was authored.
pub fn cmd_migrate(args: MigrateArgs) -> Result<String> {
    template::parse(&read_file(&args.template)?)?.to_json()
}
