//! Implementation of the `flipflop new` command.

use super::Context;
use crate::cli::NewArgs;
use flipflop::error::Result;
use flipflop::state::PromptState;
use flipflop::template;

/// Empty current-version template with one field per configured id.
pub fn cmd_new(ctx: &Context, args: NewArgs) -> Result<String> {
    let mut state = PromptState::from_config(&ctx.config);
    if let Some(seed) = args.seed {
        state.seed = seed;
    }
    if let Some(model) = args.model {
        state.target_model = model;
    }
    if let Some(classes) = &ctx.classifications {
        state.active_classifications = classes.clone();
    }
    template::serialize(&state).to_json()
}
