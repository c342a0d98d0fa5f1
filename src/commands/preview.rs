//! Implementation of the `flipflop preview`, `flipflop model-input` and
//! `flipflop check` commands.

use super::Context;
use crate::cli::RenderArgs;
use flipflop::error::Result;
use flipflop::render::{PlainFormatter, Renderer};
use flipflop::validation;

pub fn cmd_preview(ctx: &Context, args: RenderArgs) -> Result<String> {
    render(ctx, args, |renderer, state| renderer.preview(state))
}

pub fn cmd_model_input(ctx: &Context, args: RenderArgs) -> Result<String> {
    render(ctx, args, |renderer, state| {
        renderer.model_input(state, &PlainFormatter)
    })
}

/// One line per validation warning, or `ok`. Warnings do not fail the
/// command.
pub fn cmd_check(ctx: &Context, args: RenderArgs) -> Result<String> {
    render(ctx, args, |renderer, state| {
        let warnings = validation::validate(state, renderer);
        if warnings.is_empty() {
            return "ok".to_string();
        }
        warnings
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn render(
    ctx: &Context,
    args: RenderArgs,
    f: impl FnOnce(&Renderer<'_>, &flipflop::PromptState) -> String,
) -> Result<String> {
    let mut state = ctx.read_state(&args.template)?;
    if let Some(seed) = args.seed {
        state.seed = seed;
    }
    let catalog = ctx.load_catalog()?;
    let renderer = Renderer::new(&catalog).with_options(ctx.config.render_options());
    Ok(f(&renderer, &state))
}
