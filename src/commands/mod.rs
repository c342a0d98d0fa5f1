//! Command implementations for flipflop.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the context they share: the loaded config and the
//! global catalog/classification options.
//!
//! Each command builds its output as a string so it can be tested without
//! capturing stdout; [`dispatch`] does the printing.

mod catalog;
mod migrate;
mod new;
mod preview;
mod realize;


use crate::cli::{Command, GlobalArgs};
use flipflop::catalog::{Catalog, ClassificationFilter};
use flipflop::config::Config;
use flipflop::error::{FlipflopError, Result};
use flipflop::state::PromptState;
use flipflop::template;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is
/// not given.
pub const DEFAULT_CONFIG_FILE: &str = "flipflop.yaml";

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub snippets: Vec<PathBuf>,
    pub classifications: Option<ClassificationFilter>,
}

impl Context {
    /// Resolve config and overrides from the global options.
    pub fn from_args(global: GlobalArgs) -> Result<Self> {
        let mut config = match &global.config {
            Some(path) => Config::load(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Config::load(DEFAULT_CONFIG_FILE)?,
            None => Config::default(),
        };
        if global.no_builtin {
            config.include_builtin_snippets = false;
        }
        let classifications = if global.classifications.is_empty() {
            None
        } else {
            Some(global.classifications.into_iter().collect())
        };
        Ok(Self {
            config,
            snippets: global.snippets,
            classifications,
        })
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        self.config.load_catalog(&self.snippets)
    }

    /// Classifications for commands without a template: the override, or
    /// the config default.
    pub fn filter(&self) -> ClassificationFilter {
        self.classifications.clone().unwrap_or_else(|| {
            self.config
                .default_classifications
                .iter()
                .copied()
                .collect()
        })
    }

    /// Load a template file, applying the classification override.
    pub fn read_state(&self, path: &Path) -> Result<PromptState> {
        let mut state = template::deserialize(&read_file(path)?)?;
        if let Some(classes) = &self.classifications {
            state.active_classifications = classes.clone();
        }
        Ok(state)
    }
}

/// Dispatch a command to its implementation and print its output.
pub fn dispatch(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Catalog => println!("{}", catalog::cmd_catalog(ctx)?),
        Command::New(args) => println!("{}", new::cmd_new(ctx, args)?),
        Command::Preview(args) => println!("{}", preview::cmd_preview(ctx, args)?),
        Command::ModelInput(args) => println!("{}", preview::cmd_model_input(ctx, args)?),
        Command::Check(args) => println!("{}", preview::cmd_check(ctx, args)?),
        Command::Realize(args) => {
            let output = args.output.clone();
            let json = realize::cmd_realize(ctx, args)?;
            emit(&json, output.as_deref())?;
        }
        Command::Migrate(args) => {
            let output = args.output.clone();
            let json = migrate::cmd_migrate(args)?;
            emit(&json, output.as_deref())?;
        }
    }
    Ok(())
}

pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        FlipflopError::UserError(format!("failed to read '{}': {}", path.display(), e))
    })
}

/// Write to `output` when given, otherwise print.
pub(crate) fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", text)).map_err(|e| {
                FlipflopError::UserError(format!("failed to write '{}': {}", path.display(), e))
            })?;
            tracing::info!(path = %path.display(), "template written");
        }
        None => println!("{}", text),
    }
    Ok(())
}
