//! CLI argument parsing for flipflop.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use flipflop::Classification;
use std::path::PathBuf;

/// Flipflop: compose image/video prompts from tags and snippet catalogs.
///
/// Templates are JSON files holding a prompt state. Random tags in a
/// template are resolved from its seed, so previews are reproducible;
/// `realize` freezes them into fixed snippet references.
#[derive(Parser, Debug)]
#[command(name = "flipflop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Config file (defaults to ./flipflop.yaml when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Extra snippet source file, loaded after configured sources.
    #[arg(long = "snippets", global = true, value_name = "PATH")]
    pub snippets: Vec<PathBuf>,

    /// Do not load the built-in snippet set.
    #[arg(long, global = true)]
    pub no_builtin: bool,

    /// Classification to make visible (repeatable). Overrides the
    /// template's or config's selection.
    #[arg(long = "classification", global = true, value_name = "CLASS")]
    pub classifications: Vec<Classification>,
}

/// Available commands for flipflop.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List catalog categories with visible item counts.
    Catalog,

    /// Print an empty template built from config defaults.
    New(NewArgs),

    /// Print the human-readable preview of a template.
    Preview(RenderArgs),

    /// Print the text that would be sent to the target model.
    ModelInput(RenderArgs),

    /// Report required fields that are empty or too short.
    Check(RenderArgs),

    /// Freeze every random tag in a template into a fixed snippet.
    ///
    /// Tags with no visible candidates stay random and are logged.
    Realize(RealizeArgs),

    /// Upgrade a template to the current format.
    Migrate(MigrateArgs),
}

/// Arguments for the `new` command.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Seed for the new template (defaults to config).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target model (defaults to config).
    #[arg(long)]
    pub model: Option<String>,
}

/// Arguments for `preview` and `model-input`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template file to render.
    pub template: PathBuf,

    /// Render with this seed instead of the template's.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the `realize` command.
#[derive(Args, Debug)]
pub struct RealizeArgs {
    /// Template file to realize.
    pub template: PathBuf,

    /// Fail when any tag could not be realized.
    #[arg(long)]
    pub strict: bool,

    /// Write the realized template here instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `migrate` command.
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Template file to upgrade.
    pub template: PathBuf,

    /// Write the upgraded template here instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_catalog_with_globals() {
        let cli = Cli::try_parse_from([
            "flipflop",
            "catalog",
            "--snippets",
            "a.yaml",
            "--snippets",
            "b.json",
            "--no-builtin",
            "--classification",
            "nsfw",
            "--classification",
            "Hentai",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Catalog));
        assert_eq!(
            cli.global.snippets,
            vec![PathBuf::from("a.yaml"), PathBuf::from("b.json")]
        );
        assert!(cli.global.no_builtin);
        assert_eq!(
            cli.global.classifications,
            vec![Classification::Nsfw, Classification::Explicit]
        );
    }

    #[test]
    fn parse_preview() {
        let cli = Cli::try_parse_from(["flipflop", "preview", "t.json", "--seed", "7"]).unwrap();
        if let Command::Preview(args) = cli.command {
            assert_eq!(args.template, PathBuf::from("t.json"));
            assert_eq!(args.seed, Some(7));
        } else {
            panic!("Expected Preview command");
        }
    }

    #[test]
    fn parse_model_input() {
        let cli = Cli::try_parse_from(["flipflop", "model-input", "t.json"]).unwrap();
        assert!(matches!(cli.command, Command::ModelInput(RenderArgs { seed: None, .. })));
    }

    #[test]
    fn parse_check() {
        let cli = Cli::try_parse_from(["flipflop", "check", "t.json", "--seed", "3"]).unwrap();
        assert!(matches!(cli.command, Command::Check(RenderArgs { seed: Some(3), .. })));
    }

    #[test]
    fn parse_realize() {
        let cli = Cli::try_parse_from([
            "flipflop", "realize", "t.json", "--strict", "-o", "out.json",
        ])
        .unwrap();
        if let Command::Realize(args) = cli.command {
            assert!(args.strict);
            assert_eq!(args.output, Some(PathBuf::from("out.json")));
        } else {
            panic!("Expected Realize command");
        }
    }

    #[test]
    fn parse_new_defaults() {
        let cli = Cli::try_parse_from(["flipflop", "new"]).unwrap();
        if let Command::New(args) = cli.command {
            assert_eq!(args.seed, None);
            assert_eq!(args.model, None);
        } else {
            panic!("Expected New command");
        }
    }

    #[test]
    fn reject_unknown_classification() {
        let result = Cli::try_parse_from(["flipflop", "catalog", "--classification", "R18"]);
        assert!(result.is_err());
    }

    #[test]
    fn preview_requires_template() {
        assert!(Cli::try_parse_from(["flipflop", "preview"]).is_err());
    }
}
