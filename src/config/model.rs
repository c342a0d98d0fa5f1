//! Config struct definition and default implementation.

use super::types::*;
use crate::catalog::Classification;
use crate::state::FieldId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the prompt engine and its CLI.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Prompt defaults
    // =========================================================================
    /// Fields rendered in this order; unlisted fields follow, sorted by id.
    #[serde(default = "default_field_order_ids")]
    pub field_order: Vec<FieldId>,

    /// Classifications active in a fresh session.
    #[serde(default = "default_classifications")]
    pub default_classifications: Vec<Classification>,

    /// Seed used by a fresh session.
    #[serde(default)]
    pub default_seed: u64,

    /// Target model recorded in a fresh session.
    #[serde(default = "default_target_model")]
    pub default_target_model: String,

    // =========================================================================
    // Snippet catalog
    // =========================================================================
    /// Extra snippet source files, loaded after the built-in set.
    #[serde(default)]
    pub snippet_sources: Vec<PathBuf>,

    /// Whether the built-in PG snippet set is loaded first.
    #[serde(default = "default_true")]
    pub include_builtin_snippets: bool,

    // =========================================================================
    // Rendering
    // =========================================================================
    /// Joins tags inside one field in the preview.
    #[serde(default = "default_tag_separator")]
    pub tag_separator: String,

    /// Joins fields in the preview.
    #[serde(default = "default_field_separator")]
    pub field_separator: String,

    // =========================================================================
    // Session
    // =========================================================================
    /// Maximum generated-prompt history entries kept per session.
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Log level used when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_order: default_field_order_ids(),
            default_classifications: default_classifications(),
            default_seed: 0,
            default_target_model: default_target_model(),
            snippet_sources: Vec::new(),
            include_builtin_snippets: default_true(),
            tag_separator: default_tag_separator(),
            field_separator: default_field_separator(),
            history_size: default_history_size(),
            log_level: LogLevel::default(),
        }
    }
}
