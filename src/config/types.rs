//! Configuration types and defaults for flipflop.
//!
//! This module defines enums and default value functions used by the
//! Config struct.

use crate::catalog::Classification;
use crate::state::{FieldId, default_field_order};
use serde::{Deserialize, Serialize};

/// Log verbosity for the CLI subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

// ============================================================================
// Default value functions
// ============================================================================

pub fn default_field_order_ids() -> Vec<FieldId> {
    default_field_order()
}

pub fn default_classifications() -> Vec<Classification> {
    vec![Classification::Pg]
}

pub fn default_target_model() -> String {
    "seedream".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_tag_separator() -> String {
    ", ".to_string()
}

pub fn default_field_separator() -> String {
    "\n".to_string()
}

pub fn default_history_size() -> usize {
    100
}
