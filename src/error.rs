//! Error types for the prompt engine.
//!
//! Uses thiserror for derive macros. Structural failures (unreadable catalog,
//! unparsable template) are returned as errors; recoverable per-entry and
//! per-tag conditions are reported as warnings instead and never reach here
//! unless a caller explicitly escalates them.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for flipflop operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlipflopError {
    /// A whole catalog source could not be read or parsed.
    #[error("catalog load failed: {reason}")]
    CatalogLoad { reason: String },

    /// No catalog item matched a random tag under the active filter.
    #[error("no candidates for {}", describe_scope(.category, .subcategory.as_deref()))]
    EmptyCandidateSet {
        category: String,
        subcategory: Option<String>,
    },

    /// A tag sequence operation referenced a position outside the field.
    #[error("tag index {index} out of range for field of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A template blob was malformed or has an unsupported version.
    #[error("template format error: {reason}")]
    TemplateFormat { reason: String },

    /// Random tags remained after a realize that was required to be complete.
    #[error("{0}")]
    Unresolved(String),

    /// User provided invalid arguments or input files.
    #[error("{0}")]
    UserError(String),
}

fn describe_scope(category: &str, subcategory: Option<&str>) -> String {
    match subcategory {
        Some(sub) => format!("category '{}' / subcategory '{}'", category, sub),
        None => format!("category '{}'", category),
    }
}

impl FlipflopError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            FlipflopError::CatalogLoad { .. } => exit_codes::CATALOG_FAILURE,
            FlipflopError::TemplateFormat { .. } => exit_codes::TEMPLATE_FAILURE,
            FlipflopError::IndexOutOfRange { .. } => exit_codes::CONTRACT_VIOLATION,
            FlipflopError::Unresolved(_) => exit_codes::UNRESOLVED_TAGS,
            FlipflopError::EmptyCandidateSet { .. } | FlipflopError::UserError(_) => {
                exit_codes::USER_ERROR
            }
        }
    }

    pub(crate) fn catalog(reason: impl Into<String>) -> Self {
        FlipflopError::CatalogLoad {
            reason: reason.into(),
        }
    }

    pub(crate) fn template(reason: impl Into<String>) -> Self {
        FlipflopError::TemplateFormat {
            reason: reason.into(),
        }
    }
}

/// Result type alias for flipflop operations.
pub type Result<T> = std::result::Result<T, FlipflopError>;
