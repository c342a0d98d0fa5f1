//! Configuration model for flipflop.
//!
//! This module defines the Config struct that represents `flipflop.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of config values.
//!
//! The engine itself never reads config: callers turn it into explicit
//! parameters such as [`crate::render::RenderOptions`] or an initial
//! [`crate::state::PromptState`].

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::LogLevel;
