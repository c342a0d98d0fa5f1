//! Flipflop: a tag-based prompt state engine.
//!
//! Prompts are built from fields, each an ordered list of tags: literal
//! text, fixed references into a snippet catalog, or random picks from a
//! catalog category. Random picks are resolved deterministically from
//! `(seed, field, position)`, so a preview is reproducible, and
//! [`realize`] can freeze them into fixed references without changing the
//! rendered text.

pub mod catalog;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod history;
pub mod logging;
pub mod realize;
pub mod render;
pub mod resolver;
pub mod session;
pub mod state;
pub mod tags;
pub mod template;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use catalog::{Catalog, CatalogSource, Classification, ItemId, SnippetItem};
pub use error::{FlipflopError, Result};
pub use render::{Renderer, render_model_input, render_preview};
pub use state::{FieldId, PromptState};
pub use tags::{Field, Tag};
