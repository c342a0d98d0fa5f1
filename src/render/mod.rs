//! Rendering a prompt state to text.
//!
//! Rendering is pure: random tags are resolved transiently through the
//! seeded resolver and the state is never touched. Because realize uses the
//! same resolution, a realized state renders to the same text as the state
//! it came from.
//!
//! Tags that cannot be resolved render as visible placeholders instead of
//! failing the render.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::resolver;
use crate::state::{FieldId, PromptState, default_field_order};
use crate::tags::Tag;


/// Layout parameters for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub field_order: Vec<FieldId>,
    pub tag_separator: String,
    pub field_separator: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            field_order: default_field_order(),
            tag_separator: ", ".to_string(),
            field_separator: "\n".to_string(),
        }
    }
}

/// One non-empty field after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub field_id: FieldId,
    pub label: String,
    /// Tag texts in field order, placeholders included.
    pub parts: Vec<String>,
    /// `parts` joined with the tag separator.
    pub content: String,
}

/// Turns the rendered sections into model input text.
///
/// Implementations own any model-specific phrasing. They must carry every
/// section's content through; ordering and connective wording are theirs.
pub trait ModelFormatter {
    fn format(&self, target_model: &str, sections: &[RenderedSection]) -> String;
}

/// Content-only formatter: sections as sentences, in field order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl ModelFormatter for PlainFormatter {
    fn format(&self, _target_model: &str, sections: &[RenderedSection]) -> String {
        if sections.is_empty() {
            return String::new();
        }
        let sentences: Vec<&str> = sections
            .iter()
            .map(|section| section.content.trim_end_matches('.'))
            .collect();
        format!("{}.", sentences.join(". "))
    }
}

/// External prompt refinement (e.g. a local language model).
///
/// Whatever the refiner returns is passed back to the caller untouched.
pub trait Refiner {
    fn refine(&self, target_model: &str, model_input: &str) -> Result<String>;
}

/// Text shown for a random tag with no visible candidates.
pub fn unresolved_placeholder(category: &str, subcategory: Option<&str>) -> String {
    match subcategory {
        Some(sub) => format!("[unresolved: {}/{}]", category, sub),
        None => format!("[unresolved: {}]", category),
    }
}

/// Text shown for a snippet reference the catalog no longer contains.
pub fn missing_placeholder(item_id: &str) -> String {
    format!("[missing snippet: {}]", item_id)
}

/// Renders states against one catalog.
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    catalog: &'a Catalog,
    options: RenderOptions,
}

impl<'a> Renderer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn tag_text(&self, state: &PromptState, field_id: &FieldId, index: usize, tag: &Tag) -> String {
        match tag {
            Tag::Literal { text } => text.clone(),
            Tag::SnippetRef { item_id } => match self.catalog.item(item_id) {
                Some(item) => item.content.clone(),
                None => missing_placeholder(item_id.as_str()),
            },
            Tag::CategoryRandom { .. } | Tag::SubcategoryRandom { .. } => {
                match resolver::resolve_tag(
                    self.catalog,
                    &state.active_classifications,
                    state.seed,
                    field_id,
                    index,
                    tag,
                ) {
                    Ok(Some(item)) => item.content.clone(),
                    _ => {
                        let (category, subcategory) = tag.random_scope().unwrap_or_default();
                        unresolved_placeholder(category, subcategory)
                    }
                }
            }
        }
    }

    /// Non-empty fields in rendering order with their resolved texts.
    pub fn sections(&self, state: &PromptState) -> Vec<RenderedSection> {
        state
            .ordered_fields(&self.options.field_order)
            .into_iter()
            .filter_map(|field| {
                let parts: Vec<String> = field
                    .tags()
                    .iter()
                    .enumerate()
                    .map(|(index, tag)| self.tag_text(state, field.id(), index, tag))
                    .filter(|text| !text.trim().is_empty())
                    .collect();
                if parts.is_empty() {
                    return None;
                }
                Some(RenderedSection {
                    field_id: field.id().clone(),
                    label: field.id().label(),
                    content: parts.join(&self.options.tag_separator),
                    parts,
                })
            })
            .collect()
    }

    /// Human-readable preview.
    pub fn preview(&self, state: &PromptState) -> String {
        self.sections(state)
            .iter()
            .map(|section| section.content.as_str())
            .collect::<Vec<_>>()
            .join(&self.options.field_separator)
    }

    /// Text handed to the model (or to a [`Refiner`]).
    pub fn model_input(&self, state: &PromptState, formatter: &dyn ModelFormatter) -> String {
        formatter.format(&state.target_model, &self.sections(state))
    }

    /// Render model input and pass it through `refiner`.
    pub fn refine(
        &self,
        state: &PromptState,
        formatter: &dyn ModelFormatter,
        refiner: &dyn Refiner,
    ) -> Result<String> {
        let input = self.model_input(state, formatter);
        tracing::debug!(target_model = %state.target_model, chars = input.len(), "sending prompt for refinement");
        refiner.refine(&state.target_model, &input)
    }
}

/// Preview with default layout.
pub fn render_preview(state: &PromptState, catalog: &Catalog) -> String {
    Renderer::new(catalog).preview(state)
}

/// Model input with default layout and the content-only formatter.
pub fn render_model_input(state: &PromptState, catalog: &Catalog) -> String {
    Renderer::new(catalog).model_input(state, &PlainFormatter)
}
