//! Prompt state: every field's tag sequence plus the metadata that drives
//! resolution (active classifications, seed, target model).
//!
//! The UI layer owns the single live `PromptState`. Engine operations borrow
//! it and never keep a copy of their own.

use crate::catalog::{Classification, ClassificationFilter};
use crate::config::Config;
use crate::tags::{Field, Tag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;


/// Fields shown by the authoring UI, in rendering order.
pub const DEFAULT_FIELD_ORDER: [&str; 9] = [
    "style",
    "setting",
    "weather",
    "date_time",
    "subjects",
    "pose_action",
    "camera",
    "framing_action",
    "grading",
];

/// Name of a prompt field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable label: `pose_action` becomes `Pose Action`.
    pub fn label(&self) -> String {
        self.0
            .split(['_', '-'])
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FieldId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The aggregate edited by the user and persisted in templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    fields: BTreeMap<FieldId, Field>,
    pub active_classifications: ClassificationFilter,
    pub seed: u64,
    pub target_model: String,
}

impl PromptState {
    /// Empty state with only PG content visible.
    pub fn new(seed: u64, target_model: impl Into<String>) -> Self {
        Self {
            fields: BTreeMap::new(),
            active_classifications: [Classification::Pg].into_iter().collect(),
            seed,
            target_model: target_model.into(),
        }
    }

    /// Session-start state: an empty field for every configured field id.
    pub fn from_config(config: &Config) -> Self {
        let mut state = Self::new(config.default_seed, config.default_target_model.clone());
        state.active_classifications = config.default_classifications.iter().copied().collect();
        for id in &config.field_order {
            state.field_mut(id);
        }
        state
    }

    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.fields.get(id)
    }

    /// Mutable access to a field, creating it empty if absent.
    pub fn field_mut(&mut self, id: &FieldId) -> &mut Field {
        self.fields
            .entry(id.clone())
            .or_insert_with(|| Field::new(id.clone()))
    }

    /// Replace a field's whole tag sequence.
    pub fn set_field(&mut self, id: FieldId, tags: Vec<Tag>) {
        self.fields.insert(id.clone(), Field::with_tags(id, tags));
    }

    pub fn remove_field(&mut self, id: &FieldId) -> Option<Field> {
        self.fields.remove(id)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub(crate) fn fields_mut(&mut self) -> impl Iterator<Item = &mut Field> {
        self.fields.values_mut()
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &FieldId> {
        self.fields.keys()
    }

    /// Fields in rendering order: those named in `order` first, in that
    /// order, then any remaining fields sorted by id.
    pub fn ordered_fields<'a>(&'a self, order: &'a [FieldId]) -> Vec<&'a Field> {
        let mut out: Vec<&Field> = order.iter().filter_map(|id| self.fields.get(id)).collect();
        out.extend(self.fields.values().filter(|field| !order.contains(field.id())));
        out
    }

    pub fn set_classifications<I: IntoIterator<Item = Classification>>(&mut self, classes: I) {
        self.active_classifications = classes.into_iter().collect();
    }

    /// Total number of random tags across all fields.
    pub fn random_tag_count(&self) -> usize {
        self.fields
            .values()
            .map(|field| field.random_positions().len())
            .sum()
    }

    pub fn is_fully_resolved(&self) -> bool {
        self.fields.values().all(Field::is_fully_resolved)
    }

    /// Empty every field, keeping ids and metadata.
    pub fn clear_fields(&mut self) {
        for field in self.fields.values_mut() {
            field.clear();
        }
    }
}

/// The default rendering order as field ids.
pub fn default_field_order() -> Vec<FieldId> {
    DEFAULT_FIELD_ORDER.iter().map(|&id| FieldId::from(id)).collect()
}
