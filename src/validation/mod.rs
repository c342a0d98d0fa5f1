//! Non-fatal checks on a prompt state before it is used.
//!
//! Checks run against the rendered text, so a field whose tags all render
//! to nothing counts as empty. Warnings never block rendering or saving.

use crate::render::{RenderedSection, Renderer};
use crate::state::{FieldId, PromptState};
use std::fmt;


/// Requirement on one field's rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub field_id: FieldId,
    /// Minimum rendered length in characters, surrounding whitespace
    /// excluded. Zero only requires the field to render something.
    pub min_chars: usize,
}

impl FieldRule {
    pub fn new(field_id: impl Into<FieldId>, min_chars: usize) -> Self {
        Self {
            field_id: field_id.into(),
            min_chars,
        }
    }
}

/// Setting, subjects and pose/action must be filled in; the first two
/// should say a little more than a word.
pub fn default_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::new("setting", 3),
        FieldRule::new("subjects", 5),
        FieldRule::new("pose_action", 0),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationWarningKind {
    /// The field is absent or renders to nothing.
    Missing,
    /// The field renders to fewer characters than its rule asks for.
    TooShort { min_chars: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub field_id: FieldId,
    pub kind: ValidationWarningKind,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ValidationWarningKind::Missing => {
                write!(f, "{} is required", self.field_id.label())
            }
            ValidationWarningKind::TooShort { min_chars, actual } => write!(
                f,
                "{} should be more detailed ({} of at least {} characters)",
                self.field_id.label(),
                actual,
                min_chars
            ),
        }
    }
}

/// Check `state` against [`default_rules`].
pub fn validate(state: &PromptState, renderer: &Renderer<'_>) -> Vec<ValidationWarning> {
    validate_with_rules(state, renderer, &default_rules())
}

/// Check `state` against `rules`, in rule order.
pub fn validate_with_rules(
    state: &PromptState,
    renderer: &Renderer<'_>,
    rules: &[FieldRule],
) -> Vec<ValidationWarning> {
    let sections = renderer.sections(state);
    let warnings: Vec<ValidationWarning> = rules
        .iter()
        .filter_map(|rule| check(rule, &sections))
        .collect();

    for warning in &warnings {
        tracing::warn!(field = %warning.field_id, "{}", warning);
    }
    warnings
}

fn check(rule: &FieldRule, sections: &[RenderedSection]) -> Option<ValidationWarning> {
    let actual = sections
        .iter()
        .find(|section| section.field_id == rule.field_id)
        .map_or(0, |section| section.content.trim().chars().count());

    let kind = if actual == 0 {
        ValidationWarningKind::Missing
    } else if actual < rule.min_chars {
        ValidationWarningKind::TooShort {
            min_chars: rule.min_chars,
            actual,
        }
    } else {
        return None;
    };
    Some(ValidationWarning {
        field_id: rule.field_id.clone(),
        kind,
    })
}
