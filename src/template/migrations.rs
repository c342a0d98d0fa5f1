//! Legacy template formats and the pure steps that upgrade them.
//!
//! - v1 has no `format_version`. Every field is a plain comma-separated
//!   string next to `families`, `model`, `llm` and `saved_at`.
//! - v2 stores each field as a list of tags whose kind is implied by a
//!   `type` marker (the tag colour in the old editor) plus a
//!   `category_path`.
//! - v3 is [`Template`]: tags carry an explicit `kind`.
//!
//! Each step only reshapes data; nothing here consults a catalog or the
//! clock.

use super::{CURRENT_FORMAT_VERSION, PersistedState, Template};
use crate::catalog::{Classification, ItemId};
use crate::config::types::default_target_model;
use crate::error::{FlipflopError, Result};
use crate::state::FieldId;
use crate::tags::Tag;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field names that changed between v1 and v2.
const V1_FIELD_RENAMES: [(&str, &str); 2] = [("datetime", "date_time"), ("pose", "pose_action")];

/// Legacy flat template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateV1 {
    #[serde(default)]
    pub families: Option<Vec<Classification>>,
    #[serde(default)]
    pub model: Option<String>,
    /// Refinement model name; not part of the prompt state.
    #[serde(default)]
    pub llm: Option<String>,
    #[serde(default)]
    pub saved_at: Option<String>,
    /// Every other key is a field holding free text.
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

/// Tag marker used by v2 templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyTagType {
    Snippet,
    UserText,
    Category,
    Subcategory,
    Custom,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyTag {
    pub text: String,
    #[serde(rename = "type")]
    pub tag_type: LegacyTagType,
    #[serde(default)]
    pub category_path: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_missing: bool,
}

impl LegacyTag {
    fn user_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tag_type: LegacyTagType::UserText,
            category_path: Vec::new(),
            is_missing: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateV2 {
    pub format_version: u32,
    #[serde(default)]
    pub saved_at: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<LegacyTag>>,
    #[serde(default)]
    pub families: Option<Vec<Classification>>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub llm: Option<String>,
    #[serde(default)]
    pub seed: u64,
}

/// v1 -> v2: split each field's text on commas into user-text tags and
/// rename the fields whose ids changed.
pub fn v1_to_v2(v1: TemplateV1) -> TemplateV2 {
    let fields = v1
        .fields
        .into_iter()
        .map(|(name, text)| {
            let name = match V1_FIELD_RENAMES.iter().find(|(old, _)| *old == name) {
                Some((_, new)) => new.to_string(),
                None => name,
            };
            let tags = text
                .split(',')
                .map(str::trim)
                .filter(|chunk| !chunk.is_empty())
                .map(LegacyTag::user_text)
                .collect();
            (name, tags)
        })
        .collect();

    TemplateV2 {
        format_version: 2,
        saved_at: v1.saved_at,
        fields,
        families: v1.families,
        model: v1.model,
        llm: v1.llm,
        seed: 0,
    }
}

/// v2 -> v3: map each colour marker onto the explicit tag union.
///
/// - `user_text` and `custom` become literals.
/// - `snippet` becomes a reference to the id derived from its category
///   path and text, or a literal when the path is empty.
/// - `category` and `subcategory` become random tags over their path.
/// - `missing` becomes whichever random tag its path describes.
///
/// The `llm` name is dropped. An absent `families` list means PG only.
pub fn v2_to_v3(v2: TemplateV2) -> Result<Template> {
    let mut fields = BTreeMap::new();
    for (name, tags) in v2.fields {
        let tags = tags
            .iter()
            .map(|tag| convert_tag(&name, tag))
            .collect::<Result<Vec<_>>>()?;
        fields.insert(FieldId::from(name), tags);
    }

    let active_classifications = v2
        .families
        .unwrap_or_else(|| vec![Classification::Pg])
        .into_iter()
        .collect();

    Ok(Template {
        format_version: CURRENT_FORMAT_VERSION,
        saved_at: v2
            .saved_at
            .as_deref()
            .and_then(parse_legacy_timestamp)
            .unwrap_or_default(),
        prompt_state: PersistedState {
            fields,
            active_classifications,
            seed: v2.seed,
            target_model: v2.model.unwrap_or_else(default_target_model),
        },
    })
}

fn convert_tag(field: &str, tag: &LegacyTag) -> Result<Tag> {
    let path: Vec<&str> = tag
        .category_path
        .iter()
        .map(|segment| segment.trim())
        .filter(|segment| !segment.is_empty())
        .collect();
    let text = tag.text.trim();

    let converted = match tag.tag_type {
        LegacyTagType::UserText | LegacyTagType::Custom => Tag::literal(tag.text.clone()),
        LegacyTagType::Snippet => match path.as_slice() {
            [] => Tag::literal(tag.text.clone()),
            [category] => Tag::snippet(ItemId::derive(category, None, text)),
            [category, subcategory, ..] => {
                Tag::snippet(ItemId::derive(category, Some(*subcategory), text))
            }
        },
        LegacyTagType::Category => match path.first() {
            Some(category) => Tag::category(*category),
            None if !text.is_empty() => Tag::category(text),
            None => return Err(invalid_tag(field, "category tag without a category")),
        },
        LegacyTagType::Subcategory => match path.as_slice() {
            [category, subcategory, ..] => Tag::subcategory(*category, *subcategory),
            [category] if !text.is_empty() => Tag::subcategory(*category, text),
            _ => return Err(invalid_tag(field, "subcategory tag without a category path")),
        },
        LegacyTagType::Missing => match path.as_slice() {
            [category, subcategory, ..] => Tag::subcategory(*category, *subcategory),
            [category] => Tag::category(*category),
            [] => Tag::literal(tag.text.clone()),
        },
    };
    Ok(converted)
}

fn invalid_tag(field: &str, reason: &str) -> FlipflopError {
    FlipflopError::template(format!("field '{}': {}", field, reason))
}

/// RFC 3339, or the naive local `isoformat()` strings older saves used
/// (read as UTC).
fn parse_legacy_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
