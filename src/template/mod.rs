//! Template serialization.
//!
//! A template is the persisted form of a [`PromptState`]:
//!
//! ```json
//! {
//!   "format_version": 3,
//!   "saved_at": "2024-05-01T12:00:00Z",
//!   "prompt_state": {
//!     "fields": { "weather": [{ "kind": "category_random", "category": "weather" }] },
//!     "active_classifications": ["PG"],
//!     "seed": 42,
//!     "target_model": "seedream"
//!   }
//! }
//! ```
//!
//! Older blobs are upgraded through the pure steps in [`migrations`] before
//! anything is returned. A blob either parses and migrates completely or
//! the caller gets an error; there is no partially-loaded state.

pub mod migrations;

use crate::catalog::ClassificationFilter;
use crate::error::{FlipflopError, Result};
use crate::state::{FieldId, PromptState};
use crate::tags::Tag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;


/// Version written by [`serialize`].
pub const CURRENT_FORMAT_VERSION: u32 = 3;

/// Current template document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub format_version: u32,
    pub saved_at: DateTime<Utc>,
    pub prompt_state: PersistedState,
}

/// The `prompt_state` section of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub fields: BTreeMap<FieldId, Vec<Tag>>,
    #[serde(default)]
    pub active_classifications: ClassificationFilter,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub target_model: String,
}

impl From<&PromptState> for PersistedState {
    fn from(state: &PromptState) -> Self {
        Self {
            fields: state
                .fields()
                .map(|field| (field.id().clone(), field.tags().to_vec()))
                .collect(),
            active_classifications: state.active_classifications.clone(),
            seed: state.seed,
            target_model: state.target_model.clone(),
        }
    }
}

impl From<PersistedState> for PromptState {
    fn from(persisted: PersistedState) -> Self {
        let mut state = PromptState::new(persisted.seed, persisted.target_model);
        state.active_classifications = persisted.active_classifications;
        for (id, tags) in persisted.fields {
            state.set_field(id, tags);
        }
        state
    }
}

impl Template {
    pub fn into_state(self) -> PromptState {
        self.prompt_state.into()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FlipflopError::template(format!("failed to encode template: {}", e)))
    }
}

/// Snapshot `state` as a current-version template stamped with now.
pub fn serialize(state: &PromptState) -> Template {
    serialize_at(state, Utc::now())
}

/// Snapshot `state` with an explicit timestamp.
pub fn serialize_at(state: &PromptState, saved_at: DateTime<Utc>) -> Template {
    Template {
        format_version: CURRENT_FORMAT_VERSION,
        saved_at,
        prompt_state: state.into(),
    }
}

/// Parse a template blob of any supported version into the current form.
pub fn parse(blob: &str) -> Result<Template> {
    let value: Value = serde_json::from_str(blob)
        .map_err(|e| FlipflopError::template(format!("invalid JSON: {}", e)))?;
    if !value.is_object() {
        return Err(FlipflopError::template("template must be a JSON object"));
    }

    let version = detect_version(&value)?;
    match version {
        1 => {
            let v1: migrations::TemplateV1 = decode(value, 1)?;
            tracing::info!("migrating template v1 -> v2");
            let v2 = migrations::v1_to_v2(v1);
            tracing::info!("migrating template v2 -> v3");
            migrations::v2_to_v3(v2)
        }
        2 => {
            let v2: migrations::TemplateV2 = decode(value, 2)?;
            tracing::info!("migrating template v2 -> v3");
            migrations::v2_to_v3(v2)
        }
        CURRENT_FORMAT_VERSION => decode(value, CURRENT_FORMAT_VERSION),
        other => {
            tracing::warn!(version = other, "refusing template with unknown format version");
            Err(FlipflopError::template("unsupported version"))
        }
    }
}

/// Parse, migrate, and unpack a template blob.
pub fn deserialize(blob: &str) -> Result<PromptState> {
    Ok(parse(blob)?.into_state())
}

/// A missing `format_version` marks a legacy v1 document.
fn detect_version(value: &Value) -> Result<u32> {
    match value.get("format_version") {
        None => Ok(1),
        Some(raw) => raw
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| FlipflopError::template(format!("format_version must be a non-negative integer, got {}", raw))),
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value, version: u32) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| FlipflopError::template(format!("invalid v{} template: {}", version, e)))
}
