//! Catalog source parsing.
//!
//! A source is YAML or JSON text (JSON is parsed by the YAML parser). Three
//! top-level shapes are accepted:
//!
//! ```text
//! # 1. a bare list of entries
//! - display_name: Sunny
//!   classification: PG
//!   category: weather
//!
//! # 2. a mapping with an `entries` list
//! name: my-snippets
//! entries:
//!   - { display_name: Rainy, classification: PG, category: weather }
//!
//! # 3. grouped snippet files
//! rating: PG
//! categories:
//!   Location: [hotel lobby, beach]
//!   Human:
//!     Gender: [man, woman]
//! ```
//!
//! Anything else fails the whole source. Individual entries that do not
//! parse are skipped and recorded as [`LoadWarning`]s.

use super::types::Classification;
use crate::error::{FlipflopError, Result};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::path::Path;

const BUILTIN_SNIPPETS: &str = include_str!("default_snippets.yaml");

/// One unit of catalog input: a named blob of YAML/JSON text.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    pub name: String,
    pub text: String,
}

impl CatalogSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read a source from disk. An unreadable file fails the load.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            FlipflopError::catalog(format!(
                "failed to read snippet source '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::new(path.display().to_string(), text))
    }

    /// The default PG snippet set shipped with the crate.
    pub fn builtin() -> Self {
        Self::new("builtin", BUILTIN_SNIPPETS)
    }
}

/// A skipped entry, reported after a load completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub source: String,
    pub location: String,
    pub message: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.source, self.location, self.message)
    }
}

/// An entry as written in a source, before ids and dedup are applied.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(alias = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub description: String,
    pub classification: Classification,
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
}

impl RawEntry {
    fn from_text(
        text: String,
        classification: Classification,
        category: &str,
        subcategory: Option<&str>,
    ) -> Self {
        Self {
            id: None,
            display_name: text,
            content: None,
            description: String::new(),
            classification,
            category: category.to_string(),
            subcategory: subcategory.map(str::to_string),
        }
    }

    /// Trim names and reject entries missing a display name or category.
    fn normalized(mut self) -> std::result::Result<Self, String> {
        self.display_name = self.display_name.trim().to_string();
        self.category = self.category.trim().to_string();
        self.subcategory = self
            .subcategory
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self.id = self
            .id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if self.display_name.is_empty() {
            return Err("display_name must be non-empty".to_string());
        }
        if self.category.is_empty() {
            return Err("category must be non-empty".to_string());
        }
        Ok(self)
    }
}

/// Parse one source into entries, pushing a warning per skipped entry.
pub(crate) fn parse_source(
    source: &CatalogSource,
    warnings: &mut Vec<LoadWarning>,
) -> Result<Vec<RawEntry>> {
    let document: Value = serde_yaml::from_str(&source.text).map_err(|e| {
        FlipflopError::catalog(format!("failed to parse source '{}': {}", source.name, e))
    })?;

    let mut parser = SourceParser {
        source,
        warnings,
        entries: Vec::new(),
    };

    match document {
        Value::Sequence(entries) => parser.entries(&entries)?,
        Value::Mapping(map) => parser.mapping(&map)?,
        Value::Null => {}
        _ => return Err(parser.shape_error()),
    }

    Ok(parser.entries)
}

struct SourceParser<'a> {
    source: &'a CatalogSource,
    warnings: &'a mut Vec<LoadWarning>,
    entries: Vec<RawEntry>,
}

impl SourceParser<'_> {
    fn shape_error(&self) -> FlipflopError {
        FlipflopError::catalog(format!(
            "source '{}' must be a list of entries, a mapping with `entries`, or a grouped `categories` mapping",
            self.source.name
        ))
    }

    fn warn(&mut self, location: String, message: String) {
        tracing::warn!(
            source = %self.source.name,
            %location,
            "skipping snippet entry: {}",
            message
        );
        self.warnings.push(LoadWarning {
            source: self.source.name.clone(),
            location,
            message,
        });
    }

    fn push(&mut self, location: String, entry: RawEntry) {
        match entry.normalized() {
            Ok(entry) => self.entries.push(entry),
            Err(message) => self.warn(location, message),
        }
    }

    fn mapping(&mut self, map: &Mapping) -> Result<()> {
        if let Some(entries) = map.get("entries") {
            return match entries {
                Value::Sequence(seq) => self.entries(seq),
                _ => Err(FlipflopError::catalog(format!(
                    "source '{}': `entries` must be a list",
                    self.source.name
                ))),
            };
        }

        if let Some(categories) = map.get("categories") {
            let rating = match map.get("rating") {
                None | Some(Value::Null) => Classification::Pg,
                Some(value) => serde_yaml::from_value(value.clone()).map_err(|e| {
                    FlipflopError::catalog(format!(
                        "source '{}': invalid rating: {}",
                        self.source.name, e
                    ))
                })?,
            };
            return match categories {
                Value::Mapping(groups) => {
                    self.grouped(groups, rating);
                    Ok(())
                }
                _ => Err(FlipflopError::catalog(format!(
                    "source '{}': `categories` must be a mapping",
                    self.source.name
                ))),
            };
        }

        Err(self.shape_error())
    }

    fn entries(&mut self, seq: &[Value]) -> Result<()> {
        for (index, value) in seq.iter().enumerate() {
            let location = format!("entry {}", index);
            match serde_yaml::from_value::<RawEntry>(value.clone()) {
                Ok(entry) => self.push(location, entry),
                Err(e) => self.warn(location, e.to_string()),
            }
        }
        Ok(())
    }

    fn grouped(&mut self, groups: &Mapping, rating: Classification) {
        for (key, value) in groups {
            let Some(category) = scalar_text(key) else {
                self.warn(
                    "categories".to_string(),
                    "category name must be a string".to_string(),
                );
                continue;
            };

            match value {
                Value::Sequence(items) => self.grouped_items(items, rating, &category, None),
                Value::Mapping(subgroups) => {
                    for (sub_key, sub_value) in subgroups {
                        let location = format!("categories.{}", category);
                        let Some(subcategory) = scalar_text(sub_key) else {
                            self.warn(location, "subcategory name must be a string".to_string());
                            continue;
                        };
                        match sub_value {
                            Value::Sequence(items) => {
                                self.grouped_items(items, rating, &category, Some(&subcategory))
                            }
                            _ => self.warn(
                                format!("{}.{}", location, subcategory),
                                "subcategory must be a list of snippets".to_string(),
                            ),
                        }
                    }
                }
                _ => self.warn(
                    format!("categories.{}", category),
                    "category must be a list or a mapping of subcategories".to_string(),
                ),
            }
        }
    }

    fn grouped_items(
        &mut self,
        items: &[Value],
        rating: Classification,
        category: &str,
        subcategory: Option<&str>,
    ) {
        let path = match subcategory {
            Some(sub) => format!("categories.{}.{}", category, sub),
            None => format!("categories.{}", category),
        };
        for (index, item) in items.iter().enumerate() {
            let location = format!("{}[{}]", path, index);
            match scalar_text(item) {
                Some(text) => {
                    let entry = RawEntry::from_text(text, rating, category, subcategory);
                    self.push(location, entry);
                }
                None => self.warn(location, "snippet must be a string".to_string()),
            }
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
