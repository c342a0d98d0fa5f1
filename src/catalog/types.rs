//! Snippet item, identity, and classification types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Content-rating classification of a snippet item.
///
/// Filtering is strict membership: there is no implied hierarchy between
/// the levels, so `Nsfw` does not include `Pg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "PG", alias = "pg")]
    Pg,
    #[serde(rename = "NSFW", alias = "nsfw")]
    Nsfw,
    /// Legacy sources call this level `Hentai`.
    #[serde(rename = "EXPLICIT", alias = "explicit", alias = "Hentai", alias = "hentai")]
    Explicit,
}

impl Classification {
    pub const ALL: [Classification; 3] = [
        Classification::Pg,
        Classification::Nsfw,
        Classification::Explicit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Pg => "PG",
            Classification::Nsfw => "NSFW",
            Classification::Explicit => "EXPLICIT",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PG" => Ok(Classification::Pg),
            "NSFW" => Ok(Classification::Nsfw),
            "EXPLICIT" | "HENTAI" => Ok(Classification::Explicit),
            other => Err(format!(
                "unknown classification '{}' (expected PG, NSFW or EXPLICIT)",
                other
            )),
        }
    }
}

/// The set of classifications a caller wants to see.
pub type ClassificationFilter = BTreeSet<Classification>;

/// Stable identifier of a snippet item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the id an item gets when its source does not name one.
    ///
    /// Segments are normalised with [`normalize_segment`], so two entries
    /// that differ only in case or spacing share an id. A `/` inside a
    /// segment is escaped as `%2F`.
    pub fn derive(category: &str, subcategory: Option<&str>, display_name: &str) -> Self {
        Self(dedup_key(category, subcategory, display_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Trim, lowercase, and collapse internal whitespace runs to one space.
pub fn normalize_segment(segment: &str) -> String {
    segment
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalised segment with `%` and `/` percent-encoded, so joined keys
/// split back into the same three segments.
fn key_segment(segment: &str) -> String {
    normalize_segment(segment)
        .replace('%', "%25")
        .replace('/', "%2F")
}

/// Key under which duplicate entries collapse at load time.
pub(crate) fn dedup_key(category: &str, subcategory: Option<&str>, display_name: &str) -> String {
    format!(
        "{}/{}/{}",
        key_segment(category),
        subcategory.map(key_segment).unwrap_or_default(),
        key_segment(display_name)
    )
}

/// One loaded snippet. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetItem {
    pub id: ItemId,
    pub display_name: String,
    pub content: String,
    pub description: String,
    pub classification: Classification,
    pub category: String,
    pub subcategory: Option<String>,
}

impl SnippetItem {
    pub fn is_visible(&self, filter: &ClassificationFilter) -> bool {
        filter.contains(&self.classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_parses_legacy_names() {
        assert_eq!("pg".parse::<Classification>(), Ok(Classification::Pg));
        assert_eq!("Hentai".parse::<Classification>(), Ok(Classification::Explicit));
        assert!("R".parse::<Classification>().is_err());
    }

    #[test]
    fn classification_serde_accepts_aliases() {
        let parsed: Classification = serde_yaml::from_str("Hentai").unwrap();
        assert_eq!(parsed, Classification::Explicit);
        assert_eq!(serde_json::to_string(&Classification::Nsfw).unwrap(), "\"NSFW\"");
    }

    #[test]
    fn derived_ids_ignore_case_and_spacing() {
        let a = ItemId::derive("Weather", None, "  Light   Rain ");
        let b = ItemId::derive("weather", None, "light rain");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "weather//light rain");

        let c = ItemId::derive("Subjects", Some("Human"), "Man");
        assert_eq!(c.as_str(), "subjects/human/man");
    }

    #[test]
    fn derived_ids_escape_separator_inside_segments() {
        let nested = ItemId::derive("a/b", None, "c");
        let split = ItemId::derive("a", Some("b"), "c");
        assert_ne!(nested, split);
        assert_eq!(nested.as_str(), "a%2Fb//c");
        assert_eq!(ItemId::derive("x", None, "50%/50%").as_str(), "x//50%25%2F50%25");
        assert_ne!(
            ItemId::derive("x", None, "a%2Fb"),
            ItemId::derive("x", None, "a/b")
        );
    }
}
