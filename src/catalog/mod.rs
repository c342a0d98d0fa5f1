//! Snippet catalog.
//!
//! The catalog is built once from an ordered list of [`CatalogSource`]s and
//! is read-only afterwards, so it can be shared across threads freely. Items
//! keep load order inside every index bucket; randomisation is left to the
//! resolver.
//!
//! Duplicate entries (same normalised category, subcategory, and display
//! name) collapse to the first occurrence so they are not double-counted as
//! candidates.

mod source;
pub mod types;


pub use source::{CatalogSource, LoadWarning};
pub use types::{Classification, ClassificationFilter, ItemId, SnippetItem, normalize_segment};

use crate::error::Result;
use source::RawEntry;
use std::collections::{HashMap, HashSet};

/// Items of one category, with per-subcategory buckets.
#[derive(Debug, Default)]
struct CategoryIndex {
    name: String,
    all: Vec<usize>,
    subcategories: Vec<(String, Vec<usize>)>,
}

impl CategoryIndex {
    fn bucket_mut(&mut self, subcategory: &str) -> &mut Vec<usize> {
        let key = normalize_segment(subcategory);
        let position = self
            .subcategories
            .iter()
            .position(|(name, _)| normalize_segment(name) == key);
        match position {
            Some(position) => &mut self.subcategories[position].1,
            None => {
                self.subcategories.push((subcategory.to_string(), Vec::new()));
                let last = self.subcategories.len() - 1;
                &mut self.subcategories[last].1
            }
        }
    }

    fn bucket(&self, subcategory: &str) -> Option<&[usize]> {
        let key = normalize_segment(subcategory);
        self.subcategories
            .iter()
            .find(|(name, _)| normalize_segment(name) == key)
            .map(|(_, bucket)| bucket.as_slice())
    }
}

/// Indexed, immutable collection of snippet items.
#[derive(Debug, Default)]
pub struct Catalog {
    items: Vec<SnippetItem>,
    by_id: HashMap<ItemId, usize>,
    categories: Vec<CategoryIndex>,
    category_lookup: HashMap<String, usize>,
    warnings: Vec<LoadWarning>,
}

impl Catalog {
    /// Build a catalog from sources, in order.
    ///
    /// A source that cannot be parsed as a whole fails the load. Bad entries
    /// inside an otherwise valid source are skipped and recorded in
    /// [`Catalog::load_warnings`].
    pub fn load(sources: &[CatalogSource]) -> Result<Self> {
        let mut warnings = Vec::new();
        let mut parsed = Vec::with_capacity(sources.len());
        for source in sources {
            parsed.push((source.name.as_str(), source::parse_source(source, &mut warnings)?));
        }

        let mut catalog = Catalog::default();
        let mut seen = HashSet::new();
        for (source_name, entries) in parsed {
            for entry in entries {
                catalog.insert(source_name, entry, &mut seen, &mut warnings);
            }
        }
        catalog.warnings = warnings;

        tracing::info!(
            items = catalog.items.len(),
            categories = catalog.categories.len(),
            skipped = catalog.warnings.len(),
            "snippet catalog loaded"
        );
        Ok(catalog)
    }

    /// Catalog containing only the built-in default snippets.
    pub fn builtin() -> Result<Self> {
        Self::load(&[CatalogSource::builtin()])
    }

    fn insert(
        &mut self,
        source_name: &str,
        entry: RawEntry,
        seen: &mut HashSet<String>,
        warnings: &mut Vec<LoadWarning>,
    ) {
        let key = types::dedup_key(
            &entry.category,
            entry.subcategory.as_deref(),
            &entry.display_name,
        );
        if seen.contains(&key) {
            tracing::debug!(
                source = source_name,
                name = %entry.display_name,
                "dropping duplicate snippet"
            );
            return;
        }

        let id = match entry.id {
            Some(id) => ItemId::new(id),
            None => ItemId::derive(
                &entry.category,
                entry.subcategory.as_deref(),
                &entry.display_name,
            ),
        };
        if self.by_id.contains_key(&id) {
            let message = format!("duplicate item id '{}'", id);
            tracing::warn!(source = source_name, "skipping snippet entry: {}", message);
            warnings.push(LoadWarning {
                source: source_name.to_string(),
                location: entry.display_name,
                message,
            });
            return;
        }
        seen.insert(key);

        let index = self.items.len();
        let category_key = normalize_segment(&entry.category);
        let category_position = match self.category_lookup.get(&category_key) {
            Some(&position) => position,
            None => {
                self.categories.push(CategoryIndex {
                    name: entry.category.clone(),
                    ..CategoryIndex::default()
                });
                let position = self.categories.len() - 1;
                self.category_lookup.insert(category_key, position);
                position
            }
        };
        let category = &mut self.categories[category_position];
        category.all.push(index);
        if let Some(subcategory) = entry.subcategory.as_deref() {
            category.bucket_mut(subcategory).push(index);
        }

        self.by_id.insert(id.clone(), index);
        self.items.push(SnippetItem {
            id,
            content: entry
                .content
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| entry.display_name.clone()),
            display_name: entry.display_name,
            description: entry.description,
            classification: entry.classification,
            category: entry.category,
            subcategory: entry.subcategory,
        });
    }

    /// Items of `category` (optionally narrowed to `subcategory`) whose
    /// classification is an exact member of `filter`, in load order.
    ///
    /// Category and subcategory names match after normalisation. Unknown
    /// names yield an empty list.
    pub fn items_for(
        &self,
        category: &str,
        subcategory: Option<&str>,
        filter: &ClassificationFilter,
    ) -> Vec<&SnippetItem> {
        let Some(&position) = self.category_lookup.get(&normalize_segment(category)) else {
            return Vec::new();
        };
        let index = &self.categories[position];
        let bucket = match subcategory {
            Some(sub) => index.bucket(sub).unwrap_or(&[]),
            None => index.all.as_slice(),
        };
        bucket
            .iter()
            .map(|&i| &self.items[i])
            .filter(|item| item.is_visible(filter))
            .collect()
    }

    /// Look up an item by id, regardless of classification.
    pub fn item(&self, id: &ItemId) -> Option<&SnippetItem> {
        self.by_id.get(id).map(|&i| &self.items[i])
    }

    /// Category names in first-seen order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Subcategory names of `category` in first-seen order.
    pub fn subcategories(&self, category: &str) -> Vec<&str> {
        self.category_lookup
            .get(&normalize_segment(category))
            .map(|&position| {
                self.categories[position]
                    .subcategories
                    .iter()
                    .map(|(name, _)| name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All items in load order.
    pub fn items(&self) -> &[SnippetItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries skipped while loading.
    pub fn load_warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }
}
