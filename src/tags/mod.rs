//! Tag sequence model.
//!
//! A field's content is an ordered list of [`Tag`]s. Tags carry no identity
//! beyond their position: duplicates are allowed, and random tags are keyed
//! for resolution by the index they occupy at the time of resolution.
//!
//! Random tags never store a resolved value. The only way one becomes fixed
//! is [`Field::replace_at`] with a [`Tag::SnippetRef`], which is what realize
//! does.

use crate::catalog::ItemId;
use crate::error::{FlipflopError, Result};
use crate::state::FieldId;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// One typed element of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tag {
    /// User-typed free text, rendered verbatim.
    Literal { text: String },
    /// Fixed reference to one catalog item.
    SnippetRef { item_id: ItemId },
    /// Uniform deterministic pick from every visible item in `category`.
    CategoryRandom { category: String },
    /// Same as `CategoryRandom`, narrowed to one subcategory.
    SubcategoryRandom {
        category: String,
        subcategory: String,
    },
}

impl Tag {
    pub fn literal(text: impl Into<String>) -> Self {
        Tag::Literal { text: text.into() }
    }

    pub fn snippet(item_id: impl Into<ItemId>) -> Self {
        Tag::SnippetRef {
            item_id: item_id.into(),
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Tag::CategoryRandom {
            category: category.into(),
        }
    }

    pub fn subcategory(category: impl Into<String>, subcategory: impl Into<String>) -> Self {
        Tag::SubcategoryRandom {
            category: category.into(),
            subcategory: subcategory.into(),
        }
    }

    /// True for tags resolved at render/realize time.
    pub fn is_random(&self) -> bool {
        matches!(self, Tag::CategoryRandom { .. } | Tag::SubcategoryRandom { .. })
    }

    /// `(category, subcategory)` for random tags.
    pub fn random_scope(&self) -> Option<(&str, Option<&str>)> {
        match self {
            Tag::CategoryRandom { category } => Some((category.as_str(), None)),
            Tag::SubcategoryRandom {
                category,
                subcategory,
            } => Some((category.as_str(), Some(subcategory.as_str()))),
            Tag::Literal { .. } | Tag::SnippetRef { .. } => None,
        }
    }
}

impl From<ItemId> for Tag {
    fn from(item_id: ItemId) -> Self {
        Tag::SnippetRef { item_id }
    }
}

/// Result of [`Field::toggle_snippet_ref`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The reference was appended at this index.
    Added(usize),
    /// The first reference was removed from this index.
    Removed(usize),
}

/// One prompt field and its ordered tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    id: FieldId,
    tags: Vec<Tag>,
}

impl Field {
    pub fn new(id: FieldId) -> Self {
        Self {
            id,
            tags: Vec::new(),
        }
    }

    pub fn with_tags(id: FieldId, tags: Vec<Tag>) -> Self {
        Self { id, tags }
    }

    pub fn id(&self) -> &FieldId {
        &self.id
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn into_tags(self) -> Vec<Tag> {
        self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.tags.len() {
            Ok(())
        } else {
            Err(FlipflopError::IndexOutOfRange {
                index,
                len: self.tags.len(),
            })
        }
    }

    pub fn append(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    /// Insert before `index`. `index == len()` appends.
    pub fn insert_at(&mut self, index: usize, tag: Tag) -> Result<()> {
        if index > self.tags.len() {
            return Err(FlipflopError::IndexOutOfRange {
                index,
                len: self.tags.len(),
            });
        }
        self.tags.insert(index, tag);
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Tag> {
        self.check_index(index)?;
        Ok(self.tags.remove(index))
    }

    /// Swap the tag at `index`, returning the previous one.
    pub fn replace_at(&mut self, index: usize, tag: Tag) -> Result<Tag> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.tags[index], tag))
    }

    /// Move the tag at `from` so it ends up at position `to`.
    pub fn move_tag(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        let tag = self.tags.remove(from);
        self.tags.insert(to, tag);
        Ok(())
    }

    /// Remove the first reference to `item_id`, or append one if absent.
    ///
    /// Only the first occurrence is removed so intentional repeats survive
    /// a single click.
    pub fn toggle_snippet_ref(&mut self, item_id: &ItemId) -> Toggle {
        let existing = self
            .tags
            .iter()
            .position(|tag| matches!(tag, Tag::SnippetRef { item_id: id } if id == item_id));
        match existing {
            Some(index) => {
                self.tags.remove(index);
                Toggle::Removed(index)
            }
            None => {
                self.tags.push(Tag::snippet(item_id.clone()));
                Toggle::Added(self.tags.len() - 1)
            }
        }
    }

    /// Append a literal tag per comma/period separated chunk of `text`.
    pub fn append_text(&mut self, text: &str) -> usize {
        let tags = literals_from_text(text);
        let added = tags.len();
        self.tags.extend(tags);
        added
    }

    /// Positions of random tags, in order.
    pub fn random_positions(&self) -> Vec<usize> {
        self.tags
            .iter()
            .enumerate()
            .filter(|(_, tag)| tag.is_random())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_fully_resolved(&self) -> bool {
        !self.tags.iter().any(Tag::is_random)
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }
}

/// Split typed text on `,` and `.` into trimmed, non-empty literal tags.
pub fn literals_from_text(text: &str) -> Vec<Tag> {
    text.split([',', '.'])
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(Tag::literal)
        .collect()
}
