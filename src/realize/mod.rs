//! Realize: freeze every random tag into a fixed snippet reference.
//!
//! Each random tag at index `i` of field `f` is resolved with
//! `(state.seed, f, i)` against the state's active classifications and
//! replaced in place by a `SnippetRef`. Replacement never shifts positions,
//! so the order in which tags are processed does not matter and the result
//! renders exactly like the unrealized state did.
//!
//! Tags with no visible candidates stay random and are reported; they never
//! abort the pass.

use crate::catalog::{Catalog, ItemId};
use crate::error::{FlipflopError, Result};
use crate::resolver;
use crate::state::{FieldId, PromptState};
use crate::tags::Tag;
use std::fmt;


/// A random tag that could not be realized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedTag {
    pub field_id: FieldId,
    pub index: usize,
    pub category: String,
    pub subcategory: Option<String>,
}

impl fmt::Display for UnresolvedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subcategory {
            Some(sub) => write!(
                f,
                "{}[{}]: no candidates in {}/{}",
                self.field_id, self.index, self.category, sub
            ),
            None => write!(
                f,
                "{}[{}]: no candidates in {}",
                self.field_id, self.index, self.category
            ),
        }
    }
}

/// What a realize pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RealizeReport {
    /// Number of tags replaced by snippet references.
    pub realized: usize,
    /// Tags left random because nothing matched.
    pub unresolved: Vec<UnresolvedTag>,
}

impl RealizeReport {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Turn leftover tags into an error, for callers that need a fully
    /// fixed state.
    pub fn require_complete(&self) -> Result<()> {
        if self.is_complete() {
            return Ok(());
        }
        let listed: Vec<String> = self.unresolved.iter().map(ToString::to_string).collect();
        Err(FlipflopError::Unresolved(format!(
            "{} tag(s) could not be realized: {}",
            self.unresolved.len(),
            listed.join("; ")
        )))
    }
}

/// Realize `state` in place.
pub fn realize_in_place(state: &mut PromptState, catalog: &Catalog) -> RealizeReport {
    let seed = state.seed;
    let filter = state.active_classifications.clone();
    let mut report = RealizeReport::default();

    for field in state.fields_mut() {
        for index in field.random_positions() {
            let tag = field.tags()[index].clone();
            match resolver::resolve_tag(catalog, &filter, seed, field.id(), index, &tag) {
                Ok(Some(item)) => {
                    tracing::debug!(field = %field.id(), index, item = %item.id, "realized tag");
                    // `index` came from random_positions on this same field.
                    if field.replace_at(index, Tag::snippet(item.id.clone())).is_ok() {
                        report.realized += 1;
                    }
                }
                Ok(None) => {}
                Err(_) => {
                    let (category, subcategory) = tag.random_scope().unwrap_or_default();
                    let unresolved = UnresolvedTag {
                        field_id: field.id().clone(),
                        index,
                        category: category.to_string(),
                        subcategory: subcategory.map(str::to_string),
                    };
                    tracing::warn!("could not realize {}", unresolved);
                    report.unresolved.push(unresolved);
                }
            }
        }
    }

    tracing::info!(
        realized = report.realized,
        unresolved = report.unresolved.len(),
        "realize finished"
    );
    report
}

/// Realize a copy of `state`, leaving the original untouched.
pub fn realize(state: &PromptState, catalog: &Catalog) -> (PromptState, RealizeReport) {
    let mut realized = state.clone();
    let report = realize_in_place(&mut realized, catalog);
    (realized, report)
}

/// Realize a single tag. Returns the item it was frozen to.
pub fn realize_tag(
    state: &mut PromptState,
    catalog: &Catalog,
    field_id: &FieldId,
    index: usize,
) -> Result<Option<ItemId>> {
    let tag = state
        .field(field_id)
        .and_then(|field| field.tags().get(index).cloned())
        .ok_or_else(|| FlipflopError::IndexOutOfRange {
            index,
            len: state.field(field_id).map_or(0, |field| field.len()),
        })?;

    let resolved = resolver::resolve_tag(
        catalog,
        &state.active_classifications,
        state.seed,
        field_id,
        index,
        &tag,
    )?;
    match resolved {
        Some(item) => {
            state
                .field_mut(field_id)
                .replace_at(index, Tag::snippet(item.id.clone()))?;
            Ok(Some(item.id.clone()))
        }
        None => Ok(None),
    }
}
