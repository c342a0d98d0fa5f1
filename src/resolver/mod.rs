//! Seeded resolver.
//!
//! Maps `(seed, field, tag position, candidate list)` to one candidate. The
//! position is the tag's index inside its field at resolution time, so
//! moving a tag may change what it resolves to; realizing it freezes the
//! choice.
//!
//! The field id is hashed with SHA-256 rather than `std`'s hasher, whose
//! output is not stable across releases. The index is drawn from a
//! `StdRng` seeded with the combined key.

use crate::catalog::{Catalog, ClassificationFilter, SnippetItem};
use crate::error::{FlipflopError, Result};
use crate::state::FieldId;
use crate::tags::Tag;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use sha2::{Digest, Sha256};


const INDEX_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Stable 64-bit hash of a field id.
pub fn field_hash(field_id: &FieldId) -> u64 {
    let digest = Sha256::digest(field_id.as_str().as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Combine seed, field, and position into the generator key.
pub fn derive_key(seed: u64, field_id: &FieldId, tag_index: usize) -> u64 {
    seed ^ field_hash(field_id).rotate_left(17) ^ (tag_index as u64 + 1).wrapping_mul(INDEX_MIX)
}

/// Pick one of `candidates` deterministically.
///
/// `category`/`subcategory` only label the error when `candidates` is empty.
pub fn resolve<'a>(
    seed: u64,
    field_id: &FieldId,
    tag_index: usize,
    category: &str,
    subcategory: Option<&str>,
    candidates: &[&'a SnippetItem],
) -> Result<&'a SnippetItem> {
    if candidates.is_empty() {
        return Err(FlipflopError::EmptyCandidateSet {
            category: category.to_string(),
            subcategory: subcategory.map(str::to_string),
        });
    }

    let mut rng = StdRng::seed_from_u64(derive_key(seed, field_id, tag_index));
    let index = (rng.next_u64() % candidates.len() as u64) as usize;
    Ok(candidates[index])
}

/// Resolve the random tag at `tag_index` against `catalog`.
///
/// Returns `Ok(None)` for non-random tags. Used by both preview rendering
/// and realize so they always agree.
pub fn resolve_tag<'a>(
    catalog: &'a Catalog,
    filter: &ClassificationFilter,
    seed: u64,
    field_id: &FieldId,
    tag_index: usize,
    tag: &Tag,
) -> Result<Option<&'a SnippetItem>> {
    let Some((category, subcategory)) = tag.random_scope() else {
        return Ok(None);
    };
    let candidates = catalog.items_for(category, subcategory, filter);
    resolve(seed, field_id, tag_index, category, subcategory, &candidates).map(Some)
}
