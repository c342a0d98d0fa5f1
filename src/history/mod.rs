//! Session-only history of generated prompts.
//!
//! Entries are kept most recent first and capped at a fixed capacity.
//! A cursor walks them: position 0 is the live state (no entry selected),
//! positions `1..=len` are entries, 1 being the newest.

use crate::config::Config;
use crate::state::PromptState;
use chrono::{DateTime, Utc};

#[cfg(test)]
mod tests;

/// One generated prompt and the state that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub state: PromptState,
    pub final_prompt: String,
    /// Preview text at the time of generation.
    pub summary: String,
}

#[derive(Debug, Clone)]
pub struct History {
    capacity: usize,
    entries: Vec<HistoryEntry>,
    /// Index into `entries`; `None` while on the live state.
    cursor: Option<usize>,
}

impl History {
    /// A zero capacity is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Vec::new(),
            cursor: None,
        }
    }

    /// Capacity taken from `history_size`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.history_size)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Record a generated prompt stamped with now.
    pub fn push(&mut self, state: PromptState, final_prompt: impl Into<String>, summary: impl Into<String>) {
        self.push_entry(HistoryEntry {
            timestamp: Utc::now(),
            state,
            final_prompt: final_prompt.into(),
            summary: summary.into(),
        });
    }

    /// Insert `entry` as the newest, drop the oldest past capacity and
    /// return the cursor to the live state.
    pub fn push_entry(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        if self.entries.len() > self.capacity {
            let dropped = self.entries.len() - self.capacity;
            self.entries.truncate(self.capacity);
            tracing::debug!(dropped, "history over capacity");
        }
        self.cursor = None;
    }

    /// The selected entry, or `None` on the live state.
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.cursor.and_then(|index| self.entries.get(index))
    }

    /// Step toward newer entries and finally the live state.
    pub fn navigate_back(&mut self) -> bool {
        match self.cursor {
            None => false,
            Some(0) => {
                self.cursor = None;
                true
            }
            Some(index) => {
                self.cursor = Some(index - 1);
                true
            }
        }
    }

    /// Step toward older entries.
    pub fn navigate_forward(&mut self) -> bool {
        let next = match self.cursor {
            None => 0,
            Some(index) => index + 1,
        };
        if next < self.entries.len() {
            self.cursor = Some(next);
            true
        } else {
            false
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_go_forward(&self) -> bool {
        let next = self.cursor.map_or(0, |index| index + 1);
        next < self.entries.len()
    }

    /// Select a position: 0 is the live state, `1..=len` an entry.
    pub fn jump_to(&mut self, position: usize) -> bool {
        match position {
            0 => {
                self.cursor = None;
                true
            }
            p if p <= self.entries.len() => {
                self.cursor = Some(p - 1);
                true
            }
            _ => false,
        }
    }

    /// Remove the selected entry. The cursor stays at the same position,
    /// clamped to the oldest remaining entry.
    pub fn delete_current(&mut self) -> Option<HistoryEntry> {
        let index = self.cursor.filter(|&index| index < self.entries.len())?;
        let removed = self.entries.remove(index);
        self.cursor = if self.entries.is_empty() {
            None
        } else {
            Some(index.min(self.entries.len() - 1))
        };
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// `(position, len)` with position 0 meaning the live state.
    pub fn position(&self) -> (usize, usize) {
        (self.cursor.map_or(0, |index| index + 1), self.entries.len())
    }
}
