//! The live prompt state and its exclusive mutation discipline.
//!
//! A [`Session`] owns the one `PromptState` the UI edits. Reads take a
//! shared lock and mutations (edits, realize, template load) take the
//! exclusive one, so a render never observes a half-applied change.
//! Template blobs are parsed and migrated before the lock is taken and
//! swapped in only when that succeeds.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::realize::{self, RealizeReport};
use crate::state::PromptState;
use crate::template::{self, Template};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};


#[derive(Debug)]
pub struct Session {
    state: RwLock<PromptState>,
}

impl Session {
    pub fn new(state: PromptState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    // `mutate` only ever stores a state its closure finished with, so a
    // poisoned lock still holds a whole state.
    fn read_guard(&self) -> RwLockReadGuard<'_, PromptState> {
        self.state.read().unwrap_or_else(|poison| poison.into_inner())
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, PromptState> {
        self.state.write().unwrap_or_else(|poison| poison.into_inner())
    }

    /// A consistent copy of the current state.
    pub fn snapshot(&self) -> PromptState {
        self.read_guard().clone()
    }

    /// Run `f` against the state under the shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&PromptState) -> R) -> R {
        f(&*self.read_guard())
    }

    /// Run `f` against a copy of the state under the exclusive lock.
    ///
    /// The copy replaces the live state once `f` returns. If `f` panics the
    /// live state keeps its previous value.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut PromptState) -> R) -> R {
        let mut guard = self.write_guard();
        let mut draft = guard.clone();
        let out = f(&mut draft);
        *guard = draft;
        out
    }

    /// Realize the live state in place.
    pub fn realize(&self, catalog: &Catalog) -> RealizeReport {
        self.mutate(|state| realize::realize_in_place(state, catalog))
    }

    /// Replace the live state with the one stored in `blob`.
    ///
    /// On error the live state is left exactly as it was.
    pub fn load_template(&self, blob: &str) -> Result<()> {
        let loaded = template::deserialize(blob)?;
        *self.write_guard() = loaded;
        tracing::debug!("template loaded into session");
        Ok(())
    }

    /// Current state as a template.
    pub fn save_template(&self) -> Template {
        self.read(template::serialize)
    }

    /// Drop the live state and start over from `state`.
    pub fn reset(&self, state: PromptState) -> PromptState {
        std::mem::replace(&mut *self.write_guard(), state)
    }

    pub fn into_state(self) -> PromptState {
        self.state
            .into_inner()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}
