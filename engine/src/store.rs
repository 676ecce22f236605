//! Serialized ownership of the notebook state.

use std::mem;

use quill_types::{Action, Notebook, transition};

/// Exclusive owner of the [`Notebook`].
///
/// All mutation flows through [`Store::dispatch`], which applies the pure
/// reducer. The store lives on a single task; because every dispatch is
/// serialized through `&mut self`, no locking is needed anywhere.
#[derive(Debug, Default)]
pub struct Store {
    state: Notebook,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &Notebook {
        &self.state
    }

    /// Apply one action to the current state.
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(?action, "dispatch");
        self.state = transition(mem::take(&mut self.state), action);
    }
}
