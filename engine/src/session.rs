//! The embedder-facing notebook session.
//!
//! A [`Session`] ties the store and the coordinator together: user-driven
//! operations dispatch synchronously, service-driven completions are
//! translated from stable cell ids back to current indices and dispatched
//! as they arrive. The whole session lives on one task; the UI calls
//! [`Session::drain_completions`] from its event loop.

use anyhow::Context as _;
use quill_providers::{NotebookService, ServiceConfig};
use quill_types::{Action, Notebook};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::coordinator::{Completion, Coordinator};
use crate::store::Store;

/// Fixed user-facing message for any run failure. The underlying error is
/// logged, never surfaced.
pub const RUN_FAILURE_MESSAGE: &str = "Error running the text.";

/// A user-driven operation that could not be carried out.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no cell at index {index}")]
    NoSuchCell { index: usize },
    /// At most one run may be in flight per cell; overlapping runs are
    /// refused here rather than left to UI disablement.
    #[error("cell at index {index} already has a run in flight")]
    RunInFlight { index: usize },
}

/// One notebook session: ephemeral, in-memory state plus the coordinator
/// driving its asynchronous service calls.
#[derive(Debug)]
pub struct Session {
    store: Store,
    coordinator: Coordinator,
    completions: mpsc::UnboundedReceiver<Completion>,
}

impl Session {
    #[must_use]
    pub fn new(service: NotebookService) -> Self {
        let (coordinator, completions) = Coordinator::new(service);
        Self {
            store: Store::new(),
            coordinator,
            completions,
        }
    }

    /// Build a session from deployment configuration.
    pub fn connect(config: &ServiceConfig) -> anyhow::Result<Self> {
        let service = NotebookService::new(config)
            .context("failed to build notebook service client")?;
        Ok(Self::new(service))
    }

    #[must_use]
    pub fn state(&self) -> &Notebook {
        self.store.state()
    }

    // ------------------------------------------------------------------
    // User-driven operations
    // ------------------------------------------------------------------

    /// Append a fresh empty cell; it becomes the selection.
    pub fn add_cell(&mut self) {
        self.store.dispatch(Action::AddCell);
    }

    /// Remove the cell at `index`.
    ///
    /// Deleting a cell with a run in flight is allowed; the call is not
    /// cancelled, its eventual completion is simply dropped because the
    /// id no longer resolves.
    pub fn delete_cell(&mut self, index: usize) -> Result<(), SessionError> {
        if self.store.state().cell(index).is_none() {
            return Err(SessionError::NoSuchCell { index });
        }
        self.store.dispatch(Action::DeleteCell { index });
        Ok(())
    }

    /// Set or clear the selection.
    pub fn select(&mut self, index: Option<usize>) {
        self.store.dispatch(Action::SetSelected { index });
    }

    /// Replace the text of the cell at `index` and request a fresh word
    /// count.
    ///
    /// The edit is committed immediately, carrying the previous count (so
    /// a failed count request never loses text); the refreshed count
    /// arrives later as a second update, last-write-wins.
    pub fn edit_text(&mut self, index: usize, text: String) -> Result<(), SessionError> {
        let cell = self
            .store
            .state()
            .cell(index)
            .ok_or(SessionError::NoSuchCell { index })?;
        let id = cell.id();
        let stale_count = cell.word_count();

        self.store.dispatch(Action::UpdateText {
            index,
            text: text.clone(),
            word_count: stale_count,
        });
        self.coordinator.spawn_word_count(id, text);
        Ok(())
    }

    /// Start a run for the cell at `index`.
    ///
    /// `RunStart` is dispatched synchronously before the call is issued;
    /// exactly one completion (success or the fixed failure message) will
    /// eventually be applied - unless the cell is deleted first.
    pub fn run_cell(&mut self, index: usize) -> Result<(), SessionError> {
        let cell = self
            .store
            .state()
            .cell(index)
            .ok_or(SessionError::NoSuchCell { index })?;
        if cell.is_running() {
            return Err(SessionError::RunInFlight { index });
        }
        let id = cell.id();
        let text = cell.text().to_string();

        self.store.dispatch(Action::RunStart { index });
        self.coordinator.spawn_run(id, text);
        Ok(())
    }

    /// Run the selected cell.
    ///
    /// Returns `Ok(false)` without issuing anything when nothing is
    /// selected or the selected cell's text is blank.
    pub fn run_selected(&mut self) -> Result<bool, SessionError> {
        let Some(index) = self.store.state().selected() else {
            return Ok(false);
        };
        let blank = self
            .store
            .state()
            .cell(index)
            .is_none_or(|cell| cell.text().trim().is_empty());
        if blank {
            return Ok(false);
        }
        self.run_cell(index)?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Service-driven completions
    // ------------------------------------------------------------------

    /// Apply every completion that has already arrived, without blocking.
    /// Returns how many were applied to the state.
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions.try_recv() {
            if self.apply_completion(completion) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next completion and apply it. Returns whether it was
    /// applied to the state (stale and failed word-count completions are
    /// consumed without a dispatch).
    pub async fn apply_next_completion(&mut self) -> bool {
        match self.completions.recv().await {
            Some(completion) => self.apply_completion(completion),
            // Unreachable in practice: the coordinator keeps a sender alive
            // for the lifetime of the session.
            None => false,
        }
    }

    fn apply_completion(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::WordCount { id, text, outcome } => match outcome {
                Ok(word_count) => {
                    let Some(index) = self.store.state().index_of(id) else {
                        tracing::debug!(%id, "dropping word count for a removed cell");
                        return false;
                    };
                    self.store.dispatch(Action::UpdateText {
                        index,
                        text,
                        word_count,
                    });
                    true
                }
                Err(error) => {
                    // Non-fatal: the stale count stays on screen.
                    tracing::warn!(%id, %error, "word count request failed");
                    false
                }
            },
            Completion::Run { id, outcome } => {
                let Some(index) = self.store.state().index_of(id) else {
                    tracing::debug!(%id, "dropping run outcome for a removed cell");
                    return false;
                };
                match outcome {
                    Ok(result) => {
                        self.store.dispatch(Action::RunSuccess { index, result });
                    }
                    Err(error) => {
                        tracing::debug!(%id, %error, "run request failed");
                        self.store.dispatch(Action::RunFailure {
                            index,
                            error: RUN_FAILURE_MESSAGE.to_string(),
                        });
                    }
                }
                true
            }
        }
    }
}
