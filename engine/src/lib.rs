//! Core engine for Quill - the notebook state machine and its execution
//! coordination, without any rendering dependencies.
//!
//! # Architecture
//!
//! ```text
//! UI events -> Session -> Action -> Store (pure reduction) -> new state
//!                  |                                              ^
//!                  v                                              |
//!            Coordinator -- HTTP --> services --> Completion -----+
//! ```
//!
//! [`Store`] owns the [`Notebook`] and serializes all mutation through the
//! pure reducer. [`Coordinator`] issues the asynchronous word-count and
//! run calls and reports each outcome exactly once, keyed by the cell's
//! stable id. [`Session`] is the embedder-facing surface that wires the
//! two together and resolves ids back to indices when completions arrive.

mod coordinator;
mod session;
mod store;

pub use coordinator::{Completion, Coordinator};
pub use session::{RUN_FAILURE_MESSAGE, Session, SessionError};
pub use store::Store;

// Re-export the domain and service types embedders need.
pub use quill_providers::{NotebookService, ServiceConfig, ServiceError};
pub use quill_types::{Action, Cell, CellId, Notebook, RunState, transition};
