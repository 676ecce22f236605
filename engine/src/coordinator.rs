//! Asynchronous request plumbing between the store and the services.
//!
//! The coordinator never touches state. It spawns one task per request;
//! each task performs the HTTP call and sends exactly one [`Completion`]
//! back over the channel, keyed by the originating cell's stable id.
//! Translating that id to a current index - or dropping the completion if
//! the cell is gone - happens at apply time in the session.

use quill_providers::{NotebookService, ServiceError};
use quill_types::CellId;
use tokio::sync::mpsc;

/// Outcome of one in-flight request, correlated by stable cell id.
#[derive(Debug)]
pub enum Completion {
    /// A word-count request finished. `text` is the text that was counted,
    /// re-sent so the resulting update is self-contained.
    WordCount {
        id: CellId,
        text: String,
        outcome: Result<u32, ServiceError>,
    },
    /// A run finished, one way or the other.
    Run {
        id: CellId,
        outcome: Result<String, ServiceError>,
    },
}

/// Issues service calls and reports their outcomes as [`Completion`]s.
#[derive(Debug, Clone)]
pub struct Coordinator {
    service: NotebookService,
    completions: mpsc::UnboundedSender<Completion>,
}

impl Coordinator {
    #[must_use]
    pub fn new(service: NotebookService) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (completions, receiver) = mpsc::unbounded_channel();
        (
            Self {
                service,
                completions,
            },
            receiver,
        )
    }

    /// Fire-and-forget word count for the cell with the given id.
    pub fn spawn_word_count(&self, id: CellId, text: String) {
        let service = self.service.clone();
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let outcome = service.word_count(&text).await;
            // Send failure means the session is gone; nothing to do.
            let _ = completions.send(Completion::WordCount { id, text, outcome });
        });
    }

    /// Issue a run for the cell with the given id. The caller has already
    /// dispatched `RunStart`; exactly one `Completion::Run` follows.
    pub fn spawn_run(&self, id: CellId, text: String) {
        let service = self.service.clone();
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let outcome = service.run(&text).await;
            let _ = completions.send(Completion::Run { id, outcome });
        });
    }
}
