use crate::CellId;

/// Per-cell execution state.
///
/// This is the explicit form of the implicit `isLoading`/`runResult` pair:
/// a cell is `Running` exactly while one run is in flight, and the last
/// completed run is either `Succeeded` or `Failed`. Entering `Running`
/// supersedes any previous output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunState {
    /// No run has completed and none is in flight.
    #[default]
    Idle,
    /// A run is outstanding; exited by exactly one completion.
    Running,
    Succeeded(String),
    Failed(String),
}

impl RunState {
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// The last run's output or failure message, `""` until a run completes.
    #[must_use]
    pub fn output(&self) -> &str {
        match self {
            RunState::Succeeded(text) | RunState::Failed(text) => text,
            RunState::Idle | RunState::Running => "",
        }
    }
}

/// One editable, independently executable text unit in the notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub(crate) id: CellId,
    pub(crate) text: String,
    pub(crate) word_count: u32,
    pub(crate) run: RunState,
}

impl Cell {
    /// Cells are created empty; only the reducer constructs them.
    pub(crate) fn new(id: CellId) -> Self {
        Self {
            id,
            text: String::new(),
            word_count: 0,
            run: RunState::Idle,
        }
    }

    #[must_use]
    pub fn id(&self) -> CellId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Last word count computed for this cell; may lag behind `text` while
    /// a count request is outstanding.
    #[must_use]
    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    #[must_use]
    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_running()
    }

    /// Last run output or failure message, `""` until a run completes.
    #[must_use]
    pub fn output(&self) -> &str {
        self.run.output()
    }
}
