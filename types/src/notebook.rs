use crate::{Cell, CellId};

/// The aggregate notebook state: an ordered cell list plus an optional
/// selection.
///
/// Invariants maintained by the reducer:
/// - `selected`, when present, addresses an existing cell.
/// - `next_id` exceeds every id ever handed out, so ids are unique for the
///   lifetime of the state value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notebook {
    pub(crate) cells: Vec<Cell>,
    pub(crate) selected: Option<usize>,
    pub(crate) next_id: u64,
}

impl Notebook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected_cell(&self) -> Option<&Cell> {
        self.selected.and_then(|index| self.cells.get(index))
    }

    /// Current index of the cell with the given id, if it still exists.
    ///
    /// This is the apply-time half of id-based correlation: async work
    /// captures a `CellId` at request time and resolves it here when the
    /// completion arrives.
    #[must_use]
    pub fn index_of(&self, id: CellId) -> Option<usize> {
        self.cells.iter().position(|cell| cell.id == id)
    }
}
