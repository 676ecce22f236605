//! The pure state-transition function over the notebook action set.

use crate::{Cell, CellId, Notebook, RunState};

/// Everything that can happen to a [`Notebook`].
///
/// Structural and user actions address cells by index (the caller sees the
/// list in display order); run and word-count completions reach the store
/// through the same actions after the engine resolves the originating
/// cell's id back to a current index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a fresh empty cell and select it.
    AddCell,
    /// Remove the cell at `index`.
    DeleteCell { index: usize },
    /// Replace text and word count; run state is untouched.
    UpdateText {
        index: usize,
        text: String,
        word_count: u32,
    },
    /// Set the selection. `Some(i)` with `i` out of range is normalized
    /// to `None`.
    SetSelected { index: Option<usize> },
    /// A run was issued for the cell at `index`.
    RunStart { index: usize },
    /// The run for the cell at `index` completed.
    RunSuccess { index: usize, result: String },
    /// The run for the cell at `index` failed.
    RunFailure { index: usize, error: String },
}

/// Compute the successor state for one action.
///
/// Total and pure: never panics, performs no IO, and equal inputs always
/// produce equal outputs. Index-addressed actions with an out-of-range
/// index leave the state unchanged (uniform no-op policy).
#[must_use]
pub fn transition(mut state: Notebook, action: Action) -> Notebook {
    match action {
        Action::AddCell => {
            let id = CellId::new(state.next_id);
            state.next_id += 1;
            state.cells.push(Cell::new(id));
            state.selected = Some(state.cells.len() - 1);
        }
        Action::DeleteCell { index } => {
            if index < state.cells.len() {
                state.cells.remove(index);
                // Selection survives only if it addressed a different cell
                // and still lands on one after the removal.
                state.selected = state
                    .selected
                    .filter(|&s| s != index && s < state.cells.len());
            }
        }
        Action::UpdateText {
            index,
            text,
            word_count,
        } => {
            if let Some(cell) = state.cells.get_mut(index) {
                cell.text = text;
                cell.word_count = word_count;
            }
        }
        Action::SetSelected { index } => {
            state.selected = index.filter(|&i| i < state.cells.len());
        }
        Action::RunStart { index } => {
            if let Some(cell) = state.cells.get_mut(index) {
                cell.run = RunState::Running;
            }
        }
        Action::RunSuccess { index, result } => {
            if let Some(cell) = state.cells.get_mut(index) {
                cell.run = RunState::Succeeded(result);
            }
        }
        Action::RunFailure { index, error } => {
            if let Some(cell) = state.cells.get_mut(index) {
                cell.run = RunState::Failed(error);
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notebook_with_cells(count: usize) -> Notebook {
        (0..count).fold(Notebook::new(), |state, _| transition(state, Action::AddCell))
    }

    fn update(index: usize, text: &str, word_count: u32) -> Action {
        Action::UpdateText {
            index,
            text: text.to_string(),
            word_count,
        }
    }

    // ========================================================================
    // AddCell
    // ========================================================================

    #[test]
    fn add_cell_appends_empty_cell_and_selects_it() {
        let state = transition(Notebook::new(), Action::AddCell);
        assert_eq!(state.len(), 1);
        assert_eq!(state.selected(), Some(0));

        let cell = state.cell(0).unwrap();
        assert_eq!(cell.text(), "");
        assert_eq!(cell.word_count(), 0);
        assert!(!cell.is_running());
        assert_eq!(cell.output(), "");

        let state = transition(state, Action::AddCell);
        assert_eq!(state.len(), 2);
        assert_eq!(state.selected(), Some(1));
    }

    #[test]
    fn add_cell_assigns_unique_ids_across_delete_churn() {
        let state = notebook_with_cells(2);
        let surviving = state.cell(1).unwrap().id();

        let state = transition(state, Action::DeleteCell { index: 0 });
        let state = transition(state, Action::AddCell);

        let ids: Vec<_> = state.cells().iter().map(Cell::id).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&surviving));
        assert_ne!(ids[0], ids[1]);
    }

    // ========================================================================
    // DeleteCell
    // ========================================================================

    #[test]
    fn delete_cell_removes_exactly_one() {
        let state = notebook_with_cells(3);
        let kept_first = state.cell(0).unwrap().id();
        let kept_last = state.cell(2).unwrap().id();

        let state = transition(state, Action::DeleteCell { index: 1 });
        assert_eq!(state.len(), 2);
        assert_eq!(state.cell(0).unwrap().id(), kept_first);
        assert_eq!(state.cell(1).unwrap().id(), kept_last);
    }

    #[test]
    fn delete_selected_cell_clears_selection() {
        let state = notebook_with_cells(3);
        let state = transition(state, Action::SetSelected { index: Some(1) });
        let state = transition(state, Action::DeleteCell { index: 1 });
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn delete_later_cell_keeps_selection_numerically_unshifted() {
        let state = notebook_with_cells(3);
        let state = transition(state, Action::SetSelected { index: Some(0) });
        let selected_id = state.cell(0).unwrap().id();

        let state = transition(state, Action::DeleteCell { index: 2 });
        assert_eq!(state.selected(), Some(0));
        assert_eq!(state.selected_cell().unwrap().id(), selected_id);
    }

    #[test]
    fn delete_first_of_two_with_second_selected_clears_selection() {
        // Without id-based selection, index 1 no longer addresses the same
        // semantic cell once the list shrinks; the selection is dropped.
        let state = notebook_with_cells(2);
        let state = transition(state, Action::SetSelected { index: Some(1) });

        let state = transition(state, Action::DeleteCell { index: 0 });
        assert_eq!(state.len(), 1);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn delete_out_of_range_is_a_noop() {
        let state = notebook_with_cells(2);
        let before = state.clone();
        let state = transition(state, Action::DeleteCell { index: 5 });
        assert_eq!(state, before);
    }

    // ========================================================================
    // UpdateText
    // ========================================================================

    #[test]
    fn update_text_replaces_text_and_count_only() {
        let state = notebook_with_cells(1);
        let state = transition(
            state,
            Action::RunSuccess {
                index: 0,
                result: "42".to_string(),
            },
        );
        let state = transition(state, update(0, "hello world", 2));

        let cell = state.cell(0).unwrap();
        assert_eq!(cell.text(), "hello world");
        assert_eq!(cell.word_count(), 2);
        assert_eq!(cell.output(), "42", "run state must be untouched");
    }

    #[test]
    fn update_text_is_idempotent() {
        let once = transition(notebook_with_cells(1), update(0, "hello world", 2));
        let twice = transition(once.clone(), update(0, "hello world", 2));
        assert_eq!(once, twice);
    }

    #[test]
    fn update_text_out_of_range_is_a_noop() {
        let state = notebook_with_cells(1);
        let before = state.clone();
        let state = transition(state, update(3, "ignored", 1));
        assert_eq!(state, before);
    }

    // ========================================================================
    // SetSelected
    // ========================================================================

    #[test]
    fn set_selected_accepts_valid_index_and_none() {
        let state = notebook_with_cells(2);
        let state = transition(state, Action::SetSelected { index: Some(0) });
        assert_eq!(state.selected(), Some(0));

        let state = transition(state, Action::SetSelected { index: None });
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn set_selected_normalizes_out_of_range_to_none() {
        let state = notebook_with_cells(2);
        let state = transition(state, Action::SetSelected { index: Some(9) });
        assert_eq!(state.selected(), None);
    }

    // ========================================================================
    // Run lifecycle
    // ========================================================================

    #[test]
    fn run_start_marks_cell_running() {
        let state = transition(notebook_with_cells(2), Action::RunStart { index: 1 });
        assert!(state.cell(1).unwrap().is_running());
        assert!(!state.cell(0).unwrap().is_running());
    }

    #[test]
    fn run_start_supersedes_previous_output() {
        let state = transition(
            notebook_with_cells(1),
            Action::RunSuccess {
                index: 0,
                result: "old".to_string(),
            },
        );
        let state = transition(state, Action::RunStart { index: 0 });
        assert_eq!(state.cell(0).unwrap().output(), "");
    }

    #[test]
    fn run_success_clears_running_and_records_result() {
        let state = transition(notebook_with_cells(1), Action::RunStart { index: 0 });
        let state = transition(
            state,
            Action::RunSuccess {
                index: 0,
                result: "42".to_string(),
            },
        );

        let cell = state.cell(0).unwrap();
        assert!(!cell.is_running());
        assert_eq!(cell.output(), "42");
        assert_eq!(cell.run_state(), &RunState::Succeeded("42".to_string()));
    }

    #[test]
    fn run_failure_clears_running_and_records_message() {
        let state = transition(notebook_with_cells(1), Action::RunStart { index: 0 });
        let state = transition(
            state,
            Action::RunFailure {
                index: 0,
                error: "Error running the text.".to_string(),
            },
        );

        let cell = state.cell(0).unwrap();
        assert!(!cell.is_running());
        assert_eq!(cell.output(), "Error running the text.");
    }

    #[test]
    fn run_actions_out_of_range_are_noops() {
        let state = notebook_with_cells(1);
        let before = state.clone();

        let state = transition(state, Action::RunStart { index: 7 });
        let state = transition(
            state,
            Action::RunSuccess {
                index: 7,
                result: "x".to_string(),
            },
        );
        let state = transition(
            state,
            Action::RunFailure {
                index: 7,
                error: "x".to_string(),
            },
        );
        assert_eq!(state, before);
    }

    // ========================================================================
    // Whole-notebook scenarios
    // ========================================================================

    #[test]
    fn transition_is_referentially_pure() {
        let state = transition(notebook_with_cells(3), update(1, "same input", 2));
        let action = Action::DeleteCell { index: 0 };

        let left = transition(state.clone(), action.clone());
        let right = transition(state, action);
        assert_eq!(left, right);
    }

    #[test]
    fn edit_then_run_scenario() {
        let state = transition(Notebook::new(), Action::AddCell);
        assert_eq!(state.len(), 1);
        assert_eq!(state.selected(), Some(0));

        let state = transition(state, update(0, "hello world", 2));
        let cell = state.cell(0).unwrap();
        assert_eq!(cell.text(), "hello world");
        assert_eq!(cell.word_count(), 2);

        let state = transition(state, Action::RunStart { index: 0 });
        assert!(state.cell(0).unwrap().is_running());

        let state = transition(
            state,
            Action::RunSuccess {
                index: 0,
                result: "42".to_string(),
            },
        );
        let cell = state.cell(0).unwrap();
        assert!(!cell.is_running());
        assert_eq!(cell.output(), "42");
    }

    #[test]
    fn index_of_tracks_cells_through_deletion() {
        let state = notebook_with_cells(3);
        let id = state.cell(2).unwrap().id();

        let state = transition(state, Action::DeleteCell { index: 0 });
        assert_eq!(state.index_of(id), Some(1));

        let state = transition(state, Action::DeleteCell { index: 1 });
        assert_eq!(state.index_of(id), None);
    }
}
