//! Core domain types for Quill.
//!
//! This crate contains the notebook's pure state model and its reducer:
//! no IO, no async, and minimal dependencies. Everything here can be used
//! from any layer of the application.
//!
//! The central piece is [`transition`], a total, side-effect-free function
//! from `(Notebook, Action)` to the successor `Notebook`. Whoever owns the
//! state serializes dispatch through it; concurrency concerns live
//! entirely in the engine crate.

mod cell;
mod ids;
mod notebook;
mod reducer;

pub use cell::{Cell, RunState};
pub use ids::CellId;
pub use notebook::Notebook;
pub use reducer::{Action, transition};
