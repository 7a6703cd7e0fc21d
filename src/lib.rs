//! This crate solves single-entrance mazes by depth-first backtracking search and renders the
//! search frontier to the terminal as it proceeds.
//!
//! A maze is loaded with [`load`] or [`parse`], walked by a [`Search`] and drawn through any
//! [`Renderer`]. The [`App`] type wires these together for the command-line binary.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod cli;
mod events;
mod file_loader;
mod map;
mod pathfinding;
mod types;
mod ui;

pub use app::App;
pub use cli::{Cli, DisplayMode, Settings};
pub use file_loader::{load, parse, LoadError, Maze};
pub use map::Grid;
pub use pathfinding::{NoPacer, Pacer, Search, SleepPacer, Transition, DEFAULT_STEP_DELAY_MS};
pub use types::{Cell, Outcome, Position};
pub use ui::{frame_text, NullRenderer, Renderer, TextRenderer, TuiRenderer};
