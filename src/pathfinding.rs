//! Depth-first backtracking search and frame pacing.
//!
//! This module contains the search engine that walks a maze from its start cell until it enters
//! an exit, together with the pacing used to slow the animation down to a watchable speed.

use std::{collections::HashMap, thread, time::Duration};

use color_eyre::eyre::Result;
use tracing::{debug, info, trace};

use crate::{
    file_loader::Maze,
    map::Grid,
    types::{Outcome, Position},
    ui::Renderer,
};

/// Default delay between animation frames in milliseconds.
///
/// This constant controls the timing between frames of the search visualization. A lower value
/// results in faster animation, while a higher value makes it easier to follow the search.
pub const DEFAULT_STEP_DELAY_MS: u64 = 50;

/// Delay mechanism invoked once per visited cell.
///
/// Pacing has no effect on the search itself, it only spaces out the rendered frames.
pub trait Pacer {
    /// Blocks until the next frame is due.
    fn pause(&mut self);
}

/// Pacer that sleeps the current thread for a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SleepPacer {
    /// Time slept between frames.
    delay: Duration,
}

impl SleepPacer {
    /// Creates a pacer sleeping `delay` between frames.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Returns the configured delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SleepPacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_STEP_DELAY_MS))
    }
}

impl Pacer for SleepPacer {
    fn pause(&mut self) {
        thread::sleep(self.delay);
    }
}

/// Pacer that never waits, for tests and non-interactive output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoPacer;

impl Pacer for NoPacer {
    fn pause(&mut self) {}
}

/// Result of advancing the search by one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The search stood on this cell, marked it visited and pushed its open neighbours.
    Entered(Position),
    /// The search stepped onto this exit cell. Terminal.
    Found(Position),
    /// The frontier ran dry before an exit was entered. Terminal.
    Exhausted,
}

/// Internal state machine of a search run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Standing on a cell, about to act on it.
    Exploring(Position),
    /// An exit was entered.
    Found(Position),
    /// Nothing is left to explore.
    Exhausted,
}

/// A frontier entry: a cell waiting to be entered, and the cell that discovered it.
#[derive(Clone, Copy, Debug)]
struct Pending {
    /// Cell to enter.
    pos: Position,
    /// Neighbour that pushed this entry.
    parent: Position,
}

/// Context of a single search run.
///
/// The search owns the grid it walks and marks every entered cell as visited, so a run is
/// consumed by walking it once. Backtracking is driven by an explicit stack rather than by
/// recursion, which keeps deep mazes from exhausting the call stack while entering cells in
/// exactly the same order: the most recently discovered neighbour is always explored first.
#[derive(Clone, Debug)]
pub struct Search {
    /// The maze being walked. Entered cells are overwritten with the visited marker.
    grid: Grid,
    /// Where the run began.
    start: Position,
    /// Current state of the run.
    state: State,
    /// Cells discovered but not yet entered, last in first out.
    frontier: Vec<Pending>,
    /// For every entered cell other than the start, the neighbour it was reached from.
    parents: HashMap<Position, Position>,
    /// Entered cells in the order they were entered.
    visited: Vec<Position>,
}

impl Search {
    /// Prepares a run over `grid` beginning at `start`.
    ///
    /// A start position outside the grid yields a run that is exhausted from the outset.
    #[must_use]
    pub fn new(grid: Grid, start: Position) -> Self {
        let state = if grid.contains(start) {
            State::Exploring(start)
        } else {
            State::Exhausted
        };

        Self {
            grid,
            start,
            state,
            frontier: Vec::new(),
            parents: HashMap::new(),
            visited: Vec::new(),
        }
    }

    /// Prepares a run over a loaded maze.
    #[must_use]
    pub fn from_maze(maze: Maze) -> Self {
        Self::new(maze.grid, maze.start)
    }

    /// Advances the search by one cell.
    ///
    /// Standing on an exit ends the run. Any other cell is marked visited before its neighbours
    /// are pushed in down, up, right, left order, and the next valid frontier entry becomes the
    /// current cell. Once the run is terminal, further calls keep returning the same transition.
    pub fn step(&mut self) -> Transition {
        match self.state {
            State::Found(exit) => Transition::Found(exit),
            State::Exhausted => Transition::Exhausted,
            State::Exploring(pos) if self.grid.is_exit(pos) => {
                self.state = State::Found(pos);
                Transition::Found(pos)
            }
            State::Exploring(pos) => {
                self.grid.mark_visited(pos);
                self.visited.push(pos);

                for neighbor in pos.neighbors() {
                    if self.grid.is_valid(neighbor) {
                        self.frontier.push(Pending {
                            pos: neighbor,
                            parent: pos,
                        });
                    }
                }

                self.state = self.next_state();
                Transition::Entered(pos)
            }
        }
    }

    /// Pops frontier entries until one can still be entered.
    ///
    /// A cell discovered by two neighbours sits on the frontier twice; the copy popped after the
    /// cell was entered is stale and gets dropped here.
    fn next_state(&mut self) -> State {
        while let Some(Pending { pos, parent }) = self.frontier.pop() {
            if self.grid.is_valid(pos) {
                let _ = self.parents.insert(pos, parent);
                return State::Exploring(pos);
            }

            trace!(%pos, "dropping stale frontier entry");
        }

        State::Exhausted
    }

    /// Runs the search to completion while rendering every step.
    ///
    /// The renderer sees the grid once with the start highlighted, once after each entered cell
    /// with that cell highlighted, and once more at the end with no highlight. The pacer is
    /// invoked after every entered cell.
    ///
    /// # Errors
    ///
    /// This function only fails when the renderer does. The search itself cannot fail.
    pub fn run<R, P>(&mut self, renderer: &mut R, pacer: &mut P) -> Result<Outcome>
    where
        R: Renderer + ?Sized,
        P: Pacer + ?Sized,
    {
        renderer.render(&self.grid, Some(self.start))?;

        let outcome = loop {
            match self.step() {
                Transition::Entered(pos) => {
                    debug!(%pos, visited = self.visited.len(), "entered cell");
                    renderer.render(&self.grid, Some(pos))?;
                    pacer.pause();
                }
                Transition::Found(exit) => break Outcome::Found { exit },
                Transition::Exhausted => break Outcome::Exhausted,
            }
        };

        renderer.render(&self.grid, None)?;
        info!(?outcome, visited = self.visited.len(), "search finished");

        Ok(outcome)
    }

    /// Returns the outcome once the run is terminal.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        match self.state {
            State::Exploring(_) => None,
            State::Found(exit) => Some(Outcome::Found { exit }),
            State::Exhausted => Some(Outcome::Exhausted),
        }
    }

    /// Returns the grid in its current state.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Consumes the run and returns its grid.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Returns the start position of the run.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Returns the cells entered so far, in order.
    #[must_use]
    pub fn visited(&self) -> &[Position] {
        &self.visited
    }

    /// Reconstructs the path from the start to the exit that ended the run.
    ///
    /// Each step of the path is adjacent to the previous one. Returns `None` unless an exit was
    /// found.
    #[must_use]
    pub fn path(&self) -> Option<Vec<Position>> {
        let State::Found(exit) = self.state else {
            return None;
        };

        let mut path = vec![exit];
        let mut current = exit;
        while current != self.start {
            current = *self.parents.get(&current)?;
            path.push(current);
        }
        path.reverse();

        Some(path)
    }
}
