//! Type definitions for maze cells, grid coordinates and search outcomes.

use std::fmt;

/// Glyph of an open path cell in the maze text format.
pub(crate) const OPEN_SYMBOL: char = 'x';
/// Glyph of the unique start cell in the maze text format.
pub(crate) const START_SYMBOL: char = 'e';
/// Glyph of an exit cell in the maze text format.
pub(crate) const EXIT_SYMBOL: char = 's';
/// Glyph written over every cell the search has entered.
pub(crate) const VISITED_SYMBOL: char = '.';

/// Classification of a single maze cell.
///
/// Every cell holds exactly one of these symbols. Walls keep the glyph they were loaded with so
/// that renderers can draw the maze the way its author wrote it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// Impassable cell, drawn with the glyph it was loaded from.
    Wall(char),
    /// Passable cell that has not been entered yet.
    Open,
    /// The cell the search starts from.
    Start,
    /// A cell that ends the search once entered.
    Exit,
    /// A cell the search has already entered.
    ///
    /// Visited cells are impassable, which is what guarantees that the search terminates.
    Visited,
}

impl Cell {
    /// Decodes a glyph from the maze text format.
    ///
    /// Any glyph outside the reserved set is a wall.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Self {
        match symbol {
            OPEN_SYMBOL => Self::Open,
            START_SYMBOL => Self::Start,
            EXIT_SYMBOL => Self::Exit,
            VISITED_SYMBOL => Self::Visited,
            wall => Self::Wall(wall),
        }
    }

    /// Returns the glyph used to write this cell back out as text.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Wall(glyph) => glyph,
            Self::Open => OPEN_SYMBOL,
            Self::Start => START_SYMBOL,
            Self::Exit => EXIT_SYMBOL,
            Self::Visited => VISITED_SYMBOL,
        }
    }

    /// Whether the search may step onto this cell.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        matches!(self, Self::Open | Self::Exit)
    }
}

/// A 0-indexed `(row, col)` coordinate into a grid.
///
/// Positions are plain values. Whether one lies inside a given grid is the grid's concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Row index, counted from the top.
    pub row: usize,
    /// Column index, counted from the left.
    pub col: usize,
}

impl Position {
    /// Builds a position from a row and a column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the axis-aligned neighbours of this position.
    ///
    /// The order is down, up, right, left. The search pushes neighbours in this order and pops the
    /// last one first, so it shapes which branch gets explored first. Neighbours that would fall
    /// below row or column zero are skipped.
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        [
            self.row.checked_add(1).map(|row| Self::new(row, self.col)),
            self.row.checked_sub(1).map(|row| Self::new(row, self.col)),
            self.col.checked_add(1).map(|col| Self::new(self.row, col)),
            self.col.checked_sub(1).map(|col| Self::new(self.row, col)),
        ]
        .into_iter()
        .flatten()
    }

    /// Whether the two positions share an edge.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.row, self.col)
    }
}

/// Final result of a search run.
///
/// Neither variant is an error. An exhausted search is a definitive answer that the exit cannot
/// be reached from the start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// An exit cell was entered.
    Found {
        /// The exit that ended the search.
        exit: Position,
    },
    /// Every cell reachable from the start was visited without meeting an exit.
    Exhausted,
}

impl Outcome {
    /// Whether the search reached an exit.
    #[must_use]
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found { .. })
    }
}
