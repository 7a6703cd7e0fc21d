//! Maze grid data and cell classification.
//!
//! This module contains the [`Grid`] struct, which holds the shape and the contents of a maze. The
//! shape is fixed once the grid is built; the contents change as the search marks cells visited.

use crate::types::{Cell, Position};

/// Two-dimensional maze grid.
///
/// Cells are stored in row-major order. The row and column counts are fixed at construction and
/// are always positive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows in the maze.
    rows: usize,
    /// Number of columns in the maze.
    cols: usize,
    /// Row-major cell storage holding exactly `rows * cols` entries.
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid from its dimensions and its row-major cells.
    ///
    /// Returns `None` if either dimension is zero or if the number of cells doesn't match
    /// `rows * cols`.
    #[must_use]
    pub fn new(rows: usize, cols: usize, cells: Vec<Cell>) -> Option<Self> {
        (rows > 0 && cols > 0 && rows.checked_mul(cols) == Some(cells.len())).then_some(Self {
            rows,
            cols,
            cells,
        })
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Maps a position to its offset in the cell storage, if it lies inside the grid.
    const fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }

    /// Whether the position lies inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Returns the cell at `pos`, or `None` when the position is out of bounds.
    #[must_use]
    pub fn cell_at(&self, pos: Position) -> Option<Cell> {
        self.index(pos)
            .and_then(|index| self.cells.get(index))
            .copied()
    }

    /// Overwrites the cell at `pos` with the visited marker.
    ///
    /// Marking a cell twice has no further effect. Out of bounds positions are ignored.
    pub fn mark_visited(&mut self, pos: Position) {
        if let Some(cell) = self
            .index(pos)
            .and_then(|index| self.cells.get_mut(index))
        {
            *cell = Cell::Visited;
        }
    }

    /// Whether the cell at `pos` is open path or an exit.
    #[must_use]
    pub fn is_open(&self, pos: Position) -> bool {
        self.cell_at(pos).is_some_and(Cell::is_passable)
    }

    /// Whether the cell at `pos` is an exit.
    #[must_use]
    pub fn is_exit(&self, pos: Position) -> bool {
        self.cell_at(pos) == Some(Cell::Exit)
    }

    /// Whether the search may push `pos` onto its frontier.
    ///
    /// The position must lie inside the grid and hold an open or exit cell. Walls and visited
    /// cells both fail, so this is the only gate the frontier needs against revisiting cells.
    #[must_use]
    pub fn is_valid(&self, pos: Position) -> bool {
        self.contains(pos) && self.is_open(pos)
    }

    /// Finds the first start cell in row-major order.
    #[must_use]
    pub fn find_start(&self) -> Option<Position> {
        self.positions()
            .find_map(|(pos, cell)| (cell == Cell::Start).then_some(pos))
    }

    /// Counts the cells equal to `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&other| other == cell).count()
    }

    /// Iterates over the grid one row at a time.
    pub fn lines(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols)
    }

    /// Iterates over every cell together with its position, in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(index, &cell)| {
            (Position::new(index / self.cols, index % self.cols), cell)
        })
    }

    /// Builds a grid from equally sized lines of symbols.
    #[cfg(test)]
    pub(crate) fn from_lines(lines: &[&str]) -> Self {
        let cols = lines.first().map_or(0, |line| line.chars().count());
        let cells = lines
            .iter()
            .flat_map(|line| line.chars().map(Cell::from_symbol))
            .collect();

        Self::new(lines.len(), cols, cells).expect("test grid should be rectangular")
    }
}
