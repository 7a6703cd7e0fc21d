//! Rendering of the maze grid while the search runs.
//!
//! Three renderers are provided: [`TextRenderer`] dumps the grid as plain text to any writer,
//! [`TuiRenderer`] draws it with Ratatui, and [`NullRenderer`] draws nothing.

use std::io::Write;

use color_eyre::eyre::Result;
use ratatui::{
    backend::Backend,
    crossterm::{
        cursor::MoveTo,
        queue,
        terminal::{Clear, ClearType},
    },
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame, Terminal,
};

use crate::{
    map::Grid,
    types::{Cell, Outcome, Position},
};

/// Glyph drawn over the cell the search currently stands on.
pub(crate) const HIGHLIGHT_SYMBOL: char = 'o';

/// Display surface notified after every step of the search.
pub trait Renderer {
    /// Draws the grid, with `highlight` marked distinctly when given.
    ///
    /// # Errors
    ///
    /// This function may return errors if the underlying display cannot be written to.
    fn render(&mut self, grid: &Grid, highlight: Option<Position>) -> Result<()>;
}

/// Produces the textual dump of a grid, one line per row.
///
/// The highlighted cell, if any, is written as `o` in place of its own symbol.
#[must_use]
pub fn frame_text(grid: &Grid, highlight: Option<Position>) -> String {
    let mut text = String::new();

    for (row, line) in grid.lines().enumerate() {
        for (col, cell) in line.iter().enumerate() {
            if highlight == Some(Position::new(row, col)) {
                text.push(HIGHLIGHT_SYMBOL);
            } else {
                text.push(cell.symbol());
            }
        }
        text.push('\n');
    }

    text
}

/// Renderer writing plain text frames to a writer.
///
/// When screen clearing is enabled, each frame first clears the terminal and moves the cursor
/// home so that successive frames animate in place. Otherwise frames are separated by a blank
/// line.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    /// Destination of the frames.
    writer: W,
    /// Whether to clear the terminal before each frame.
    clear_screen: bool,
}

impl<W: Write> TextRenderer<W> {
    /// Creates a renderer that appends frames to `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            clear_screen: false,
        }
    }

    /// Enables or disables clearing the terminal before each frame.
    #[must_use]
    pub fn clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    /// Consumes the renderer and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, grid: &Grid, highlight: Option<Position>) -> Result<()> {
        if self.clear_screen {
            queue!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        }

        self.writer
            .write_all(frame_text(grid, highlight).as_bytes())?;
        if !self.clear_screen {
            writeln!(self.writer)?;
        }
        self.writer.flush()?;

        Ok(())
    }
}

/// Renderer that ignores every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _grid: &Grid, _highlight: Option<Position>) -> Result<()> {
        Ok(())
    }
}

/// Renderer drawing the grid in a Ratatui terminal.
///
/// The maze is centered in a bordered block titled with the maze name. A footer line underneath
/// shows the number of frames drawn so far, or the outcome once the search is over.
#[derive(Debug)]
pub struct TuiRenderer<B: Backend> {
    /// Terminal the frames are drawn to.
    terminal: Terminal<B>,
    /// Maze name shown in the block title.
    title: String,
    /// Number of frames drawn so far.
    frames: usize,
}

impl<B: Backend> TuiRenderer<B> {
    /// Creates a renderer drawing to `terminal` under the given title.
    pub const fn new(terminal: Terminal<B>, title: String) -> Self {
        Self {
            terminal,
            title,
            frames: 0,
        }
    }

    /// Returns the terminal the renderer draws to.
    pub const fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Draws the final grid with the outcome of the search in the footer.
    ///
    /// # Errors
    ///
    /// This function may return errors if the terminal cannot be drawn to.
    pub fn show_outcome(&mut self, grid: &Grid, outcome: Outcome) -> Result<()> {
        let footer = match outcome {
            Outcome::Found { exit } => format!("exit found at {exit} | (q) quit"),
            Outcome::Exhausted => "no exit reachable | (q) quit".to_owned(),
        };

        let _ = self.terminal.draw(|frame| {
            draw_maze(frame, grid, None, &self.title, &footer);
        })?;

        Ok(())
    }
}

impl<B: Backend> Renderer for TuiRenderer<B> {
    fn render(&mut self, grid: &Grid, highlight: Option<Position>) -> Result<()> {
        self.frames = self.frames.saturating_add(1);
        let footer = format!("frame {} | searching...", self.frames);

        let _ = self.terminal.draw(|frame| {
            draw_maze(frame, grid, highlight, &self.title, &footer);
        })?;

        Ok(())
    }
}

/// Returns the style a cell is drawn with.
fn cell_style(cell: Cell) -> Style {
    match cell {
        Cell::Wall(_) => Style::new().fg(Color::Green),
        Cell::Open => Style::new().fg(Color::DarkGray),
        Cell::Start => Style::new().fg(Color::Yellow),
        Cell::Exit => Style::new().fg(Color::Cyan),
        Cell::Visited => Style::new().fg(Color::Red),
    }
}

/// Builds one styled line per grid row.
fn maze_lines(grid: &Grid, highlight: Option<Position>) -> Vec<Line<'static>> {
    let active_style = Style::new().fg(Color::White).bg(Color::Green);

    grid.lines()
        .enumerate()
        .map(|(row, line)| {
            Line::from(
                line.iter()
                    .enumerate()
                    .map(|(col, &cell)| {
                        if highlight == Some(Position::new(row, col)) {
                            Span::styled(HIGHLIGHT_SYMBOL.to_string(), active_style)
                        } else {
                            Span::styled(cell.symbol().to_string(), cell_style(cell))
                        }
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

/// Renders the maze centered in the frame with a footer line at the bottom.
fn draw_maze(
    frame: &mut Frame,
    grid: &Grid,
    highlight: Option<Position>,
    title: &str,
    footer: &str,
) {
    let width = u16::try_from(grid.cols().saturating_add(2)).unwrap_or(u16::MAX);
    let height = u16::try_from(grid.rows().saturating_add(2)).unwrap_or(u16::MAX);

    let [maze_row, footer_row] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).areas(frame.area());
    let [_, maze_column, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .areas(maze_row);
    let [_, maze_area, _] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .areas(maze_column);

    let block = Block::bordered()
        .title(title)
        .title_alignment(Alignment::Center)
        .style(Style::new().fg(Color::Green))
        .border_type(BorderType::Rounded);
    let maze = Paragraph::new(maze_lines(grid, highlight)).block(block);

    let footer = Block::default()
        .title(footer)
        .title_alignment(Alignment::Center)
        .style(Style::new().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(maze, maze_area);
    frame.render_widget(footer, footer_row);
}
