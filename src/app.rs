//! Core application flow for a single maze run.

use std::io::{self, IsTerminal as _, Write};

use color_eyre::eyre::{Result, WrapErr as _};
use tracing::info;

use crate::{
    cli::{DisplayMode, Settings},
    events, file_loader,
    pathfinding::{NoPacer, Pacer, Search, SleepPacer},
    types::Outcome,
    ui::{self, NullRenderer, TextRenderer, TuiRenderer},
};

/// Application driving one maze run.
///
/// This structure loads the maze named by its settings, solves it while showing the search the
/// way the settings ask for, and reports the outcome on stdout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct App {
    /// Settings resolved from the command line.
    settings: Settings,
}

impl App {
    /// Creates an application for the given settings.
    #[must_use]
    pub const fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Loads, solves and reports on the configured maze.
    ///
    /// Not finding an exit is a normal outcome and is returned as [`Outcome::Exhausted`].
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - The maze cannot be loaded, with a [`LoadError`](crate::LoadError) as the root cause
    /// - The display or stdout cannot be written to
    pub fn run(&self) -> Result<Outcome> {
        let maze = file_loader::load(&self.settings.maze)
            .wrap_err_with(|| format!("could not load {}", self.settings.maze.display()))?;
        let mut search = Search::from_maze(maze);
        let mut pacer = self.pacer();

        let outcome = match self.settings.display {
            DisplayMode::Plain => {
                let stdout = io::stdout();
                let clear_screen = stdout.is_terminal();
                let mut renderer = TextRenderer::new(stdout.lock()).clear_screen(clear_screen);
                search.run(&mut renderer, pacer.as_mut())?
            }
            DisplayMode::Tui => self.run_tui(&mut search, pacer.as_mut())?,
            DisplayMode::Quiet => search.run(&mut NullRenderer, &mut NoPacer)?,
        };

        let show_grid = self.settings.display != DisplayMode::Plain;
        write_report(&mut io::stdout().lock(), &search, outcome, show_grid)?;

        Ok(outcome)
    }

    /// Builds the pacer matching the configured delay.
    fn pacer(&self) -> Box<dyn Pacer> {
        if self.settings.delay.is_zero() {
            Box::new(NoPacer)
        } else {
            Box::new(SleepPacer::new(self.settings.delay))
        }
    }

    /// Runs the search inside the full-screen interface.
    ///
    /// The terminal is restored whether or not the search or the final wait succeed.
    fn run_tui(&self, search: &mut Search, pacer: &mut dyn Pacer) -> Result<Outcome> {
        let title = self
            .settings
            .maze
            .file_name()
            .map_or_else(|| "maze".to_owned(), |name| name.to_string_lossy().into_owned());
        let mut renderer = TuiRenderer::new(ratatui::init(), title);

        let result = search.run(&mut renderer, pacer).and_then(|outcome| {
            renderer.show_outcome(search.grid(), outcome)?;
            events::wait_for_quit()?;
            Ok(outcome)
        });
        ratatui::restore();

        result
    }
}

/// Writes the human-readable summary of a finished run.
///
/// With `show_grid` set, the final grid is printed after the summary for displays that did not
/// leave it on screen.
///
/// # Errors
///
/// This function may return errors if the writer fails.
pub(crate) fn write_report<W: Write>(
    writer: &mut W,
    search: &Search,
    outcome: Outcome,
    show_grid: bool,
) -> io::Result<()> {
    let visited = search.visited().len();

    match outcome {
        Outcome::Found { exit } => {
            let path_len = search.path().map_or(0, |path| path.len());
            info!(%exit, visited, path_len, "exit found");
            writeln!(writer, "Exit found!")?;
            writeln!(
                writer,
                "Reached {exit} after visiting {visited} cells; path length {path_len}."
            )?;
        }
        Outcome::Exhausted => {
            info!(visited, "no exit reachable");
            writeln!(writer, "Could not find the exit.")?;
            writeln!(writer, "Visited {visited} cells.")?;
        }
    }

    if show_grid {
        write!(writer, "{}", ui::frame_text(search.grid(), None))?;
    }

    writer.flush()
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::Duration};

    use tempfile::NamedTempFile;

    use super::*;
    use crate::{file_loader::LoadError, map::Grid, types::Position};

    /// Writes a maze file and returns a handle keeping it alive.
    fn maze_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        file.write_all(contents.as_bytes())
            .expect("failed to write maze");
        file
    }

    /// Builds quiet settings for the given path.
    fn quiet_settings(maze: PathBuf) -> Settings {
        Settings {
            maze,
            display: DisplayMode::Quiet,
            delay: Duration::ZERO,
        }
    }

    /// Runs a search over the given lines to completion without rendering.
    fn finished_search(lines: &[&str]) -> (Search, Outcome) {
        let grid = Grid::from_lines(lines);
        let start = grid.find_start().expect("test grid should have a start");
        let mut search = Search::new(grid, start);
        let outcome = search
            .run(&mut NullRenderer, &mut NoPacer)
            .expect("search should run");

        (search, outcome)
    }

    #[test]
    fn test_run_finds_exit() {
        let file = maze_file("1 5\ne x x x s\n");
        let app = App::new(quiet_settings(file.path().to_path_buf()));

        let outcome = app.run().expect("run should succeed");

        assert_eq!(
            outcome,
            Outcome::Found {
                exit: Position::new(0, 4)
            }
        );
    }

    #[test]
    fn test_run_reports_unreachable_exit() {
        let file = maze_file("3 3\ne x #\nx # #\n# x s\n");
        let app = App::new(quiet_settings(file.path().to_path_buf()));

        let outcome = app.run().expect("an unreachable exit is not an error");

        assert_eq!(outcome, Outcome::Exhausted);
    }

    #[test]
    fn test_run_rejects_zero_rows() {
        let file = maze_file("0 5\n");
        let app = App::new(quiet_settings(file.path().to_path_buf()));

        let err = app.run().expect_err("zero rows should fail to load");

        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::NonPositiveDimensions { rows: 0, cols: 5 })
        ));
    }

    #[test]
    fn test_run_rejects_missing_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let app = App::new(quiet_settings(dir.path().join("absent.txt")));

        let err = app.run().expect_err("missing file should fail to load");

        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::Io { .. })
        ));
    }

    #[test]
    fn test_write_report_found() {
        let (search, outcome) = finished_search(&["exxs"]);
        let mut output = Vec::new();

        write_report(&mut output, &search, outcome, false).expect("report should be written");

        let output = String::from_utf8(output).expect("output should be utf-8");
        assert_eq!(
            output,
            "Exit found!\nReached (0, 3) after visiting 3 cells; path length 4.\n"
        );
    }

    #[test]
    fn test_write_report_exhausted_with_grid() {
        let (search, outcome) = finished_search(&["ex#s"]);
        let mut output = Vec::new();

        write_report(&mut output, &search, outcome, true).expect("report should be written");

        let output = String::from_utf8(output).expect("output should be utf-8");
        assert_eq!(output, "Could not find the exit.\nVisited 2 cells.\n..#s\n");
    }
}
