//! Command-line arguments, run settings and log setup.

use std::{io, path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{eyre, Result};
use tracing_subscriber::EnvFilter;

use crate::pathfinding::DEFAULT_STEP_DELAY_MS;

/// Solve a maze by depth-first backtracking and watch the search unfold.
#[derive(Debug, Parser)]
#[command(name = "mazewalk", version, about, long_about = None)]
pub struct Cli {
    /// Path to the maze file
    pub maze: PathBuf,

    /// How the search is shown
    #[arg(short, long, value_enum, default_value_t = DisplayMode::Plain)]
    pub display: DisplayMode,

    /// Delay between frames in milliseconds (0 disables pacing)
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_STEP_DELAY_MS)]
    pub delay: u64,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Ways of showing the search as it runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DisplayMode {
    /// Print every frame as plain text, redrawing in place on a terminal.
    #[default]
    Plain,
    /// Draw the search in a full-screen terminal interface.
    Tui,
    /// Only print the final state.
    Quiet,
}

/// Settings for a single application run, resolved from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Maze file to solve.
    pub maze: PathBuf,
    /// How the search is shown.
    pub display: DisplayMode,
    /// Time between frames; zero disables pacing.
    pub delay: Duration,
}

impl Settings {
    /// Builds settings for the given maze with default display options.
    #[must_use]
    pub fn new(maze: PathBuf) -> Self {
        Self {
            maze,
            display: DisplayMode::default(),
            delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
        }
    }
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Self {
            maze: cli.maze,
            display: cli.display,
            delay: Duration::from_millis(cli.delay),
        }
    }
}

impl Cli {
    /// Installs the global log subscriber.
    ///
    /// Logs go to stderr so they never mix with the rendered frames. `--verbose` selects the
    /// `debug` level; otherwise `RUST_LOG` is honoured and the level defaults to `warn`.
    ///
    /// # Errors
    ///
    /// This function may return errors if a global subscriber is already installed.
    pub fn init_logging(&self) -> Result<()> {
        let filter = if self.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .try_init()
            .map_err(|err| eyre!("failed to install log subscriber: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["mazewalk", "maze.txt"]).expect("arguments should parse");

        assert_eq!(cli.maze, PathBuf::from("maze.txt"));
        assert_eq!(cli.display, DisplayMode::Plain);
        assert_eq!(cli.delay, DEFAULT_STEP_DELAY_MS);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_all_options() {
        let cli = Cli::try_parse_from([
            "mazewalk", "--display", "tui", "--delay", "0", "-v", "maze.txt",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.display, DisplayMode::Tui);
        assert_eq!(cli.delay, 0);
        assert!(cli.verbose);
    }

    #[rstest]
    #[case(&["mazewalk"])]
    #[case(&["mazewalk", "one.txt", "two.txt"])]
    #[case(&["mazewalk", "--display", "fancy", "maze.txt"])]
    fn test_cli_usage_errors(#[case] args: &[&str]) {
        let err = Cli::try_parse_from(args).expect_err("arguments should be rejected");

        assert!(err.use_stderr());
    }

    #[test]
    fn test_settings_from_cli() {
        let cli = Cli::try_parse_from(["mazewalk", "-d", "quiet", "--delay", "15", "m.txt"])
            .expect("arguments should parse");

        let settings = Settings::from(cli);

        assert_eq!(settings.maze, PathBuf::from("m.txt"));
        assert_eq!(settings.display, DisplayMode::Quiet);
        assert_eq!(settings.delay, Duration::from_millis(15));
    }

    #[test]
    fn test_settings_new_defaults() {
        let settings = Settings::new(PathBuf::from("m.txt"));

        assert_eq!(settings.display, DisplayMode::Plain);
        assert_eq!(settings.delay, Duration::from_millis(DEFAULT_STEP_DELAY_MS));
    }
}
