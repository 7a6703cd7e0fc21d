//! Maze file loading and validation.
//!
//! A maze file starts with a header holding two positive integers, the row count and the column
//! count. The header is followed by `rows * cols` single-character cell symbols in row-major order.
//! Whitespace between symbols is optional, so a row may be written as `e x x s` or as `exxs`.

use std::{
    fs, io,
    num::ParseIntError,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    map::Grid,
    types::{Cell, Position},
};

/// A loaded maze together with the position of its unique start cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    /// The cells of the maze.
    pub grid: Grid,
    /// Where the search begins.
    pub start: Position,
}

/// Reasons a maze source can fail to load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be read.
    #[error("failed to read maze file {}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The source holds no header at all.
    #[error("maze header is missing; expected a row count and a column count")]
    MissingHeader,
    /// A header field is not an integer.
    #[error("maze header has an invalid {axis} count {value:?}")]
    InvalidDimension {
        /// Which header field failed, either `row` or `column`.
        axis: &'static str,
        /// The offending token.
        value: String,
        /// Integer parsing failure.
        #[source]
        source: ParseIntError,
    },
    /// A header field is zero or negative.
    #[error("maze dimensions must be positive, got {rows}x{cols}")]
    NonPositiveDimensions {
        /// Row count from the header.
        rows: i64,
        /// Column count from the header.
        cols: i64,
    },
    /// The header describes more cells than can be addressed.
    #[error("maze dimensions {rows}x{cols} are too large")]
    TooLarge {
        /// Row count from the header.
        rows: i64,
        /// Column count from the header.
        cols: i64,
    },
    /// The body ends before every cell has a symbol.
    #[error("maze body is truncated: expected {expected} cells but found {found}")]
    Truncated {
        /// Number of cells the header promises.
        expected: usize,
        /// Number of symbols actually present.
        found: usize,
    },
    /// No cell holds the start symbol.
    #[error("no start cell ('e') found in maze")]
    MissingStart,
    /// More than one cell holds the start symbol.
    #[error("maze has {count} start cells ('e'); expected exactly one")]
    MultipleStarts {
        /// Number of start cells found.
        count: usize,
    },
}

/// Reads and parses the maze file at `path`.
///
/// # Errors
///
/// This function returns [`LoadError::Io`] if the file cannot be read, and any error produced by
/// [`parse`] for malformed contents.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Maze, LoadError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let maze = parse(&contents)?;
    info!(
        path = %path.display(),
        rows = maze.grid.rows(),
        cols = maze.grid.cols(),
        start = %maze.start,
        "loaded maze"
    );

    Ok(maze)
}

/// Parses a maze from its textual form.
///
/// # Errors
///
/// This function may return errors if:
/// - The header is missing, not numeric, non-positive or too large
/// - The body holds fewer symbols than the header promises
/// - The maze has no start cell or more than one
pub fn parse(source: &str) -> Result<Maze, LoadError> {
    let mut tokens = source.split_whitespace();

    let rows = parse_dimension(tokens.next(), "row")?;
    let cols = parse_dimension(tokens.next(), "column")?;
    if rows <= 0 || cols <= 0 {
        return Err(LoadError::NonPositiveDimensions { rows, cols });
    }

    let too_large = || LoadError::TooLarge { rows, cols };
    let row_count = usize::try_from(rows).map_err(|_overflow| too_large())?;
    let col_count = usize::try_from(cols).map_err(|_overflow| too_large())?;
    let expected = row_count.checked_mul(col_count).ok_or_else(too_large)?;

    let mut symbols = tokens.flat_map(str::chars);
    let cells: Vec<Cell> = symbols
        .by_ref()
        .take(expected)
        .map(Cell::from_symbol)
        .collect();
    let found = cells.len();
    if found < expected {
        return Err(LoadError::Truncated { expected, found });
    }

    let trailing = symbols.count();
    if trailing > 0 {
        warn!(trailing, "ignoring symbols past the end of the maze body");
    }

    let grid = Grid::new(row_count, col_count, cells)
        .ok_or(LoadError::Truncated { expected, found })?;

    match grid.count(Cell::Start) {
        0 => Err(LoadError::MissingStart),
        1 => {
            let start = grid.find_start().ok_or(LoadError::MissingStart)?;
            Ok(Maze { grid, start })
        }
        count => Err(LoadError::MultipleStarts { count }),
    }
}

/// Parses one header field.
fn parse_dimension(token: Option<&str>, axis: &'static str) -> Result<i64, LoadError> {
    let token = token.ok_or(LoadError::MissingHeader)?;

    token
        .parse()
        .map_err(|source| LoadError::InvalidDimension {
            axis,
            value: token.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use rstest::rstest;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_parse_valid_spaced_maze() {
        let maze = parse("2 3\ne x #\n# x s\n").expect("maze should parse");

        assert_eq!(maze.start, Position::new(0, 0));
        assert_eq!(maze.grid.rows(), 2);
        assert_eq!(maze.grid.cols(), 3);
        assert_eq!(maze.grid.cell_at(Position::new(1, 2)), Some(Cell::Exit));
        assert_eq!(
            maze.grid.cell_at(Position::new(0, 2)),
            Some(Cell::Wall('#'))
        );
    }

    #[test]
    fn test_parse_valid_compact_maze() {
        let maze = parse("3 3\n###\nxex\n#s#").expect("maze should parse");

        assert_eq!(maze.start, Position::new(1, 1));
        assert_eq!(maze.grid.count(Cell::Open), 2);
    }

    #[test]
    fn test_parse_single_start_cell() {
        let maze = parse("1 1\ne").expect("a lone start cell is a valid maze");

        assert_eq!(maze.start, Position::new(0, 0));
    }

    #[test]
    fn test_parse_ignores_trailing_symbols() {
        let maze = parse("1 3\nexs\nextra").expect("maze should parse");

        assert_eq!(maze.grid.cols(), 3);
    }

    #[rstest]
    #[case("0 5\n")]
    #[case("5 0\n")]
    #[case("-1 3\nexs")]
    fn test_parse_non_positive_dimensions(#[case] source: &str) {
        let result = parse(source);

        assert!(matches!(
            result,
            Err(LoadError::NonPositiveDimensions { .. })
        ));
    }

    #[rstest]
    #[case("")]
    #[case("   \n")]
    #[case("3")]
    fn test_parse_missing_header(#[case] source: &str) {
        assert!(matches!(parse(source), Err(LoadError::MissingHeader)));
    }

    #[test]
    fn test_parse_invalid_dimension() {
        let result = parse("3 three\nexs");

        assert!(matches!(
            result,
            Err(LoadError::InvalidDimension { axis: "column", .. })
        ));
    }

    #[test]
    fn test_parse_too_large() {
        let result = parse(&format!("{} {}\ne", i64::MAX, i64::MAX));

        assert!(matches!(result, Err(LoadError::TooLarge { .. })));
    }

    #[test]
    fn test_parse_truncated_body() {
        let result = parse("2 2\nex");

        assert!(matches!(
            result,
            Err(LoadError::Truncated {
                expected: 4,
                found: 2
            })
        ));
    }

    #[test]
    fn test_parse_missing_start() {
        let result = parse("1 3\nxxs");

        assert!(matches!(result, Err(LoadError::MissingStart)));
    }

    #[test]
    fn test_parse_multiple_starts() {
        let result = parse("1 3\nexe");

        assert!(matches!(result, Err(LoadError::MultipleStarts { count: 2 })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        write!(file, "1 5\ne x x x s\n").expect("failed to write maze");

        let maze = load(file.path()).expect("maze should load");

        assert_eq!(maze.start, Position::new(0, 0));
        assert!(maze.grid.is_exit(Position::new(0, 4)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("missing.txt");

        let result = load(&path);

        assert!(matches!(result, Err(LoadError::Io { .. })));
        assert!(result
            .expect_err("missing file should fail")
            .to_string()
            .contains("missing.txt"));
    }
}
