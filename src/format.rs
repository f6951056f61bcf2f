#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A strict parser and renderer for the box-drawing grid rendering.
//!
//! A rendered grid looks like this:
//!
//! ```text
//! ┌───────┬───────┬───────┐
//! │ 5 3 . │ . 7 . │ . . . │
//! │ 6 . . │ 1 9 5 │ . . . │
//! │ . 9 8 │ . . . │ . 6 . │
//! ├───────┼───────┼───────┤
//! │ 8 . . │ . 6 . │ . . 3 │
//! │ 4 . . │ 8 . 3 │ . . 1 │
//! │ 7 . . │ . 2 . │ . . 6 │
//! ├───────┼───────┼───────┤
//! │ . 6 . │ . . . │ 2 8 . │
//! │ . . . │ 4 1 9 │ . . 5 │
//! │ . . . │ . 8 . │ . 7 9 │
//! └───────┴───────┴───────┘
//! ```
//!
//! Empty cells render as `.`; each cell token is exactly one character
//! followed by one space. The parser matches every expected substring
//! exactly and fails with a [`FormatError`] on the first deviation; there
//! is no recovery or partial parsing.
//!
//! Two variants of the format exist in the wild, differing only in whether
//! `#`-prefixed comment lines may precede the top border. Both are handled
//! by one parser; [`ParseOptions::skip_comments`] selects the mode.

use crate::grid::{BOX_SIZE, EMPTY, Grid, SIZE};
use std::fmt;
use std::io::{self, BufRead};
use std::path::Path;
use thiserror::Error;

/// First line of a rendered grid.
pub const TOP_BORDER: &str = "┌───────┬───────┬───────┐";

/// Separator emitted after the third and the sixth data row.
pub const MID_BORDER: &str = "├───────┼───────┼───────┤";

/// Last line of a rendered grid.
pub const BOTTOM_BORDER: &str = "└───────┴───────┴───────┘";

/// Opens a data row and separates the three cell groups within it.
const ROW_START: &str = "│ ";

/// Closes a data row.
const ROW_END: &str = "│";

/// Errors produced while parsing the text rendering of a grid.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A line did not match the expected border, separator, or row
    /// delimiter.
    #[error("unexpected row {got:?}, expected {expected:?}")]
    UnexpectedLine {
        /// The exact text expected at this point of the input.
        expected: &'static str,
        /// The offending line as read.
        got: String,
    },

    /// A cell token had an unexpected shape or length.
    #[error("cell token out of range in row {0:?}")]
    OutOfRange(String),

    /// A cell token held a character that is neither a digit nor `.`.
    #[error("invalid cell digit {0:?}")]
    InvalidDigit(char),

    /// The input ended before the expected line.
    #[error("unexpected end of input, expected {0:?}")]
    UnexpectedEof(&'static str),

    /// The underlying reader failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Configuration for [`parse_grid`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip `#`-prefixed comment lines before the top border. When unset,
    /// a comment line fails the parse like any other unexpected line.
    pub skip_comments: bool,
}

/// Parses the box-drawing rendering of a grid from `reader`.
///
/// Cell tokens accept `.` for an empty cell and the digits `0`-`9`; an
/// explicit `0` is normalized to empty. The parsed grid is not checked for
/// rule validity, only for format validity; callers decide whether to
/// require [`Grid::is_partial_valid`].
///
/// # Errors
///
/// Returns a [`FormatError`] describing the first deviation from the
/// expected rendering, including I/O failures of the underlying reader.
pub fn parse_grid<R: BufRead>(reader: R, options: ParseOptions) -> Result<Grid, FormatError> {
    let mut lines = reader.lines();
    let mut grid = Grid::empty();

    loop {
        let line = next_line(&mut lines, TOP_BORDER)?;
        if options.skip_comments && line.starts_with('#') {
            continue;
        }
        if line == TOP_BORDER {
            break;
        }
        return Err(FormatError::UnexpectedLine {
            expected: TOP_BORDER,
            got: line,
        });
    }

    for row in 0..SIZE {
        let line = next_line(&mut lines, ROW_START)?;
        parse_data_row(&line, row, &mut grid)?;

        if row % BOX_SIZE == BOX_SIZE - 1 && row != SIZE - 1 {
            expect_line(&mut lines, MID_BORDER)?;
        }
    }

    expect_line(&mut lines, BOTTOM_BORDER)?;

    Ok(grid)
}

/// Parses a grid rendering from the file at `path`.
///
/// This is a convenience wrapper around [`parse_grid`] that opens the file
/// behind a `BufReader`.
///
/// # Errors
///
/// Returns a [`FormatError`] if the file cannot be opened or its content
/// does not match the expected rendering.
pub fn parse_file<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Grid, FormatError> {
    let file = std::fs::File::open(path)?;

    parse_grid(io::BufReader::new(file), options)
}

/// Renders `grid` in the box-drawing format, `.` for empty cells, with a
/// trailing newline after the bottom border.
#[must_use]
pub fn render(grid: &Grid) -> String {
    let mut out = String::new();

    out.push_str(TOP_BORDER);
    out.push('\n');

    for row in 0..SIZE {
        out.push_str(ROW_START);
        for col in 0..SIZE {
            let value = grid.get(row, col);
            if value == EMPTY {
                out.push('.');
            } else {
                out.push(char::from(b'0' + value));
            }
            out.push(' ');

            if col % BOX_SIZE == BOX_SIZE - 1 && col != SIZE - 1 {
                out.push_str(ROW_START);
            }
        }
        out.push_str(ROW_END);
        out.push('\n');

        if row % BOX_SIZE == BOX_SIZE - 1 && row != SIZE - 1 {
            out.push_str(MID_BORDER);
            out.push('\n');
        }
    }

    out.push_str(BOTTOM_BORDER);
    out.push('\n');

    out
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

/// Reads the next line, failing with `UnexpectedEof` naming `expected` if
/// the input is exhausted.
fn next_line<I>(lines: &mut I, expected: &'static str) -> Result<String, FormatError>
where
    I: Iterator<Item = io::Result<String>>,
{
    let line = lines.next().ok_or(FormatError::UnexpectedEof(expected))?;

    Ok(line?)
}

/// Reads the next line and requires it to equal `expected` exactly.
fn expect_line<I>(lines: &mut I, expected: &'static str) -> Result<(), FormatError>
where
    I: Iterator<Item = io::Result<String>>,
{
    let line = next_line(lines, expected)?;

    if line == expected {
        Ok(())
    } else {
        Err(FormatError::UnexpectedLine {
            expected,
            got: line,
        })
    }
}

/// Parses one data row of nine cell tokens into `grid` at `row`.
fn parse_data_row(line: &str, row: usize, grid: &mut Grid) -> Result<(), FormatError> {
    let mut rest = eat(line, ROW_START, line)?;

    for col in 0..SIZE {
        let (value, tail) = parse_cell(rest, line)?;
        grid.set(row, col, value);
        rest = tail;

        if col % BOX_SIZE == BOX_SIZE - 1 && col != SIZE - 1 {
            rest = eat(rest, ROW_START, line)?;
        }
    }

    if rest == ROW_END {
        Ok(())
    } else {
        Err(FormatError::UnexpectedLine {
            expected: ROW_END,
            got: line.to_string(),
        })
    }
}

/// Strips the literal `token` from the front of `rest`, reporting the whole
/// offending `line` on mismatch.
fn eat<'a>(rest: &'a str, token: &'static str, line: &str) -> Result<&'a str, FormatError> {
    rest.strip_prefix(token)
        .ok_or_else(|| FormatError::UnexpectedLine {
            expected: token,
            got: line.to_string(),
        })
}

/// Parses one cell token: exactly one character followed by one space.
fn parse_cell<'a>(rest: &'a str, line: &str) -> Result<(u8, &'a str), FormatError> {
    let mut chars = rest.chars();
    let symbol = chars
        .next()
        .ok_or_else(|| FormatError::OutOfRange(line.to_string()))?;

    if chars.next() != Some(' ') {
        return Err(FormatError::OutOfRange(line.to_string()));
    }

    let value = match symbol {
        '.' => EMPTY,
        '0'..='9' => symbol as u8 - b'0',
        other => return Err(FormatError::InvalidDigit(other)),
    };

    Ok((value, chars.as_str()))
}
