#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The 9x9 cell matrix and its structural validity checks.
//!
//! A [`Grid`] stores one byte per cell: 0 denotes an empty cell, 1-9 a
//! filled digit. The two predicates [`Grid::is_partial_valid`] and
//! [`Grid::is_valid`] encode every sudoku rule the solver needs; there is
//! no separate rule abstraction.
//!
//! Cells that are non-zero when a puzzle is loaded are "fixed": the solver
//! never reassigns them. The grid itself does not track fixedness; the
//! solver derives it from the original input.

use bit_vec::BitVec;
use itertools::Itertools;

/// Side length of the grid.
pub const SIZE: usize = 9;

/// Side length of one of the nine non-overlapping boxes tiling the grid.
pub const BOX_SIZE: usize = 3;

/// Total number of cells.
pub const CELL_COUNT: usize = SIZE * SIZE;

/// The value of an empty cell.
pub const EMPTY: u8 = 0;

/// A well-known published puzzle with a unique solution, used by tests,
/// benchmarks and documentation examples.
pub const EXAMPLE: [[u8; SIZE]; SIZE] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// The unique solution of [`EXAMPLE`].
pub const EXAMPLE_SOLVED: [[u8; SIZE]; SIZE] = [
    [5, 3, 4, 6, 7, 8, 9, 1, 2],
    [6, 7, 2, 1, 9, 5, 3, 4, 8],
    [1, 9, 8, 3, 4, 2, 5, 6, 7],
    [8, 5, 9, 7, 6, 1, 4, 2, 3],
    [4, 2, 6, 8, 5, 3, 7, 9, 1],
    [7, 1, 3, 9, 2, 4, 8, 5, 6],
    [9, 6, 1, 5, 3, 7, 2, 8, 4],
    [2, 8, 7, 4, 1, 9, 6, 3, 5],
    [3, 4, 5, 2, 8, 6, 1, 7, 9],
];

/// A 9x9 puzzle grid, indexed by `(row, column)`, both 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid([[u8; SIZE]; SIZE]);

impl Grid {
    /// Creates a grid from a row-major cell matrix.
    #[must_use]
    pub const fn new(cells: [[u8; SIZE]; SIZE]) -> Self {
        Self(cells)
    }

    /// Creates a grid with every cell empty.
    #[must_use]
    pub const fn empty() -> Self {
        Self([[EMPTY; SIZE]; SIZE])
    }

    /// Returns the value of the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below [`SIZE`].
    #[must_use]
    pub const fn get(&self, row: usize, col: usize) -> u8 {
        self.0[row][col]
    }

    /// Sets the cell at `(row, col)` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below [`SIZE`].
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.0[row][col] = value;
    }

    /// Returns `true` if the cell at `(row, col)` is empty.
    #[must_use]
    pub const fn is_empty_cell(&self, row: usize, col: usize) -> bool {
        self.0[row][col] == EMPTY
    }

    /// Checks that every cell value lies in `[0, 9]` and that no row,
    /// column, or box contains a digit more than once among its non-zero
    /// entries. Empty cells are ignored, so a partially filled puzzle can
    /// be partially valid.
    ///
    /// Box `b` (0-8) covers the cells `(b / 3 * 3 + j / 3, b % 3 * 3 + j % 3)`
    /// for `j` in 0-8: boxes are enumerated left-to-right, top-to-bottom,
    /// and cells within a box the same way.
    #[must_use]
    pub fn is_partial_valid(&self) -> bool {
        let in_bounds = (0..SIZE)
            .cartesian_product(0..SIZE)
            .all(|(row, col)| self.0[row][col] <= 9);

        if !in_bounds {
            return false;
        }

        let rows = (0..SIZE).all(|row| no_duplicates((0..SIZE).map(|col| self.0[row][col])));
        let cols = (0..SIZE).all(|col| no_duplicates((0..SIZE).map(|row| self.0[row][col])));
        let boxes = (0..SIZE).all(|b| {
            no_duplicates((0..SIZE).map(|j| {
                let row = (b / BOX_SIZE) * BOX_SIZE + j / BOX_SIZE;
                let col = (b % BOX_SIZE) * BOX_SIZE + j % BOX_SIZE;
                self.0[row][col]
            }))
        });

        rows && cols && boxes
    }

    /// Checks that the grid is completely filled and partially valid,
    /// i.e. solved. Used to confirm the solver's final output.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let filled = self.0.iter().flatten().all(|&cell| cell != EMPTY);

        filled && self.is_partial_valid()
    }
}

impl From<[[u8; SIZE]; SIZE]> for Grid {
    fn from(cells: [[u8; SIZE]; SIZE]) -> Self {
        Self::new(cells)
    }
}

impl From<Grid> for [[u8; SIZE]; SIZE] {
    fn from(grid: Grid) -> Self {
        grid.0
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

/// Checks one row, column, or box: every non-zero digit may appear at most
/// once among `values`.
fn no_duplicates(values: impl Iterator<Item = u8>) -> bool {
    let mut seen = BitVec::from_elem(10, false);

    for value in values {
        if value == EMPTY {
            continue;
        }
        if seen[value as usize] {
            return false;
        }
        seen.set(value as usize, true);
    }

    true
}
