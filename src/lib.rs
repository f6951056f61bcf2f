#![deny(missing_docs)]
//! A backtracking solver for 9x9 sudoku puzzles.
//!
//! The crate is built from two components, the second entirely on the first:
//!
//! -   [`grid::Grid`] — the 9x9 cell matrix and its structural validity
//!     checks (rows, columns, boxes, bounds).
//! -   [`solver::Solver`] — depth-first backtracking search over the grid's
//!     empty cells, using the grid's validity check as its pruning oracle.
//!
//! Puzzles are read and written in a human-readable box-drawing rendering,
//! implemented by the [`format`] module.
//!
//! ```
//! use sudoku_solver::grid::{EXAMPLE, Grid};
//! use sudoku_solver::solver::Solver;
//!
//! let puzzle = Grid::new(EXAMPLE);
//! assert!(puzzle.is_partial_valid());
//!
//! let mut solver = Solver::new(puzzle);
//! let solved = solver.solve().expect("the example puzzle is solvable");
//! assert!(solved.is_valid());
//! ```

/// The `format` module implements the strict parser and renderer for the
/// box-drawing text rendering of a grid.
pub mod format;

/// The `grid` module implements the 9x9 cell matrix and the validity
/// predicates encoding the sudoku rules.
pub mod grid;

/// The `solver` module implements the backtracking search that completes a
/// partially-valid grid.
pub mod solver;
