#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Depth-first backtracking search over a grid's empty cells.
//!
//! The solver walks the puzzle's empty cells in row-major order, trying
//! candidate digits in ascending order and re-validating the whole grid
//! with [`Grid::is_partial_valid`] after every single trial. A valid trial
//! advances to the next empty cell; an exhausted cell (all nine digits
//! conflicted) is cleared and the search steps back to the previous empty
//! cell to try its next candidate.
//!
//! Fixed cells — cells that were non-zero in the input — never enter the
//! search: the list of empty cells collected up front acts as the
//! backtracking stack, and each frame's last-tried value lives in the
//! working grid cell itself. Stepping back past the first frame means the
//! whole space has been explored, which surfaces as
//! [`SolveError::NoSolution`] rather than looping.
//!
//! The whole-grid re-validation per trial is deliberately naive; the
//! search is exponential in the worst case, which is acceptable for the
//! well-formed puzzles this crate targets.

use crate::grid::{CELL_COUNT, EMPTY, Grid, SIZE};
use smallvec::SmallVec;
use thiserror::Error;

/// Highest candidate digit tried for a cell.
const MAX_DIGIT: u8 = 9;

/// Error returned when the search cannot complete the puzzle.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// Every candidate assignment conflicts: the puzzle has no completion.
    /// Also returned when the input grid itself is not partially valid.
    #[error("puzzle has no solution")]
    NoSolution,
}

/// Counters describing one search run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of candidate digits tried.
    pub trials: usize,
    /// Number of times a cell exhausted its candidates and the search
    /// stepped back to an earlier cell.
    pub backtracks: usize,
}

/// A backtracking solver for one puzzle.
///
/// A solver is intended for a single [`Solver::solve`] run; construct a new
/// one per puzzle.
#[derive(Debug, Clone)]
pub struct Solver {
    puzzle: Grid,
    /// Flat indices (`row * 9 + col`) of the puzzle's empty cells, in
    /// row-major order.
    open: SmallVec<[usize; CELL_COUNT]>,
    stats: SearchStats,
}

impl Solver {
    /// Creates a solver for `puzzle`. Non-zero cells are treated as fixed
    /// and are never reassigned.
    #[must_use]
    pub fn new(puzzle: Grid) -> Self {
        let open = (0..CELL_COUNT)
            .filter(|&cell| puzzle.is_empty_cell(cell / SIZE, cell % SIZE))
            .collect();

        Self {
            puzzle,
            open,
            stats: SearchStats::default(),
        }
    }

    /// Runs the search to completion and returns the solved grid.
    ///
    /// On success the solver's grid is a fully valid completion of the
    /// input with every fixed cell unchanged; solving an already-complete
    /// valid grid returns it as-is. On failure the input grid is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::NoSolution`] when the input grid is not
    /// partially valid, or when every candidate assignment has been
    /// exhausted without finding a completion.
    pub fn solve(&mut self) -> Result<Grid, SolveError> {
        if !self.puzzle.is_partial_valid() {
            return Err(SolveError::NoSolution);
        }

        let mut work = self.puzzle;
        let mut depth = 0usize;

        while depth < self.open.len() {
            let cell = self.open[depth];
            let (row, col) = (cell / SIZE, cell % SIZE);

            if work.get(row, col) == MAX_DIGIT {
                // All nine candidates conflicted: clear the cell and step
                // back to the previous empty cell.
                work.set(row, col, EMPTY);
                self.stats.backtracks += 1;

                match depth.checked_sub(1) {
                    Some(previous) => depth = previous,
                    None => return Err(SolveError::NoSolution),
                }
                continue;
            }

            work.set(row, col, work.get(row, col) + 1);
            self.stats.trials += 1;

            if work.is_partial_valid() {
                depth += 1;
            }
        }

        self.puzzle = work;

        Ok(work)
    }

    /// Counters for the search performed so far.
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The grid held by the solver: the solved grid after a successful
    /// [`Solver::solve`], otherwise the original puzzle.
    #[must_use]
    pub const fn grid(&self) -> Grid {
        self.puzzle
    }
}

impl From<Grid> for Solver {
    fn from(puzzle: Grid) -> Self {
        Self::new(puzzle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{EXAMPLE, EXAMPLE_SOLVED};

    #[test]
    fn test_solves_example_to_known_solution() {
        let mut solver = Solver::new(Grid::new(EXAMPLE));
        let solved = solver.solve().unwrap();
        assert_eq!(solved, Grid::new(EXAMPLE_SOLVED));
        assert!(solved.is_valid());
    }

    #[test]
    fn test_solve_is_identity_on_complete_grid() {
        let complete = Grid::new(EXAMPLE_SOLVED);
        let mut solver = Solver::new(complete);
        assert_eq!(solver.solve(), Ok(complete));
        assert_eq!(solver.stats().trials, 0);
    }

    #[test]
    fn test_fixed_cells_are_invariant() {
        let puzzle = Grid::new(EXAMPLE);
        let mut solver = Solver::new(puzzle);
        let solved = solver.solve().unwrap();

        for row in 0..SIZE {
            for col in 0..SIZE {
                if !puzzle.is_empty_cell(row, col) {
                    assert_eq!(solved.get(row, col), puzzle.get(row, col));
                }
            }
        }
    }

    #[test]
    fn test_single_empty_cell_forced_to_five() {
        // The only digit consistent with row, column and box of (0, 0) in
        // the solved example is 5.
        let mut puzzle = Grid::new(EXAMPLE_SOLVED);
        puzzle.set(0, 0, EMPTY);

        let mut solver = Solver::new(puzzle);
        let solved = solver.solve().unwrap();
        assert_eq!(solved.get(0, 0), 5);
        assert!(solved.is_valid());
    }

    #[test]
    fn test_solves_empty_grid() {
        let mut solver = Solver::new(Grid::empty());
        let solved = solver.solve().unwrap();
        assert!(solved.is_valid());
    }

    #[test]
    fn test_no_solution_for_exhausted_cell() {
        // Row 0 holds 1-8; the 9 at (1, 8) blocks the last candidate for
        // (0, 8), so the grid is partially valid but unsolvable.
        let mut puzzle = Grid::empty();
        for col in 0..8 {
            puzzle.set(0, col, u8::try_from(col).unwrap() + 1);
        }
        puzzle.set(1, 8, 9);
        assert!(puzzle.is_partial_valid());

        let mut solver = Solver::new(puzzle);
        assert_eq!(solver.solve(), Err(SolveError::NoSolution));
        assert_eq!(solver.grid(), puzzle);
    }

    #[test]
    fn test_no_solution_for_invalid_input() {
        let mut puzzle = Grid::empty();
        puzzle.set(0, 0, 4);
        puzzle.set(0, 5, 4);

        let mut solver = Solver::new(puzzle);
        assert_eq!(solver.solve(), Err(SolveError::NoSolution));
    }

    #[test]
    fn test_stats_count_trials_and_backtracks() {
        let mut solver = Solver::new(Grid::new(EXAMPLE));
        solver.solve().unwrap();

        let stats = solver.stats();
        assert!(stats.trials >= 51); // at least one trial per empty cell
        assert!(stats.trials > stats.backtracks);
    }
}
