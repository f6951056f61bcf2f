#![allow(clippy::cast_precision_loss)]
//! Command-line entry point for the sudoku solver.
//!
//! Reads a puzzle in the box-drawing grid format, validates it, solves it
//! by backtracking search, and prints `Solved:` followed by the rendered
//! solution. Any read failure, input-validity failure, solve failure, or
//! output-validity failure terminates the process with a fatal log
//! message.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a puzzle from standard input
//! sudoku-solver < puzzle.sudoku
//!
//! # Solve a puzzle file (equivalent forms)
//! sudoku-solver puzzle.sudoku
//! sudoku-solver file --path puzzle.sudoku
//!
//! # Solve every *.sudoku file under a directory
//! sudoku-solver dir --path puzzles/
//!
//! # Print a statistics block after solving
//! sudoku-solver --stats < puzzle.sudoku
//!
//! # Generate shell completions
//! sudoku-solver completions bash
//! ```
//!
//! Comment lines (`#`-prefixed, before the top border) are skipped by
//! default; pass `--no-comments` to require the bare format. Log output is
//! controlled by `RUST_LOG` via `env_logger`.

use clap::{Args, CommandFactory, Parser, Subcommand};
use log::{debug, error, info};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sudoku_solver::format::{self, ParseOptions};
use sudoku_solver::grid::Grid;
use sudoku_solver::solver::{SearchStats, Solver};
use tikv_jemalloc_ctl::{epoch, stats};
use walkdir::WalkDir;

/// Global allocator, matching the solver's memory statistics reporting.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the sudoku solver.
#[derive(Parser, Debug)]
#[command(name = "sudoku-solver", version, about = "A backtracking sudoku solver")]
struct Cli {
    /// Optional path to a puzzle file. Without a subcommand the puzzle is
    /// read from this file, or from standard input when absent.
    #[arg(global = true)]
    puzzle: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `dir`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a puzzle file in the box-drawing format.
    File {
        /// Path to the puzzle file.
        #[arg(short, long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `*.sudoku` file found recursively under a directory.
    Dir {
        /// Directory to scan for puzzle files.
        #[arg(short, long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across the subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Reject `#`-prefixed comment lines before the top border instead of
    /// skipping them.
    #[arg(long, default_value_t = false)]
    no_comments: bool,

    /// Print parse/solve statistics after solving.
    #[arg(short, long, default_value_t = false)]
    stats: bool,

    /// Enable debug output, echoing the parsed puzzle before solving.
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    // A bare path without a subcommand solves that file directly.
    if let Some(path) = cli.puzzle.clone() {
        if cli.command.is_none() {
            solve_path(&path, &cli.common);
            return;
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => solve_path(&path, &common),
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        }
        None => solve_stdin(&cli.common),
    }
}

/// Logs `message` and terminates the process.
fn fatal(message: &str) -> ! {
    error!("{message}");
    std::process::exit(1);
}

const fn parse_options(common: &CommonOptions) -> ParseOptions {
    ParseOptions {
        skip_comments: !common.no_comments,
    }
}

/// Reads a puzzle from standard input and solves it.
fn solve_stdin(common: &CommonOptions) {
    let time = Instant::now();
    let stdin = io::stdin();
    let puzzle = format::parse_grid(stdin.lock(), parse_options(common))
        .unwrap_or_else(|e| fatal(&format!("Failed to read puzzle from stdin: {e}")));

    solve_and_report(puzzle, time.elapsed(), common);
}

/// Reads a puzzle from the file at `path` and solves it.
fn solve_path(path: &Path, common: &CommonOptions) {
    let time = Instant::now();
    let puzzle = format::parse_file(path, parse_options(common))
        .unwrap_or_else(|e| fatal(&format!("Failed to read puzzle {}: {e}", path.display())));

    info!("Solving: {}", path.display());
    solve_and_report(puzzle, time.elapsed(), common);
}

/// Validates, solves, re-validates, and prints a single puzzle. Any
/// failure along the way is fatal.
fn solve_and_report(puzzle: Grid, parse_time: Duration, common: &CommonOptions) {
    if common.debug {
        debug!("Parsed puzzle:\n{puzzle}");
    }

    if !puzzle.is_partial_valid() {
        fatal("Input puzzle is invalid.");
    }

    epoch::advance().unwrap();

    let time = Instant::now();
    let mut solver = Solver::new(puzzle);
    let solved = solver
        .solve()
        .unwrap_or_else(|e| fatal(&format!("Failed to solve puzzle: {e}")));
    let solve_time = time.elapsed();

    // The solver is trusted but cheap to double-check; failing here is an
    // internal-consistency error, not a user error.
    if !solved.is_valid() {
        fatal("Solver produced an invalid solution.");
    }

    println!("Solved:");
    print!("{solved}");

    if common.stats {
        print_stats(parse_time, solve_time, solver.stats());
    }
}

/// Solves every `*.sudoku` file under `dir`, reporting per-file results.
/// Exits non-zero if any file fails.
fn solve_dir(dir: &Path, common: &CommonOptions) {
    let mut solved = 0usize;
    let mut failed = 0usize;

    for entry in WalkDir::new(dir) {
        let entry =
            entry.unwrap_or_else(|e| fatal(&format!("Failed to scan {}: {e}", dir.display())));

        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|ext| ext.to_str()) != Some("sudoku") {
            continue;
        }

        match try_solve_file(entry.path(), parse_options(common)) {
            Ok(stats) => {
                solved += 1;
                println!(
                    "{}: solved ({} trials, {} backtracks)",
                    entry.path().display(),
                    stats.trials,
                    stats.backtracks
                );
            }
            Err(message) => {
                failed += 1;
                error!("{}: {message}", entry.path().display());
            }
        }
    }

    println!("Solved {solved} puzzle(s), {failed} failure(s)");

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Runs the full read-validate-solve-revalidate pipeline on one file,
/// returning the search counters on success.
fn try_solve_file(path: &Path, options: ParseOptions) -> Result<SearchStats, String> {
    let puzzle = format::parse_file(path, options).map_err(|e| e.to_string())?;

    if !puzzle.is_partial_valid() {
        return Err("input puzzle is invalid".to_string());
    }

    let mut solver = Solver::new(puzzle);
    let solved = solver.solve().map_err(|e| e.to_string())?;

    if !solved.is_valid() {
        return Err("solver produced an invalid solution".to_string());
    }

    Ok(solver.stats())
}

/// Helper to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<22} {value:>16}  |");
}

/// Prints a summary of parse/search statistics and memory usage.
fn print_stats(parse_time: Duration, solve_time: Duration, search: SearchStats) {
    epoch::advance().unwrap();
    let allocated = stats::allocated::mib().unwrap().read().unwrap();
    let resident = stats::resident::mib().unwrap().read().unwrap();

    println!("\n=============[ Search Statistics ]=============");
    stat_line(
        "Parse time (s)",
        format!("{:.6}", parse_time.as_secs_f64()),
    );
    stat_line(
        "Solve time (s)",
        format!("{:.6}", solve_time.as_secs_f64()),
    );
    stat_line("Trials", search.trials);
    stat_line("Backtracks", search.backtracks);
    stat_line(
        "Memory usage (MiB)",
        format!("{:.2}", allocated as f64 / (1024.0 * 1024.0)),
    );
    stat_line(
        "Resident memory (MiB)",
        format!("{:.2}", resident as f64 / (1024.0 * 1024.0)),
    );
    println!("===============================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use sudoku_solver::grid::{EXAMPLE, EXAMPLE_SOLVED};

    #[test]
    fn test_parse_options_default_skips_comments() {
        let common = CommonOptions::default();
        assert!(parse_options(&common).skip_comments);
    }

    #[test]
    fn test_parse_options_no_comments() {
        let common = CommonOptions {
            no_comments: true,
            ..CommonOptions::default()
        };
        assert!(!parse_options(&common).skip_comments);
    }

    #[test]
    fn test_end_to_end_text_pipeline() {
        // The full stdin flow against in-memory text: parse, validate,
        // solve, re-validate, render.
        let text = format!("# classic puzzle\n{}", format::render(&Grid::new(EXAMPLE)));
        let puzzle = format::parse_grid(
            Cursor::new(text),
            parse_options(&CommonOptions::default()),
        )
        .unwrap();
        assert!(puzzle.is_partial_valid());

        let mut solver = Solver::new(puzzle);
        let solved = solver.solve().unwrap();
        assert!(solved.is_valid());
        assert_eq!(format::render(&solved), format::render(&Grid::new(EXAMPLE_SOLVED)));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["sudoku-solver", "file", "--path", "puzzle.sudoku"]);
        assert!(matches!(
            cli.unwrap().command,
            Some(Commands::File { .. })
        ));

        let cli = Cli::try_parse_from(["sudoku-solver", "--stats"]).unwrap();
        assert!(cli.common.stats);
        assert!(cli.command.is_none());
    }
}
