//! # `sudoku_solver`
//!
//! `sudoku_solver` is a configurable command-line Sudoku solver. It combines
//! constraint propagation with heuristic backtracking search: propagation
//! prunes candidate digits against already-known peers, and the search
//! branches on the most constrained cell when pruning alone is not enough.
//!
//! ## Features
//!
//! -   **Multiple Input Forms**:
//!     -   Puzzle files (81 cells, `0` or `.` for blanks, whitespace ignored)
//!     -   Puzzles as plain text on the command line
//!     -   Directories of `.sudoku` files
//! -   **Configurable Strategies**: Choose the cell-selection heuristic
//!     (`mrv`, `first`, `random`) and the propagation worklist order
//!     (`fifo`, `lifo`).
//! -   **Statistics**: Decisions, propagations, contradictions, timings, and
//!     memory usage for each solve.
//! -   **Memory Management**: Uses `tikv-jemallocator` for memory allocation
//!     and provides memory usage statistics.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a puzzle file
//! sudoku_solver puzzle.sudoku
//!
//! # Solve a puzzle given as text, branching on the first unknown cell
//! sudoku_solver text --input "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79" --selection first
//!
//! # Solve every .sudoku file under a directory
//! sudoku_solver dir --path puzzles/
//!
//! # Generate shell completions
//! sudoku_solver completions bash
//! ```
//!
//! Unsolvable or invalid puzzles are reported with a grid of `x` cells.

use crate::command_line::cli::{Cli, Commands, solve_dir, solve_file, solve_text};
use clap::{CommandFactory, Parser};

mod command_line;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Main entry point of the sudoku solver application.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and manages the overall execution flow.
fn main() {
    let cli = Cli::parse();

    // Handle the case where a path is provided globally without a
    // subcommand: a directory is walked, anything else is solved as a file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            let result = if path.is_dir() {
                solve_dir(&path, &cli.common)
            } else {
                solve_file(&path, &cli.common)
            };

            if let Err(e) = result {
                eprintln!("{e}");
                std::process::exit(1);
            }
            return;
        }
    }

    let result = match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),
        Some(Commands::Text { input, common }) => solve_text(&input, &common),
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
