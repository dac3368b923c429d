#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use sudoku_solver::sudoku::grid::Grid;
use sudoku_solver::sudoku::propagation::{FifoWorklist, LifoWorklist, Worklist};
use sudoku_solver::sudoku::selection::{
    CellSelection, FirstUnknown, MinimumRemaining, RandomChoice,
};
use sudoku_solver::sudoku::solver::{Engine, SearchStats};
use sudoku_solver::sudoku::topology::PeerTable;
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the sudoku solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku_solver", version, about = "A configurable Sudoku solver")]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve (or a directory
    /// of `.sudoku` files).
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands for the sudoku solver.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a puzzle file.
    File {
        /// Path to the puzzle file: 81 cells, digits `1..=9` for clues and
        /// `0` or `.` for blanks, whitespace ignored.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle provided as plain text.
    Text {
        /// Literal puzzle input as a string (e.g. "53..7....6..195...").
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.sudoku` file under a directory.
    Dir {
        /// Path to the directory to walk.
        #[arg(long)]
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

/// The cell-selection heuristic to branch with.
#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectionType {
    /// Minimum remaining values: the cell with the fewest candidates.
    #[default]
    Mrv,
    /// The first unknown cell in flat index order.
    First,
    /// A uniformly random unknown cell.
    Random,
}

impl fmt::Display for SelectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mrv => write!(f, "mrv"),
            Self::First => write!(f, "first"),
            Self::Random => write!(f, "random"),
        }
    }
}

/// The propagation worklist order.
#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WorklistType {
    /// First-in first-out.
    #[default]
    Fifo,
    /// Last-in first-out.
    Lifo,
}

impl fmt::Display for WorklistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fifo => write!(f, "fifo"),
            Self::Lifo => write!(f, "lifo"),
        }
    }
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable printing of performance and search statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,

    /// Specifies the cell-selection heuristic to use.
    #[arg(long, default_value_t = SelectionType::Mrv)]
    pub(crate) selection: SelectionType,

    /// Specifies the propagation worklist order.
    #[arg(long, default_value_t = WorklistType::Fifo)]
    pub(crate) worklist: WorklistType,
}

/// Solve a puzzle file.
///
/// # Errors
///
/// If the file doesn't exist or doesn't parse as a puzzle.
pub(crate) fn solve_file(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Puzzle file does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    let time = std::time::Instant::now();
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Unable to read {}: {e}", path.display()))?;
    let grid: Grid = text
        .parse()
        .map_err(|e| format!("Error parsing {}: {e}", path.display()))?;
    let parse_time = time.elapsed();

    println!("Solving: {}", path.display());
    solve_and_report(grid, common, parse_time);
    Ok(())
}

/// Solve a puzzle given directly on the command line.
///
/// # Errors
///
/// If the input doesn't parse as a puzzle.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> Result<(), String> {
    let time = std::time::Instant::now();
    let grid: Grid = input
        .parse()
        .map_err(|e| format!("Error parsing puzzle: {e}"))?;
    let parse_time = time.elapsed();

    solve_and_report(grid, common, parse_time);
    Ok(())
}

/// Solves a directory of puzzle files.
/// This function iterates over all `.sudoku` files under the directory,
/// parses each file, solves it, and reports the results.
///
/// # Errors
///
/// If the path is not a directory or any `.sudoku` file fails to parse.
pub(crate) fn solve_dir(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!(
            "Provided path is not a directory: {}",
            path.display()
        ));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path().to_path_buf();
        if !file_path.is_file() {
            continue;
        }

        if file_path.extension().is_none_or(|ext| ext != "sudoku") {
            eprintln!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }

        solve_file(&file_path, common)?;
    }

    Ok(())
}

/// Solves a parsed grid and reports the solution and statistics.
pub(crate) fn solve_and_report(grid: Grid, common: &CommonOptions, parse_time: Duration) {
    epoch::advance().unwrap();

    let time = std::time::Instant::now();
    let (solution, search_stats) = run_engine(grid, common);
    let elapsed = time.elapsed();

    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            grid,
            &search_stats,
            allocated_mib,
            resident_mib,
        );
    }

    match solution {
        Some(solved) => println!("Solution:\n{solved}"),
        None => println!("No solution found:\n{}", Grid::sentinel()),
    }
}

/// Runs the engine matching the strategies selected on the command line.
fn run_engine(grid: Grid, common: &CommonOptions) -> (Option<Grid>, SearchStats) {
    match (common.selection, common.worklist) {
        (SelectionType::Mrv, WorklistType::Fifo) => run::<MinimumRemaining, FifoWorklist>(grid),
        (SelectionType::Mrv, WorklistType::Lifo) => run::<MinimumRemaining, LifoWorklist>(grid),
        (SelectionType::First, WorklistType::Fifo) => run::<FirstUnknown, FifoWorklist>(grid),
        (SelectionType::First, WorklistType::Lifo) => run::<FirstUnknown, LifoWorklist>(grid),
        (SelectionType::Random, WorklistType::Fifo) => run::<RandomChoice, FifoWorklist>(grid),
        (SelectionType::Random, WorklistType::Lifo) => run::<RandomChoice, LifoWorklist>(grid),
    }
}

fn run<S: CellSelection, W: Worklist>(grid: Grid) -> (Option<Grid>, SearchStats) {
    let peers = PeerTable::new();
    let mut engine: Engine<S, W> = Engine::new(&peers);
    let solution = engine.solve(grid);
    (solution, engine.stats())
}

/// Helper function to print a single statistic line in a formatted table row.
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The value of the statistic, implementing `std::fmt::Display`.
pub(crate) fn stat_line(label: &str, value: impl fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The raw count for the statistic.
/// * `elapsed` - The elapsed time in seconds, used to calculate the rate.
pub(crate) fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of puzzle and search statistics.
///
/// # Arguments
/// * `parse_time` - Duration spent parsing the input.
/// * `elapsed` - Duration spent by the solver.
/// * `grid` - The input grid.
/// * `s` - `SearchStats` collected by the engine.
/// * `allocated` - Allocated memory in MiB.
/// * `resident` - Resident memory in MiB.
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    grid: Grid,
    s: &SearchStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let clues = grid
        .rows()
        .flat_map(|row| row.iter())
        .filter(|&&v| v != 0)
        .count();

    println!("\n=======================[ Puzzle Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Clues", clues);
    stat_line("Unknown cells", 81 - clues);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line_with_rate("Contradictions", s.contradictions, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
