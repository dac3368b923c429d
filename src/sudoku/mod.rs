//! Sudoku solving: constraint propagation plus backtracking search.
//!
//! The solver works on a 9x9 [`Grid`](grid::Grid) of values where `0` marks
//! an unknown cell. [`solver::solve`] returns the solved grid, or a grid of
//! `-1` when the puzzle is invalid or has no solution.

/// Board state: the grid plus candidate sets, and forward-checking assignment.
pub mod board;

/// Candidate digit sets, stored as 9-bit masks.
pub mod candidates;

/// Cell coordinates and the flat 0..81 index space.
pub mod cell;

/// The 9x9 value grid, parsing, and printing.
pub mod grid;

/// Worklist-driven candidate propagation.
pub mod propagation;

/// Heuristics for choosing the cell to branch on.
pub mod selection;

/// The backtracking search engine and the top-level solve entry point.
pub mod solver;

/// The precomputed peer relation between cells.
pub mod topology;
