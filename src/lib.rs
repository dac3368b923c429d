#![deny(missing_docs)]
//! A Sudoku solver combining constraint propagation with heuristic
//! backtracking search.
//!
//! The core entry point is [`sudoku::solver::solve`], which takes a
//! [`Grid`](sudoku::grid::Grid) and returns either the solved grid or an
//! all `-1` sentinel grid when the puzzle is invalid or unsolvable.

/// The `sudoku` module contains the solver and its supporting types.
pub mod sudoku;
