//! Branch-cell selection heuristics for the search engine.
//!
//! The engine branches on exactly one unknown cell per search node; the
//! heuristic decides which. [`MinimumRemaining`] is the default and the only
//! one callers normally want — branching on the most constrained cell keeps
//! the branching factor small.

use crate::sudoku::board::Board;
use crate::sudoku::cell::Cell;

/// Strategy for picking the unknown cell to branch on.
pub trait CellSelection {
    /// Creates the selector.
    fn new() -> Self;

    /// Picks an unknown cell, or `None` if the board is finished.
    fn pick(&mut self, board: &Board<'_>) -> Option<Cell>;
}

/// Minimum-remaining-values: the unknown cell with the fewest candidates.
///
/// Ties are broken by lowest flat cell index, so selection is deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimumRemaining;

impl CellSelection for MinimumRemaining {
    fn new() -> Self {
        Self
    }

    fn pick(&mut self, board: &Board<'_>) -> Option<Cell> {
        board
            .candidates()
            .iter()
            .min_by_key(|&(cell, set)| (set.len(), cell.index()))
            .map(|(cell, _)| cell)
    }
}

/// First unknown cell in flat index order. Mostly useful as a baseline to
/// measure MRV against.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstUnknown;

impl CellSelection for FirstUnknown {
    fn new() -> Self {
        Self
    }

    fn pick(&mut self, board: &Board<'_>) -> Option<Cell> {
        board.unknown_cells().next()
    }
}

/// A uniformly random unknown cell. Non-deterministic between runs.
#[derive(Debug, Clone)]
pub struct RandomChoice(fastrand::Rng);

impl CellSelection for RandomChoice {
    fn new() -> Self {
        Self(fastrand::Rng::new())
    }

    fn pick(&mut self, board: &Board<'_>) -> Option<Cell> {
        let unknown: Vec<Cell> = board.unknown_cells().collect();
        if unknown.is_empty() {
            None
        } else {
            Some(unknown[self.0.usize(..unknown.len())])
        }
    }
}
