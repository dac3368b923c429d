//! The solving engine: propagation-first backtracking search.
//!
//! Each search node first runs candidate propagation to a fixpoint, then
//! checks consistency, and only branches when cells remain unknown. Branches
//! clone the board, so a failed subtree is discarded wholesale rather than
//! undone move by move.

use crate::sudoku::board::Board;
use crate::sudoku::grid::Grid;
use crate::sudoku::propagation::{FifoWorklist, Worklist, propagate};
use crate::sudoku::selection::{CellSelection, MinimumRemaining};
use crate::sudoku::topology::PeerTable;
use std::marker::PhantomData;

/// Counters accumulated over one solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Branch decisions taken by the search.
    pub decisions: u64,
    /// Cells committed by propagation and forced cascades.
    pub propagations: u64,
    /// Dead ends abandoned.
    pub contradictions: u64,
}

/// The search engine, generic over cell selection and worklist order.
///
/// The defaults are the ones to use; the other strategies exist for
/// comparison. Construct with a type annotation to pick the defaults:
///
/// ```
/// use sudoku_solver::sudoku::grid::Grid;
/// use sudoku_solver::sudoku::solver::Engine;
/// use sudoku_solver::sudoku::topology::PeerTable;
///
/// let peers = PeerTable::new();
/// let mut engine: Engine = Engine::new(&peers);
/// assert!(engine.solve(Grid::new([[0; 9]; 9])).is_some());
/// ```
#[derive(Debug)]
pub struct Engine<'a, S: CellSelection = MinimumRemaining, W: Worklist = FifoWorklist> {
    peers: &'a PeerTable,
    selector: S,
    stats: SearchStats,
    worklist: PhantomData<W>,
}

impl<'a, S: CellSelection, W: Worklist> Engine<'a, S, W> {
    /// Creates an engine over the given peer table.
    #[must_use]
    pub fn new(peers: &'a PeerTable) -> Self {
        Self {
            peers,
            selector: S::new(),
            stats: SearchStats::default(),
            worklist: PhantomData,
        }
    }

    /// Counters from the most recent [`solve`](Self::solve) call.
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Solves `grid`, returning the first solution found or `None` if the
    /// input is inconsistent or unsolvable.
    pub fn solve(&mut self, grid: Grid) -> Option<Grid> {
        self.stats = SearchStats::default();

        let board = Board::new(grid, self.peers);
        // A duplicate in the input is rejected up front, before any work.
        if !board.is_consistent() {
            return None;
        }

        self.search(board)
    }

    fn search(&mut self, mut board: Board<'a>) -> Option<Grid> {
        self.stats.propagations += propagate::<W>(&mut board) as u64;

        if !board.is_consistent() {
            self.stats.contradictions += 1;
            return None;
        }

        if board.is_finished() {
            return Some(board.into_grid());
        }

        let cell = self.selector.pick(&board)?;
        let set = board.candidates().get(cell)?;

        for digit in set.iter() {
            self.stats.decisions += 1;

            let mut branch = board.clone();
            match branch.assign(cell, digit) {
                Ok(committed) => self.stats.propagations += committed as u64,
                Err(_) => {
                    self.stats.contradictions += 1;
                    continue;
                }
            }

            if let Some(solution) = self.search(branch) {
                return Some(solution);
            }
        }

        None
    }
}

/// Solves a puzzle with the default strategies.
///
/// Returns the solved grid, or the all `-1` [sentinel](Grid::sentinel) when
/// the input breaks a row, column, or box constraint or no solution exists.
#[must_use]
pub fn solve(grid: Grid) -> Grid {
    let peers = PeerTable::new();
    let mut engine: Engine = Engine::new(&peers);
    engine.solve(grid).unwrap_or_else(Grid::sentinel)
}
