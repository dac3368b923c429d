//! Constraint propagation: arc consistency against known peer values.
//!
//! A worklist of unknown cells is drained to a fixpoint. For each popped
//! cell, every value already fixed among its peers is removed from its
//! candidate set; a set that collapses to a single digit is committed and
//! the cell's still-unknown peers are re-enqueued. This is a deliberately
//! simplified AC-3: it only uses "peer has a known value" constraints, so
//! it does not catch everything (naked pairs, hidden singles) — whatever is
//! left over is the search engine's problem, including inconsistency: the
//! pass never fails, callers check [`Board::is_consistent`] afterwards.

use crate::sudoku::board::Board;
use crate::sudoku::cell::{CELL_COUNT, Cell};
use bit_vec::BitVec;
use std::collections::VecDeque;

/// Ordering strategy for the propagation worklist.
///
/// The fixpoint is the same whichever order cells are processed in; the
/// strategy only changes how quickly it is reached.
pub trait Worklist: Default {
    /// Adds a cell to the worklist.
    fn push(&mut self, cell: Cell);
    /// Removes and returns the next cell, or `None` at the fixpoint.
    fn pop(&mut self) -> Option<Cell>;
}

/// First-in first-out worklist. The default.
#[derive(Debug, Clone, Default)]
pub struct FifoWorklist(VecDeque<Cell>);

impl Worklist for FifoWorklist {
    fn push(&mut self, cell: Cell) {
        self.0.push_back(cell);
    }

    fn pop(&mut self) -> Option<Cell> {
        self.0.pop_front()
    }
}

/// Last-in first-out worklist.
#[derive(Debug, Clone, Default)]
pub struct LifoWorklist(Vec<Cell>);

impl Worklist for LifoWorklist {
    fn push(&mut self, cell: Cell) {
        self.0.push(cell);
    }

    fn pop(&mut self) -> Option<Cell> {
        self.0.pop()
    }
}

/// Runs propagation to its fixpoint, returning the number of cells
/// committed along the way.
///
/// The worklist is seeded with every unknown cell and duplicate entries are
/// suppressed with a per-cell membership bit.
pub fn propagate<W: Worklist>(board: &mut Board<'_>) -> usize {
    let mut worklist = W::default();
    let mut queued = BitVec::from_elem(CELL_COUNT, false);

    for cell in board.unknown_cells().collect::<Vec<_>>() {
        worklist.push(cell);
        queued.set(cell.index(), true);
    }

    let mut committed = 0;

    while let Some(cell) = worklist.pop() {
        queued.set(cell.index(), false);

        let Some(mut set) = board.candidates().get(cell) else {
            continue;
        };

        let mut changed = false;
        for &peer in board.peers(cell) {
            let Some(digit) = board.digit(peer) else {
                continue;
            };
            if set.remove(digit) {
                board.remove_candidate(cell, digit);
                changed = true;
            }
        }

        if !changed {
            continue;
        }

        if let Some(digit) = set.sole() {
            board.commit(cell, digit);
            committed += 1;

            // The commitment tightens every remaining peer.
            for &peer in board.peers(cell) {
                if board.candidates().get(peer).is_some() && !queued[peer.index()] {
                    worklist.push(peer);
                    queued.set(peer.index(), true);
                }
            }
        }
    }

    committed
}
