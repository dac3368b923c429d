//! Board topology: the fixed peer relation between cells.
//!
//! Every cell constrains the 20 other cells sharing its row, column, or 3x3
//! box. That relation is identical for every 9x9 puzzle, so it is computed
//! once per solver invocation and shared read-only (by reference) across all
//! board states derived from the same puzzle.

use crate::sudoku::cell::{CELL_COUNT, Cell};
use itertools::iproduct;

/// Peers per cell: 8 in the row, 8 in the column, 4 more in the box.
pub const PEER_COUNT: usize = 20;

/// Precomputed peer sets for all 81 cells, indexed by flat cell index.
///
/// An indexed array rather than a map keyed by coordinate: the cell space is
/// dense and fixed, so a flat table is both the clearest and the fastest
/// representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerTable(Box<[[Cell; PEER_COUNT]; CELL_COUNT]>);

impl PeerTable {
    /// Builds the peer table.
    #[must_use]
    pub fn new() -> Self {
        let mut table = Box::new([[Cell::default(); PEER_COUNT]; CELL_COUNT]);

        for cell in Cell::all() {
            let mut n = 0;
            for (col, row) in iproduct!(0..9u8, 0..9u8) {
                let other = Cell::new(col, row);
                if other != cell && Self::related(cell, other) {
                    table[cell.index()][n] = other;
                    n += 1;
                }
            }
            debug_assert_eq!(n, PEER_COUNT);
        }

        Self(table)
    }

    /// The 20 peers of `cell`, excluding `cell` itself.
    #[must_use]
    pub fn peers(&self, cell: Cell) -> &[Cell; PEER_COUNT] {
        &self.0[cell.index()]
    }

    const fn related(a: Cell, b: Cell) -> bool {
        a.row() == b.row() || a.col() == b.col() || a.box_index() == b.box_index()
    }
}

impl Default for PeerTable {
    fn default() -> Self {
        Self::new()
    }
}
