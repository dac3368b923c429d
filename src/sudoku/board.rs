//! Mutable board state: the grid plus per-cell candidate sets.
//!
//! A [`Board`] owns its grid and candidate map and borrows the shared
//! [`PeerTable`]. Each search branch works on its own deep copy (grid and
//! candidates; never the peer table), so sibling branches cannot observe one
//! another's mutations.
//!
//! [`Board::assign`] is the forward-checking mechanism: committing one digit
//! removes it from every peer's candidate set, and any peer collapsing to a
//! single candidate is committed in turn. The cascade runs on an explicit
//! work-stack, so its depth is independent of how many cells it forces.

use crate::sudoku::candidates::{CandidateSet, Digit};
use crate::sudoku::cell::{CELL_COUNT, Cell};
use crate::sudoku::grid::Grid;
use crate::sudoku::topology::{PEER_COUNT, PeerTable};
use rustc_hash::FxHashSet;
use smallvec::{SmallVec, smallvec};
use std::fmt;

/// Marker error: the current board state cannot satisfy the constraints.
///
/// Recovered locally by discarding the board; never surfaced past the
/// top-level solve entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contradiction;

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "board state is contradictory")
    }
}

impl std::error::Error for Contradiction {}

/// Candidate sets for the still-unknown cells, indexed by flat cell index.
///
/// A cell has an entry iff its grid value is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMap {
    sets: [Option<CandidateSet>; CELL_COUNT],
    len: usize,
}

impl CandidateMap {
    fn empty() -> Self {
        Self {
            sets: [None; CELL_COUNT],
            len: 0,
        }
    }

    /// The candidate set of `cell`, or `None` if the cell is already fixed.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<CandidateSet> {
        self.sets[cell.index()]
    }

    /// Number of unknown cells remaining.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no unknown cells remain.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over `(cell, candidate set)` pairs in flat index order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, CandidateSet)> + '_ {
        self.sets
            .iter()
            .enumerate()
            .filter_map(|(i, set)| set.map(|s| (Cell::from_index(i), s)))
    }

    fn insert(&mut self, cell: Cell, set: CandidateSet) {
        if self.sets[cell.index()].replace(set).is_none() {
            self.len += 1;
        }
    }

    fn remove(&mut self, cell: Cell) -> Option<CandidateSet> {
        let prev = self.sets[cell.index()].take();
        if prev.is_some() {
            self.len -= 1;
        }
        prev
    }

    fn get_mut(&mut self, cell: Cell) -> Option<&mut CandidateSet> {
        self.sets[cell.index()].as_mut()
    }
}

/// One board state: a grid, the candidate map for its unknown cells, and a
/// reference to the shared peer table.
///
/// Cloning a board deep-copies the grid and candidates; the peer table is
/// shared across all clones for the lifetime of the puzzle.
#[derive(Debug, Clone)]
pub struct Board<'a> {
    grid: Grid,
    candidates: CandidateMap,
    peers: &'a PeerTable,
}

impl<'a> Board<'a> {
    /// Creates a board from an input grid.
    ///
    /// Every 0-cell starts with the full candidate set `{1..9}`; fixed cells
    /// have no entry. No pruning happens here — that is propagation's job.
    #[must_use]
    pub fn new(grid: Grid, peers: &'a PeerTable) -> Self {
        let mut candidates = CandidateMap::empty();
        for cell in Cell::all() {
            if grid.get(cell) == 0 {
                candidates.insert(cell, CandidateSet::FULL);
            }
        }
        Self {
            grid,
            candidates,
            peers,
        }
    }

    /// The current grid.
    #[must_use]
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Consumes the board, returning its grid.
    #[must_use]
    pub const fn into_grid(self) -> Grid {
        self.grid
    }

    /// The candidate map for the still-unknown cells.
    #[must_use]
    pub const fn candidates(&self) -> &CandidateMap {
        &self.candidates
    }

    /// The 20 peers of `cell`.
    ///
    /// The returned slice borrows the shared peer table, not this board, so
    /// it stays usable while the board is being mutated.
    #[must_use]
    pub fn peers(&self, cell: Cell) -> &'a [Cell; PEER_COUNT] {
        self.peers.peers(cell)
    }

    /// The fixed digit at `cell`, or `None` if it is still unknown.
    #[must_use]
    pub fn digit(&self, cell: Cell) -> Option<Digit> {
        self.grid.digit(cell)
    }

    /// Iterates over the still-unknown cells in flat index order.
    pub fn unknown_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.candidates.iter().map(|(cell, _)| cell)
    }

    /// True iff no unknown cells remain.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Checks the board for contradictions.
    ///
    /// False if any candidate set is empty, or if any row, column, or box
    /// holds the same nonzero digit twice. Repeated zeros are unknowns, not
    /// conflicts.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.candidates.iter().any(|(_, set)| set.is_empty()) {
            return false;
        }

        for i in 0..9u8 {
            if !self.unit_is_valid((0..9).map(|col| Cell::new(col, i)))
                || !self.unit_is_valid((0..9).map(|row| Cell::new(i, row)))
                || !self.unit_is_valid(box_cells(i))
            {
                return false;
            }
        }

        true
    }

    fn unit_is_valid(&self, cells: impl Iterator<Item = Cell>) -> bool {
        let mut seen = FxHashSet::default();
        cells
            .filter_map(|cell| self.digit(cell))
            .all(|digit| seen.insert(digit))
    }

    /// Removes `digit` from the candidate set of `cell`, returning whether
    /// the set changed. Does nothing for fixed cells.
    pub(crate) fn remove_candidate(&mut self, cell: Cell, digit: Digit) -> bool {
        self.candidates
            .get_mut(cell)
            .is_some_and(|set| set.remove(digit))
    }

    /// Commits `digit` into the grid and drops the cell's candidate entry.
    ///
    /// No cascade: peers keep their candidate sets. Used by propagation,
    /// which handles re-enqueueing itself.
    pub(crate) fn commit(&mut self, cell: Cell, digit: Digit) {
        self.grid.set(cell, digit);
        self.candidates.remove(cell);
    }

    /// Assigns `digit` to `cell` and cascades the consequences.
    ///
    /// Fails if `cell` is not unknown or `digit` is not one of its
    /// candidates. On success the digit is committed and removed from every
    /// unknown peer's set; a peer left with no candidates fails the whole
    /// assignment, and a peer left with exactly one candidate is queued and
    /// committed the same way. A fixed peer already holding `digit` is a
    /// clash and also fails.
    ///
    /// Returns the number of cells committed (the assigned cell plus every
    /// forced one). On `Err` the board is partially mutated and must be
    /// discarded by the caller.
    pub fn assign(&mut self, cell: Cell, digit: Digit) -> Result<usize, Contradiction> {
        match self.candidates.get(cell) {
            Some(set) if set.contains(digit) => {}
            _ => return Err(Contradiction),
        }

        let mut pending: SmallVec<[(Cell, Digit); 16]> = smallvec![(cell, digit)];
        let mut committed = 0;

        while let Some((cell, digit)) = pending.pop() {
            if self.candidates.get(cell).is_none() {
                // Fixed by an earlier forced commit in this same cascade.
                if self.digit(cell) == Some(digit) {
                    continue;
                }
                return Err(Contradiction);
            }

            self.commit(cell, digit);
            committed += 1;

            for &peer in self.peers.peers(cell) {
                match self.candidates.get_mut(peer) {
                    Some(set) => {
                        if set.remove(digit) {
                            match set.sole() {
                                _ if set.is_empty() => return Err(Contradiction),
                                Some(forced) => pending.push((peer, forced)),
                                None => {}
                            }
                        }
                    }
                    None => {
                        if self.digit(peer) == Some(digit) {
                            return Err(Contradiction);
                        }
                    }
                }
            }
        }

        Ok(committed)
    }
}

/// The cells of box `b` (0..=8, row-major), in row-major order.
pub(crate) fn box_cells(b: u8) -> impl Iterator<Item = Cell> {
    let base_col = (b % 3) * 3;
    let base_row = (b / 3) * 3;
    (0..9u8).map(move |i| Cell::new(base_col + i % 3, base_row + i / 3))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    const EMPTY: &str = "\
        .........\n.........\n.........\n.........\n.........\n\
        .........\n.........\n.........\n.........\n";

    #[test]
    fn test_initial_candidates() {
        let peers = PeerTable::new();
        let g = grid(
            "53..7....\n6..195...\n.98....6.\n8...6...3\n4..8.3..1\n\
             7...2...6\n.6....28.\n...419..5\n....8..79",
        );
        let board = Board::new(g, &peers);

        // Fixed cells have no entry; unknown cells start with the full set.
        assert_eq!(board.candidates().get(Cell::new(0, 0)), None);
        assert_eq!(
            board.candidates().get(Cell::new(2, 0)),
            Some(CandidateSet::FULL)
        );
        assert_eq!(board.candidates().len(), 51);
        assert!(!board.is_finished());
    }

    #[test]
    fn test_finished_board_has_empty_map() {
        let peers = PeerTable::new();
        let g = grid(
            "534678912\n672195348\n198342567\n859761423\n426853791\n\
             713924856\n961537284\n287419635\n345286179",
        );
        let board = Board::new(g, &peers);
        assert!(board.is_finished());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_consistency_rejects_row_duplicate() {
        let peers = PeerTable::new();
        let mut rows = [[0i8; 9]; 9];
        rows[4][0] = 7;
        rows[4][8] = 7;
        let board = Board::new(Grid::new(rows), &peers);
        assert!(!board.is_consistent());
    }

    #[test]
    fn test_consistency_rejects_column_duplicate() {
        let peers = PeerTable::new();
        let mut rows = [[0i8; 9]; 9];
        rows[0][3] = 2;
        rows[8][3] = 2;
        let board = Board::new(Grid::new(rows), &peers);
        assert!(!board.is_consistent());
    }

    #[test]
    fn test_consistency_rejects_box_duplicate() {
        let peers = PeerTable::new();
        let mut rows = [[0i8; 9]; 9];
        rows[0][0] = 1;
        rows[2][2] = 1;
        let board = Board::new(Grid::new(rows), &peers);
        assert!(!board.is_consistent());
    }

    #[test]
    fn test_consistency_accepts_repeated_zeros() {
        let peers = PeerTable::new();
        let board = Board::new(grid(EMPTY), &peers);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_consistency_rejects_empty_candidate_set() {
        let peers = PeerTable::new();
        let mut board = Board::new(grid(EMPTY), &peers);
        for d in 1..=9 {
            board.remove_candidate(Cell::new(4, 4), d);
        }
        assert!(!board.is_consistent());
    }

    #[test]
    fn test_assign_prunes_peers() {
        let peers = PeerTable::new();
        let mut board = Board::new(grid(EMPTY), &peers);
        let cell = Cell::new(0, 0);

        assert_eq!(board.assign(cell, 5), Ok(1));
        assert_eq!(board.digit(cell), Some(5));
        assert_eq!(board.candidates().get(cell), None);

        for &peer in peers.peers(cell) {
            let set = board.candidates().get(peer).unwrap();
            assert!(!set.contains(5), "peer {peer} still has 5 as candidate");
            assert_eq!(set.len(), 8);
        }

        // Unrelated cells are untouched.
        assert_eq!(
            board.candidates().get(Cell::new(4, 4)),
            Some(CandidateSet::FULL)
        );
    }

    #[test]
    fn test_assign_rejects_fixed_cell() {
        let peers = PeerTable::new();
        let mut board = Board::new(grid(EMPTY), &peers);
        board.assign(Cell::new(0, 0), 5).unwrap();
        assert_eq!(board.assign(Cell::new(0, 0), 5), Err(Contradiction));
    }

    #[test]
    fn test_assign_rejects_non_candidate() {
        let peers = PeerTable::new();
        let mut board = Board::new(grid(EMPTY), &peers);
        board.remove_candidate(Cell::new(1, 1), 3);
        assert_eq!(board.assign(Cell::new(1, 1), 3), Err(Contradiction));
    }

    #[test]
    fn test_assign_cascades_forced_cells() {
        let peers = PeerTable::new();
        let mut board = Board::new(grid(EMPTY), &peers);

        // Narrow (8, 0) down to {4, 9}; assigning 4 elsewhere in its row
        // must force 9 into it transitively.
        let target = Cell::new(8, 0);
        for d in 1..=9 {
            if d != 4 && d != 9 {
                board.remove_candidate(target, d);
            }
        }

        let committed = board.assign(Cell::new(0, 0), 4).unwrap();
        assert_eq!(committed, 2);
        assert_eq!(board.digit(target), Some(9));
    }

    #[test]
    fn test_assign_fails_on_emptied_peer() {
        let peers = PeerTable::new();
        let mut board = Board::new(grid(EMPTY), &peers);

        // Leave (8, 0) with only {4}; assigning 4 in the same row empties it.
        let target = Cell::new(8, 0);
        for d in 1..=9 {
            if d != 4 {
                board.remove_candidate(target, d);
            }
        }

        assert_eq!(board.assign(Cell::new(0, 0), 4), Err(Contradiction));
    }

    #[test]
    fn test_assign_detects_fixed_peer_clash() {
        let peers = PeerTable::new();
        let mut rows = [[0i8; 9]; 9];
        rows[0][8] = 6;
        let mut board = Board::new(Grid::new(rows), &peers);

        // (8, 0) is fixed to 6, but 6 is still a candidate of (0, 0) because
        // no pruning has run. Assigning it must detect the clash.
        assert_eq!(board.assign(Cell::new(0, 0), 6), Err(Contradiction));
    }

    #[test]
    fn test_assign_leaves_prior_fixed_cells_untouched() {
        let peers = PeerTable::new();
        let g = grid(
            "53..7....\n6..195...\n.98....6.\n8...6...3\n4..8.3..1\n\
             7...2...6\n.6....28.\n...419..5\n....8..79",
        );
        let mut board = Board::new(g, &peers);

        let fixed: Vec<(Cell, Digit)> = Cell::all()
            .filter_map(|c| board.digit(c).map(|d| (c, d)))
            .collect();

        // Force (2, 0) down to a sole candidate and assign exactly it.
        let target = Cell::new(2, 0);
        for d in 1..=9 {
            if d != 4 {
                board.remove_candidate(target, d);
            }
        }
        board.assign(target, 4).unwrap();

        for (cell, digit) in fixed {
            assert_eq!(board.digit(cell), Some(digit));
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let peers = PeerTable::new();
        let mut board = Board::new(grid(EMPTY), &peers);
        let snapshot = board.clone();

        board.assign(Cell::new(0, 0), 1).unwrap();

        assert_eq!(snapshot.digit(Cell::new(0, 0)), None);
        assert_eq!(
            snapshot.candidates().get(Cell::new(1, 0)),
            Some(CandidateSet::FULL)
        );
    }

    #[test]
    fn test_box_cells() {
        let cells: Vec<Cell> = box_cells(4).collect();
        assert_eq!(cells.len(), 9);
        assert!(cells.contains(&Cell::new(3, 3)));
        assert!(cells.contains(&Cell::new(5, 5)));
        assert!(!cells.contains(&Cell::new(2, 3)));
    }
}
