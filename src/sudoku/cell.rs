//! Cell coordinates on a 9x9 board.
//!
//! A [`Cell`] is a `(column, row)` pair, each in `0..=8`. Cells flatten to a
//! single index in `0..=80` (row-major), which every lookup table in this
//! crate uses instead of hashing coordinates.

use std::fmt;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 81;

/// A single cell coordinate: column and row, each in `0..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    col: u8,
    row: u8,
}

impl Cell {
    /// Creates a cell from a column and row, each in `0..=8`.
    #[must_use]
    pub const fn new(col: u8, row: u8) -> Self {
        debug_assert!(col < 9 && row < 9);
        Self { col, row }
    }

    /// Creates a cell from its flat row-major index in `0..=80`.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < CELL_COUNT);
        Self {
            col: (index % 9) as u8,
            row: (index / 9) as u8,
        }
    }

    /// The cell's column, in `0..=8`.
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// The cell's row, in `0..=8`.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// The flat row-major index of this cell, in `0..=80`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * 9 + self.col as usize
    }

    /// The index of the 3x3 box containing this cell, in `0..=8`.
    ///
    /// Boxes are numbered row-major: box 0 is the top-left, box 8 the
    /// bottom-right.
    #[must_use]
    pub const fn box_index(self) -> u8 {
        (self.row / 3) * 3 + self.col / 3
    }

    /// Iterates over all 81 cells in flat index order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..CELL_COUNT).map(Self::from_index)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}r{}", self.col, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for i in 0..CELL_COUNT {
            assert_eq!(Cell::from_index(i).index(), i);
        }
    }

    #[test]
    fn test_new_matches_from_index() {
        assert_eq!(Cell::new(0, 0), Cell::from_index(0));
        assert_eq!(Cell::new(8, 0), Cell::from_index(8));
        assert_eq!(Cell::new(0, 1), Cell::from_index(9));
        assert_eq!(Cell::new(8, 8), Cell::from_index(80));
    }

    #[test]
    fn test_box_index() {
        assert_eq!(Cell::new(0, 0).box_index(), 0);
        assert_eq!(Cell::new(2, 2).box_index(), 0);
        assert_eq!(Cell::new(3, 0).box_index(), 1);
        assert_eq!(Cell::new(8, 2).box_index(), 2);
        assert_eq!(Cell::new(4, 4).box_index(), 4);
        assert_eq!(Cell::new(8, 8).box_index(), 8);
        assert_eq!(Cell::new(0, 6).box_index(), 6);
    }

    #[test]
    fn test_all_yields_every_cell_once() {
        let cells: Vec<Cell> = Cell::all().collect();
        assert_eq!(cells.len(), CELL_COUNT);
        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(cell.index(), i);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::new(3, 7).to_string(), "c3r7");
    }
}
