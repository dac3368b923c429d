//! The 9x9 grid of cell values.
//!
//! `0` marks an unknown cell, `1..=9` a fixed or solved digit. The all `-1`
//! grid is the sentinel returned when a puzzle is invalid or unsolvable; it
//! never appears as solver input.

use crate::sudoku::candidates::Digit;
use crate::sudoku::cell::Cell;
use std::fmt;
use std::str::FromStr;

/// A 9x9 grid of cell values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid([[i8; 9]; 9]);

impl Grid {
    /// Creates a grid from raw rows. Values must be in `0..=9`; this is a
    /// precondition on the caller and is not validated here.
    #[must_use]
    pub const fn new(rows: [[i8; 9]; 9]) -> Self {
        Self(rows)
    }

    /// The sentinel grid, filled entirely with `-1`.
    ///
    /// Returned by [`solve`](crate::sudoku::solver::solve) when the input is
    /// inconsistent or no solution exists.
    #[must_use]
    pub const fn sentinel() -> Self {
        Self([[-1; 9]; 9])
    }

    /// The value at `cell`: `0` for unknown, `1..=9` for a fixed digit.
    #[must_use]
    pub const fn get(self, cell: Cell) -> i8 {
        self.0[cell.row() as usize][cell.col() as usize]
    }

    /// The fixed digit at `cell`, or `None` if the cell is unknown.
    #[must_use]
    pub fn digit(self, cell: Cell) -> Option<Digit> {
        u8::try_from(self.get(cell)).ok().filter(|&d| d != 0)
    }

    /// Writes a digit into the grid.
    pub(crate) const fn set(&mut self, cell: Cell, digit: Digit) {
        self.0[cell.row() as usize][cell.col() as usize] = digit as i8;
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[i8; 9]> {
        self.0.iter()
    }
}

impl From<[[i8; 9]; 9]> for Grid {
    fn from(rows: [[i8; 9]; 9]) -> Self {
        Self::new(rows)
    }
}

impl From<Grid> for [[i8; 9]; 9] {
    fn from(grid: Grid) -> Self {
        grid.0
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, &value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                match value {
                    0 => write!(f, ".")?,
                    1..=9 => write!(f, "{value}")?,
                    _ => write!(f, "x")?,
                }
            }
        }
        Ok(())
    }
}

/// Error returned when a textual puzzle cannot be parsed into a [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseGridError {
    /// A character other than `0..=9`, `.`, or whitespace was found.
    BadCell(char),
    /// The input did not contain exactly 81 cell values.
    WrongLength(usize),
}

impl fmt::Display for ParseGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadCell(c) => write!(f, "invalid cell character {c:?}"),
            Self::WrongLength(n) => write!(f, "expected 81 cells, found {n}"),
        }
    }
}

impl std::error::Error for ParseGridError {}

impl FromStr for Grid {
    type Err = ParseGridError;

    /// Parses 81 cell values. Digits `1..=9` are fixed cells; `0` or `.`
    /// mark unknowns. Whitespace is ignored, so one line per row, one long
    /// line, and mixed layouts all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = [[0i8; 9]; 9];
        let mut count = 0usize;

        for c in s.chars().filter(|c| !c.is_whitespace()) {
            let value = match c {
                '.' => 0,
                '0'..='9' => (c as u8 - b'0') as i8,
                other => return Err(ParseGridError::BadCell(other)),
            };
            if count >= 81 {
                return Err(ParseGridError::WrongLength(count + 1));
            }
            rows[count / 9][count % 9] = value;
            count += 1;
        }

        if count != 81 {
            return Err(ParseGridError::WrongLength(count));
        }

        Ok(Self(rows))
    }
}
