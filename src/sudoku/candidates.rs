//! Candidate sets: which digits a still-unknown cell could legally hold.
//!
//! A [`CandidateSet`] is a 9-bit mask over the digits 1..=9. Iteration order
//! is ascending digit, which keeps the search deterministic.

use std::fmt;

/// A sudoku digit, `1..=9`.
pub type Digit = u8;

/// The set of digits a cell could still hold, stored as a bitmask.
///
/// Bit `d - 1` is set iff digit `d` is a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CandidateSet(u16);

impl CandidateSet {
    /// The empty set. An unknown cell with this set is a contradiction.
    pub const EMPTY: Self = Self(0);

    /// The full set `{1..9}`, the starting point for every unknown cell.
    pub const FULL: Self = Self(0x1FF);

    const fn mask(digit: Digit) -> u16 {
        debug_assert!(digit >= 1 && digit <= 9);
        1 << (digit - 1)
    }

    /// Whether `digit` is a member.
    #[must_use]
    pub const fn contains(self, digit: Digit) -> bool {
        self.0 & Self::mask(digit) != 0
    }

    /// Adds `digit` to the set.
    pub const fn insert(&mut self, digit: Digit) {
        self.0 |= Self::mask(digit);
    }

    /// Removes `digit` from the set, returning whether it was present.
    pub const fn remove(&mut self, digit: Digit) -> bool {
        let present = self.contains(digit);
        self.0 &= !Self::mask(digit);
        present
    }

    /// Number of digits in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set has no members.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The sole member, if the set has exactly one.
    #[must_use]
    pub const fn sole(self) -> Option<Digit> {
        if self.0.count_ones() == 1 {
            Some(self.0.trailing_zeros() as Digit + 1)
        } else {
            None
        }
    }

    /// Iterates over the members in ascending digit order.
    pub fn iter(self) -> impl Iterator<Item = Digit> {
        (1..=9).filter(move |&d| self.contains(d))
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, d) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_has_all_nine() {
        let set = CandidateSet::FULL;
        assert_eq!(set.len(), 9);
        for d in 1..=9 {
            assert!(set.contains(d));
        }
    }

    #[test]
    fn test_insert_and_remove() {
        let mut set = CandidateSet::EMPTY;
        set.insert(4);
        set.insert(9);
        assert!(set.contains(4));
        assert!(set.contains(9));
        assert!(!set.contains(1));
        assert_eq!(set.len(), 2);

        assert!(set.remove(4));
        assert!(!set.remove(4));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_sole() {
        let mut set = CandidateSet::FULL;
        assert_eq!(set.sole(), None);

        for d in 1..=8 {
            set.remove(d);
        }
        assert_eq!(set.sole(), Some(9));

        set.remove(9);
        assert_eq!(set.sole(), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_iter_is_ascending() {
        let mut set = CandidateSet::EMPTY;
        set.insert(7);
        set.insert(2);
        set.insert(5);
        let digits: Vec<Digit> = set.iter().collect();
        assert_eq!(digits, vec![2, 5, 7]);
    }

    #[test]
    fn test_display() {
        let mut set = CandidateSet::EMPTY;
        set.insert(3);
        set.insert(8);
        assert_eq!(set.to_string(), "{3,8}");
    }
}
