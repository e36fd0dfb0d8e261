//! Logical sentences about the board.
//!
//! A `Sentence` states: exactly `count` of the cells in `cells` are mines.
//! Example: `{(1,1), (1,2), (2,1)} = 1`. Sentences only ever contain cells
//! whose mine status is unknown; as cells become known safe or known mine
//! they are removed (see `mark_safe` / `mark_mine`).

use crate::types::Cell;
use std::collections::HashSet;
use std::fmt;

/// A constraint over a set of cells: exactly `count` of them are mines.
///
/// Invariant: `count <= cells.len()` at all times. A violation means the
/// caller fed an impossible adjacent-mine count, which is a logic bug
/// upstream, not a recoverable condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    cells: HashSet<Cell>,
    count: usize,
}

impl Sentence {
    pub fn new(cells: HashSet<Cell>, count: usize) -> Self {
        debug_assert!(count <= cells.len(), "sentence count exceeds cell set");
        Self { cells, count }
    }

    #[inline(always)]
    pub fn cells(&self) -> &HashSet<Cell> {
        &self.cells
    }

    #[inline(always)]
    pub fn count(&self) -> usize {
        self.count
    }

    /// True once every cell has been resolved out of the sentence.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// If every remaining cell must be a mine (`count == |cells|`),
    /// returns the full cell set. Otherwise the sentence is inconclusive.
    pub fn known_mines(&self) -> Option<&HashSet<Cell>> {
        if self.cells.len() == self.count {
            Some(&self.cells)
        } else {
            None
        }
    }

    /// If no remaining cell can be a mine (`count == 0`), returns the
    /// full cell set. Otherwise the sentence is inconclusive.
    pub fn known_safes(&self) -> Option<&HashSet<Cell>> {
        if self.count == 0 {
            Some(&self.cells)
        } else {
            None
        }
    }

    /// Record that `cell` is a mine: drop it from the set and decrement
    /// the count (one fewer unknown, one mine accounted for). No-op if
    /// the cell is not a member.
    pub fn mark_mine(&mut self, cell: Cell) {
        if self.cells.remove(&cell) {
            debug_assert!(self.count > 0, "mine marked in a zero-count sentence");
            self.count -= 1;
        }
    }

    /// Record that `cell` is safe: drop it from the set, count unchanged
    /// (a safe cell never contributed to the mine tally). No-op if the
    /// cell is not a member.
    pub fn mark_safe(&mut self, cell: Cell) {
        self.cells.remove(&cell);
        debug_assert!(self.count <= self.cells.len());
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cells: Vec<Cell> = self.cells.iter().copied().collect();
        cells.sort();
        write!(f, "{{")?;
        for (i, c) in cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({},{})", c.row, c.col)?;
        }
        write!(f, "}} = {}", self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(pairs: &[(usize, usize)]) -> HashSet<Cell> {
        pairs.iter().map(|&(r, c)| Cell::new(r, c)).collect()
    }

    #[test]
    fn test_known_mines_full_count() {
        let s = Sentence::new(cells(&[(0, 0), (0, 1)]), 2);
        assert_eq!(s.known_mines(), Some(&cells(&[(0, 0), (0, 1)])));
        assert_eq!(s.known_safes(), None);
    }

    #[test]
    fn test_known_safes_zero_count() {
        let s = Sentence::new(cells(&[(0, 0), (0, 1), (1, 1)]), 0);
        assert_eq!(s.known_safes(), Some(&cells(&[(0, 0), (0, 1), (1, 1)])));
        assert_eq!(s.known_mines(), None);
    }

    #[test]
    fn test_inconclusive_sentence() {
        let s = Sentence::new(cells(&[(0, 0), (0, 1), (1, 1)]), 1);
        assert_eq!(s.known_mines(), None);
        assert_eq!(s.known_safes(), None);
    }

    #[test]
    fn test_mark_mine_decrements_count() {
        let mut s = Sentence::new(cells(&[(0, 0), (0, 1), (1, 1)]), 2);
        s.mark_mine(Cell::new(0, 1));
        assert_eq!(s.cells(), &cells(&[(0, 0), (1, 1)]));
        assert_eq!(s.count(), 1);
    }

    #[test]
    fn test_mark_safe_keeps_count() {
        let mut s = Sentence::new(cells(&[(0, 0), (0, 1), (1, 1)]), 1);
        s.mark_safe(Cell::new(0, 0));
        assert_eq!(s.cells(), &cells(&[(0, 1), (1, 1)]));
        assert_eq!(s.count(), 1);
    }

    #[test]
    fn test_mark_absent_cell_is_noop() {
        let mut s = Sentence::new(cells(&[(0, 0), (0, 1)]), 1);
        let before = s.clone();
        s.mark_mine(Cell::new(5, 5));
        s.mark_safe(Cell::new(6, 6));
        assert_eq!(s, before);
    }

    #[test]
    fn test_equality_by_cells_and_count() {
        let a = Sentence::new(cells(&[(0, 0), (0, 1)]), 1);
        let b = Sentence::new(cells(&[(0, 1), (0, 0)]), 1);
        let c = Sentence::new(cells(&[(0, 0), (0, 1)]), 2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_sorted() {
        let s = Sentence::new(cells(&[(1, 2), (0, 1)]), 1);
        assert_eq!(s.to_string(), "{(0,1), (1,2)} = 1");
    }
}
