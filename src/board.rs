//! Ground-truth board: mine placement and adjacent-mine counts.
//!
//! The board is the only component that knows where the mines are. Mine
//! placement is deferred until the first move so that the opening click
//! and its 3x3 neighborhood can be excluded.

use crate::rng::GameRng;
use crate::types::{Cell, NeighborCache};

/// A height x width minefield. Flat row-major storage.
pub struct Board {
    height: usize,
    width: usize,
    /// true = mine. Empty of mines until `place_mines` runs.
    mines: Vec<bool>,
    total_mines: usize,
    placed: bool,
    neighbors: NeighborCache,
}

impl Board {
    /// Create an empty board. Mines are placed lazily on the first move.
    pub fn new(height: usize, width: usize, total_mines: usize) -> Self {
        debug_assert!(height > 0 && width > 0);
        debug_assert!(total_mines < height * width);
        Self {
            height,
            width,
            mines: vec![false; height * width],
            total_mines,
            placed: false,
            neighbors: NeighborCache::new(height, width),
        }
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn total_mines(&self) -> usize {
        self.total_mines
    }

    /// True once the minefield has been generated.
    #[inline(always)]
    pub fn mines_placed(&self) -> bool {
        self.placed
    }

    #[inline(always)]
    fn idx(&self, cell: Cell) -> usize {
        cell.row * self.width + cell.col
    }

    /// Randomly place the configured number of mines, excluding the 3x3
    /// protected zone around `start` so the first move never detonates
    /// and usually opens a region.
    ///
    /// The attempt cap guards against configurations where the protected
    /// zone leaves fewer free cells than mines to place.
    pub fn place_mines(&mut self, start: Cell, rng: &mut GameRng) {
        debug_assert!(!self.placed);
        let mut protected = vec![false; self.height * self.width];
        protected[self.idx(start)] = true;
        for &n in self.neighbors.get(start) {
            protected[self.idx(n)] = true;
        }

        let mut placed = 0;
        let mut attempts = 0;
        let max_placement_attempts = 100_000;

        while placed < self.total_mines && attempts < max_placement_attempts {
            attempts += 1;
            let row = rng.gen_range(self.height);
            let col = rng.gen_range(self.width);
            let i = self.idx(Cell::new(row, col));
            if protected[i] || self.mines[i] {
                continue;
            }
            self.mines[i] = true;
            placed += 1;
        }

        self.placed = true;
    }

    /// Whether `cell` contains a mine.
    #[inline(always)]
    pub fn is_mine(&self, cell: Cell) -> bool {
        self.mines[self.idx(cell)]
    }

    /// The number of mines adjacent to `cell` (0-8), the cell itself
    /// excluded.
    pub fn nearby_mines(&self, cell: Cell) -> u8 {
        let mut count = 0;
        for &n in self.neighbors.get(cell) {
            if self.is_mine(n) {
                count += 1;
            }
        }
        count
    }

    /// The in-bounds neighbors of `cell`.
    #[inline(always)]
    pub fn neighbors(&self, cell: Cell) -> &[Cell] {
        self.neighbors.get(cell)
    }

    /// Total mines actually on the board.
    pub fn mine_count(&self) -> usize {
        self.mines.iter().filter(|&&m| m).count()
    }
}
