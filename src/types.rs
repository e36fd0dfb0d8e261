//! Core data types for the Minesweeper AI.
//!
//! The whole crate addresses the board through `Cell` coordinates,
//! `(row, col)` on a fixed height x width grid. Row 0 is the top row.

use serde::{Deserialize, Serialize};

/// A single board coordinate. Value type: equality and hashing by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[inline(always)]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Pre-computed neighbor cache for all cells.
///
/// Stores the 8-directional neighbors (clipped to grid bounds) for every
/// cell, so the engine and board never construct an out-of-bounds `Cell`.
/// Indexed by `row * width + col`, each entry is a slice of neighbors.
pub struct NeighborCache {
    pub height: usize,
    pub width: usize,
    /// Flat storage of all neighbor cells.
    data: Vec<Cell>,
    /// offsets[i] = start index in `data` for cell i.
    /// offsets[i+1] - offsets[i] = number of neighbors for cell i.
    offsets: Vec<usize>,
}

impl NeighborCache {
    /// Build the neighbor cache for a grid of the given dimensions.
    pub fn new(height: usize, width: usize) -> Self {
        debug_assert!(height > 0 && width > 0);
        let total = height * width;
        let mut data = Vec::with_capacity(total * 8);
        let mut offsets = Vec::with_capacity(total + 1);

        for row in 0..height {
            for col in 0..width {
                offsets.push(data.len());
                for dr in -1i32..=1 {
                    for dc in -1i32..=1 {
                        if dr == 0 && dc == 0 {
                            continue;
                        }
                        let nr = row as i32 + dr;
                        let nc = col as i32 + dc;
                        if nr >= 0 && nr < height as i32 && nc >= 0 && nc < width as i32 {
                            data.push(Cell::new(nr as usize, nc as usize));
                        }
                    }
                }
            }
        }
        offsets.push(data.len()); // sentinel

        Self {
            height,
            width,
            data,
            offsets,
        }
    }

    /// Get the pre-computed neighbors of `cell`.
    #[inline(always)]
    pub fn get(&self, cell: Cell) -> &[Cell] {
        debug_assert!(self.in_bounds(cell));
        let idx = cell.row * self.width + cell.col;
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.data[start..end]
    }

    #[inline(always)]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }
}
