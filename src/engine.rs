//! The knowledge engine: plays Minesweeper by logical deduction.
//!
//! The engine accumulates `Sentence`s from revealed counts, derives cells
//! that are certainly safe or certainly mines, and answers move queries.
//! It never looks at the real board; everything it knows arrives through
//! `add_knowledge`, one call per revealed cell.

use crate::rng::GameRng;
use crate::sentence::Sentence;
use crate::types::{Cell, NeighborCache};
use std::collections::HashSet;

/// Constraint-propagation AI for one game of Minesweeper.
///
/// Single-threaded and called strictly sequentially: one `add_knowledge`
/// per revealed cell, move queries in between. Callers simulating many
/// games concurrently must give each game its own engine.
pub struct Engine {
    height: usize,
    width: usize,
    /// Cells already opened by the player or the AI.
    moves_made: HashSet<Cell>,
    /// Cells proven to contain a mine. Grows monotonically.
    mines: HashSet<Cell>,
    /// Cells proven mine-free. Grows monotonically, disjoint from `mines`.
    safes: HashSet<Cell>,
    /// The knowledge base: all currently-believed sentences.
    knowledge: Vec<Sentence>,
    neighbors: NeighborCache,
    rng: GameRng,
}

impl Engine {
    /// Create an engine with empty knowledge for a `height` x `width` board.
    pub fn new(height: usize, width: usize) -> Self {
        Self::with_rng(height, width, GameRng::new())
    }

    /// Create an engine with a seeded RNG, for deterministic replay.
    pub fn from_seed(height: usize, width: usize, seed: u64) -> Self {
        Self::with_rng(height, width, GameRng::from_seed(seed))
    }

    fn with_rng(height: usize, width: usize, rng: GameRng) -> Self {
        debug_assert!(height > 0 && width > 0);
        Self {
            height,
            width,
            moves_made: HashSet::new(),
            mines: HashSet::new(),
            safes: HashSet::new(),
            knowledge: Vec::new(),
            neighbors: NeighborCache::new(height, width),
            rng,
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

    /// Cells proven mine-free so far (includes every opened cell).
    pub fn safes(&self) -> &HashSet<Cell> {
        &self.safes
    }

    /// Cells proven to contain a mine so far.
    pub fn mines(&self) -> &HashSet<Cell> {
        &self.mines
    }

    /// Cells already opened.
    pub fn moves_made(&self) -> &HashSet<Cell> {
        &self.moves_made
    }

    /// The current knowledge base, for inspection.
    pub fn knowledge(&self) -> &[Sentence] {
        &self.knowledge
    }

    /// Record that `cell` is certainly a mine and propagate into every
    /// sentence in the knowledge base. Idempotent.
    pub fn mark_mine(&mut self, cell: Cell) {
        debug_assert!(!self.safes.contains(&cell), "cell marked both safe and mine");
        self.mines.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_mine(cell);
        }
    }

    /// Record that `cell` is certainly safe and propagate into every
    /// sentence in the knowledge base. Idempotent.
    pub fn mark_safe(&mut self, cell: Cell) {
        debug_assert!(!self.mines.contains(&cell), "cell marked both safe and mine");
        self.safes.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_safe(cell);
        }
    }

    /// Fold one observation into the knowledge base: `cell` was revealed
    /// and the board reported `count` adjacent mines.
    ///
    /// Marks the cell safe, builds a sentence over its still-unknown
    /// neighbors (the count adjusted for neighbors already known to be
    /// mines), runs one subset-inference pass over the knowledge base,
    /// then cleans up: duplicates removed, fully-resolved sentences
    /// harvested into the certainty sets until nothing more resolves.
    pub fn add_knowledge(&mut self, cell: Cell, count: u8) {
        debug_assert!(self.neighbors.in_bounds(cell));
        self.mark_safe(cell);
        self.moves_made.insert(cell);

        let (unknown, adjusted) = self.unknown_neighborhood(cell, count as usize);
        // An empty sentence is harmless here; cleanup drops it below.
        self.knowledge.push(Sentence::new(unknown, adjusted));

        self.infer_from_subsets();
        self.dedup_knowledge();
        self.resolve_and_purge();
    }

    /// The still-unknown neighbors of `cell`, with the reported count
    /// reduced by the adjacent cells already known to be mines (those are
    /// excluded from the new sentence but consumed part of the budget).
    fn unknown_neighborhood(&self, cell: Cell, count: usize) -> (HashSet<Cell>, usize) {
        let mut unknown = HashSet::new();
        let mut adjusted = count;
        for &n in self.neighbors.get(cell) {
            if self.mines.contains(&n) {
                debug_assert!(adjusted > 0, "reported count below known mine neighbors");
                adjusted -= 1;
            } else if !self.safes.contains(&n) {
                unknown.insert(n);
            }
        }
        (unknown, adjusted)
    }

    /// Subset inference over a fixed snapshot of the knowledge base.
    ///
    /// For every ordered pair (S, T) with S.cells a superset of T.cells,
    /// the difference D = S.cells - T.cells satisfies exactly
    /// S.count - T.count mines. Three outcomes:
    /// - equal counts: every cell of D is safe
    /// - |D| equals the count difference: every cell of D is a mine
    /// - otherwise: a new sentence (D, S.count - T.count)
    ///
    /// New certainties and sentences are staged and applied only after
    /// the snapshot has been fully iterated, so the pass is well-defined
    /// even though marking mutates sentences in place.
    fn infer_from_subsets(&mut self) {
        let snapshot = self.knowledge.clone();
        let mut found_safe: HashSet<Cell> = HashSet::new();
        let mut found_mine: HashSet<Cell> = HashSet::new();
        let mut staged: Vec<Sentence> = Vec::new();

        for (i, sup) in snapshot.iter().enumerate() {
            for (j, sub) in snapshot.iter().enumerate() {
                if i == j || !sub.cells().is_subset(sup.cells()) {
                    continue;
                }
                let diff: HashSet<Cell> =
                    sup.cells().difference(sub.cells()).copied().collect();
                if sup.count() == sub.count() {
                    // The subset already accounts for the superset's whole
                    // mine budget.
                    found_safe.extend(diff);
                } else {
                    debug_assert!(sup.count() > sub.count(), "inconsistent knowledge base");
                    let surplus = sup.count() - sub.count();
                    if diff.len() == surplus {
                        found_mine.extend(diff);
                    } else {
                        staged.push(Sentence::new(diff, surplus));
                    }
                }
            }
        }

        for cell in found_safe {
            self.mark_safe(cell);
        }
        for cell in found_mine {
            self.mark_mine(cell);
        }
        self.knowledge.extend(staged);
    }

    /// Drop exact-duplicate and emptied-out sentences.
    fn dedup_knowledge(&mut self) {
        let mut unique: Vec<Sentence> = Vec::with_capacity(self.knowledge.len());
        for sentence in self.knowledge.drain(..) {
            if !sentence.is_empty() && !unique.contains(&sentence) {
                unique.push(sentence);
            }
        }
        self.knowledge = unique;
    }

    /// Harvest fully-resolved sentences into the certainty sets, looping
    /// until a fixpoint: marking propagates into the remaining sentences
    /// and can resolve more of them in the same call.
    fn resolve_and_purge(&mut self) {
        loop {
            let resolved = self.knowledge.iter().position(|s| {
                !s.is_empty() && (s.known_mines().is_some() || s.known_safes().is_some())
            });
            let Some(idx) = resolved else { break };
            let sentence = self.knowledge.remove(idx);
            if sentence.known_mines().is_some() {
                for &cell in sentence.cells() {
                    self.mark_mine(cell);
                }
            } else {
                for &cell in sentence.cells() {
                    self.mark_safe(cell);
                }
            }
        }
        self.knowledge.retain(|s| !s.is_empty());
    }

    /// An arbitrary cell known to be safe and not yet opened, or `None`.
    /// Never mutates the certainty sets.
    pub fn make_safe_move(&self) -> Option<Cell> {
        self.safes.difference(&self.moves_made).next().copied()
    }

    /// A uniformly-random cell that is neither opened nor known to be a
    /// mine, or `None` when no such cell remains. The pick may still be a
    /// mine whose status is merely unknown.
    pub fn make_random_move(&mut self) -> Option<Cell> {
        let mut candidates = Vec::with_capacity(self.height * self.width);
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = Cell::new(row, col);
                if !self.mines.contains(&cell) && !self.moves_made.contains(&cell) {
                    candidates.push(cell);
                }
            }
        }
        if candidates.is_empty() {
            return None;
        }
        Some(self.rng.choose(&candidates))
    }
}
