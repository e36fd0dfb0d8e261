//! Game session: board, engine and per-game player state in one value.
//!
//! The session is the explicit state object the presentation shell drives:
//! it routes reveals through the board (flood-filling zero regions), feeds
//! every newly revealed cell to the engine exactly once, and dispatches AI
//! moves. No ambient state; reset rebuilds everything from scratch.

use crate::board::Board;
use crate::engine::Engine;
use crate::rng::GameRng;
use crate::types::Cell;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

/// What a reveal attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The cell (and possibly a flood-filled region) was revealed.
    Revealed,
    /// The cell was a mine; the game is over.
    Detonated,
    /// The move was not applicable (game over, cell flagged or already
    /// revealed). Not an error.
    Ignored,
}

/// An AI-selected move and what happened when it was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiMove {
    pub cell: Cell,
    /// True if the cell was proven safe; false for a random fallback,
    /// which may still detonate.
    pub known_safe: bool,
    pub outcome: MoveOutcome,
}

/// One game of Minesweeper: ground truth, deduction state and the
/// player-visible sets.
pub struct Session {
    board: Board,
    engine: Engine,
    revealed: HashSet<Cell>,
    flags: HashSet<Cell>,
    status: Status,
    detonated: Option<Cell>,
    rng: GameRng,
}

impl Session {
    pub fn new(height: usize, width: usize, total_mines: usize) -> Self {
        Self::with_rngs(
            Board::new(height, width, total_mines),
            Engine::new(height, width),
            GameRng::new(),
        )
    }

    /// Deterministic session for replay and tests.
    pub fn from_seed(height: usize, width: usize, total_mines: usize, seed: u64) -> Self {
        Self::with_rngs(
            Board::new(height, width, total_mines),
            Engine::from_seed(height, width, seed.wrapping_add(1)),
            GameRng::from_seed(seed),
        )
    }

    fn with_rngs(board: Board, engine: Engine, rng: GameRng) -> Self {
        Self {
            board,
            engine,
            revealed: HashSet::new(),
            flags: HashSet::new(),
            status: Status::Playing,
            detonated: None,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn revealed(&self) -> &HashSet<Cell> {
        &self.revealed
    }

    pub fn flags(&self) -> &HashSet<Cell> {
        &self.flags
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// The mine that ended the game, if it ended in a loss.
    pub fn detonated(&self) -> Option<Cell> {
        self.detonated
    }

    /// Reveal `cell` as a player move.
    ///
    /// The first move of a game triggers mine placement, so it never
    /// detonates. Revealing a zero-count cell flood-fills its region.
    pub fn handle_move(&mut self, cell: Cell) -> MoveOutcome {
        if self.status != Status::Playing
            || self.flags.contains(&cell)
            || self.revealed.contains(&cell)
        {
            return MoveOutcome::Ignored;
        }

        if !self.board.mines_placed() {
            self.board.place_mines(cell, &mut self.rng);
        }

        if self.board.is_mine(cell) {
            self.status = Status::Lost;
            self.detonated = Some(cell);
            return MoveOutcome::Detonated;
        }

        self.reveal(cell);
        if self.all_safe_cells_revealed() {
            self.status = Status::Won;
        }
        MoveOutcome::Revealed
    }

    /// Reveal a non-mine cell, flood-filling through zero-count cells.
    /// Each newly revealed cell is fed to the engine exactly once.
    fn reveal(&mut self, start: Cell) {
        let mut stack = vec![start];
        while let Some(cell) = stack.pop() {
            if self.revealed.contains(&cell) {
                continue;
            }
            self.revealed.insert(cell);
            let nearby = self.board.nearby_mines(cell);
            self.engine.add_knowledge(cell, nearby);
            if nearby == 0 {
                for &n in self.board.neighbors(cell) {
                    if !self.revealed.contains(&n) && !self.flags.contains(&n) {
                        stack.push(n);
                    }
                }
            }
        }
    }

    fn all_safe_cells_revealed(&self) -> bool {
        let cells = self.board.height() * self.board.width();
        self.revealed.len() == cells - self.board.mine_count()
    }

    /// Toggle a flag on an unrevealed cell. Returns whether the cell is
    /// flagged afterwards.
    pub fn toggle_flag(&mut self, cell: Cell) -> bool {
        if self.status != Status::Playing || self.revealed.contains(&cell) {
            return self.flags.contains(&cell);
        }
        if !self.flags.remove(&cell) {
            self.flags.insert(cell);
        }
        self.flags.contains(&cell)
    }

    /// Let the AI pick and play one move: a proven-safe cell if any,
    /// otherwise a uniformly-random not-known-mine cell. `None` when the
    /// game is over or no cell is playable.
    pub fn ai_move(&mut self) -> Option<AiMove> {
        if self.status != Status::Playing {
            return None;
        }
        let (cell, known_safe) = match self.engine.make_safe_move() {
            Some(cell) => (cell, true),
            None => (self.engine.make_random_move()?, false),
        };
        // The AI overrides any flag the player left on its pick.
        self.flags.remove(&cell);
        let outcome = self.handle_move(cell);
        Some(AiMove {
            cell,
            known_safe,
            outcome,
        })
    }

    /// Discard the whole game and start a fresh one. Nothing persists
    /// across games.
    pub fn reset(&mut self, height: usize, width: usize, total_mines: usize) {
        *self = Session::with_rngs(
            Board::new(height, width, total_mines),
            Engine::new(height, width),
            GameRng::new(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_never_detonates() {
        for seed in 0..20 {
            let mut session = Session::from_seed(9, 9, 10, seed);
            let outcome = session.handle_move(Cell::new(4, 4));
            assert_eq!(outcome, MoveOutcome::Revealed);
            assert_ne!(session.status(), Status::Lost);
        }
    }

    #[test]
    fn test_engine_fed_once_per_revealed_cell() {
        let mut session = Session::from_seed(9, 9, 10, 42);
        session.handle_move(Cell::new(4, 4));
        // Every revealed cell reached the engine, and nothing else did.
        assert_eq!(session.revealed(), session.engine().moves_made());
        for &cell in session.revealed() {
            assert!(!session.board().is_mine(cell));
        }
    }

    #[test]
    fn test_flood_fill_expands_zero_region() {
        let mut session = Session::from_seed(9, 9, 10, 42);
        session.handle_move(Cell::new(4, 4));
        // The protected zone guarantees (4,4) is a zero, so the reveal
        // must have spread beyond the clicked cell.
        assert_eq!(session.board().nearby_mines(Cell::new(4, 4)), 0);
        assert!(session.revealed().len() > 1);
    }

    #[test]
    fn test_detonation_loses_game() {
        let mut checked = false;
        for seed in 0..5 {
            let mut session = Session::from_seed(5, 5, 8, seed);
            session.handle_move(Cell::new(2, 2));
            if session.status() != Status::Playing {
                continue;
            }
            let mine = (0..5)
                .flat_map(|r| (0..5).map(move |c| Cell::new(r, c)))
                .find(|&cell| session.board().is_mine(cell))
                .expect("board has mines");
            assert_eq!(session.handle_move(mine), MoveOutcome::Detonated);
            assert_eq!(session.status(), Status::Lost);
            assert_eq!(session.detonated(), Some(mine));
            // Further moves are ignored.
            assert_eq!(session.handle_move(Cell::new(0, 0)), MoveOutcome::Ignored);
            checked = true;
            break;
        }
        assert!(checked, "no seed left the game in progress after one move");
    }

    #[test]
    fn test_flag_blocks_reveal_and_toggles() {
        let mut session = Session::from_seed(5, 5, 3, 9);
        assert!(session.toggle_flag(Cell::new(1, 1)));
        assert_eq!(session.handle_move(Cell::new(1, 1)), MoveOutcome::Ignored);
        assert!(session.revealed().is_empty());
        assert!(!session.toggle_flag(Cell::new(1, 1)));
        assert_eq!(session.handle_move(Cell::new(1, 1)), MoveOutcome::Revealed);
    }

    #[test]
    fn test_revealed_cell_ignored() {
        let mut session = Session::from_seed(9, 9, 10, 42);
        session.handle_move(Cell::new(4, 4));
        let before = session.engine().moves_made().len();
        assert_eq!(session.handle_move(Cell::new(4, 4)), MoveOutcome::Ignored);
        assert_eq!(session.engine().moves_made().len(), before);
    }

    #[test]
    fn test_win_when_all_safe_cells_revealed() {
        // 2x2 with a single mine: the protected zone around the first
        // click covers the whole board, so no mine can be placed and the
        // opening flood fill reveals everything.
        let mut session = Session::from_seed(2, 2, 1, 5);
        session.handle_move(Cell::new(0, 0));
        assert_eq!(session.status(), Status::Won);
    }

    #[test]
    fn test_ai_plays_known_safe_first() {
        let mut session = Session::from_seed(9, 9, 10, 11);
        session.handle_move(Cell::new(4, 4));
        // While the game is in progress a move is always available, and
        // a proven-safe pick must never detonate.
        if session.status() == Status::Playing {
            let mv = session.ai_move().expect("a move exists while playing");
            if mv.known_safe {
                assert!(session.engine().safes().contains(&mv.cell));
                assert_ne!(mv.outcome, MoveOutcome::Detonated);
            }
        }
    }

    #[test]
    fn test_autoplay_terminates() {
        for seed in 0..10 {
            let mut session = Session::from_seed(8, 8, 10, seed);
            session.handle_move(Cell::new(3, 3));
            let mut steps = 0;
            while session.status() == Status::Playing {
                if session.ai_move().is_none() {
                    break;
                }
                steps += 1;
                assert!(steps <= 64, "autoplay did not terminate");
            }
            assert_ne!(session.status(), Status::Playing);
            if session.status() == Status::Won {
                assert_eq!(
                    session.revealed().len(),
                    64 - session.board().mine_count()
                );
            }
        }
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut session = Session::from_seed(9, 9, 10, 42);
        session.handle_move(Cell::new(4, 4));
        assert!(!session.revealed().is_empty());
        session.reset(5, 5, 3);
        assert_eq!(session.status(), Status::Playing);
        assert!(session.revealed().is_empty());
        assert!(session.flags().is_empty());
        assert!(session.engine().moves_made().is_empty());
        assert!(session.engine().safes().is_empty());
        assert!(session.engine().mines().is_empty());
        assert!(!session.board().mines_placed());
        assert_eq!(session.board().height(), 5);
    }
}
