//! Knowledge-base Minesweeper AI.
//!
//! The engine represents partial knowledge as sentences ("exactly N of
//! these cells are mines"), folds in one observation per revealed cell,
//! and derives provably safe and provably mined cells by subset
//! inference. The board and game session drive it and are thin by
//! comparison; the wasm module at the bottom is the JS-facing shell.

pub mod board;
pub mod engine;
pub mod game;
pub mod rng;
pub mod sentence;
pub mod types;

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use crate::game::Session;
    use crate::types::Cell;
    use std::collections::HashSet;
    use wasm_bindgen::prelude::*;

    fn sorted_cells(cells: &HashSet<Cell>) -> JsValue {
        let mut list: Vec<Cell> = cells.iter().copied().collect();
        list.sort();
        serde_wasm_bindgen::to_value(&list).unwrap()
    }

    /// One game of Minesweeper, driven from JavaScript.
    #[wasm_bindgen(js_name = "Game")]
    pub struct WasmGame {
        session: Session,
    }

    #[wasm_bindgen(js_class = "Game")]
    impl WasmGame {
        #[wasm_bindgen(constructor)]
        pub fn new(height: usize, width: usize, mines: usize) -> WasmGame {
            WasmGame {
                session: Session::new(height, width, mines),
            }
        }

        /// Reveal a cell. Returns "Revealed", "Detonated" or "Ignored".
        pub fn reveal(&mut self, row: usize, col: usize) -> JsValue {
            let outcome = self.session.handle_move(Cell::new(row, col));
            serde_wasm_bindgen::to_value(&outcome).unwrap()
        }

        /// Toggle a flag; returns whether the cell is flagged afterwards.
        #[wasm_bindgen(js_name = "toggleFlag")]
        pub fn toggle_flag(&mut self, row: usize, col: usize) -> bool {
            self.session.toggle_flag(Cell::new(row, col))
        }

        /// Let the AI play one move. Returns `{cell, known_safe, outcome}`
        /// or `null` when no move is available.
        #[wasm_bindgen(js_name = "aiMove")]
        pub fn ai_move(&mut self) -> JsValue {
            match self.session.ai_move() {
                Some(mv) => serde_wasm_bindgen::to_value(&mv).unwrap(),
                None => JsValue::NULL,
            }
        }

        /// Cells proven safe, for UI overlays.
        #[wasm_bindgen(js_name = "safeCells")]
        pub fn safe_cells(&self) -> JsValue {
            sorted_cells(self.session.engine().safes())
        }

        /// Cells proven to be mines, for UI overlays.
        #[wasm_bindgen(js_name = "mineCells")]
        pub fn mine_cells(&self) -> JsValue {
            sorted_cells(self.session.engine().mines())
        }

        /// Cells already opened.
        #[wasm_bindgen(js_name = "movesMade")]
        pub fn moves_made(&self) -> JsValue {
            sorted_cells(self.session.engine().moves_made())
        }

        /// The adjacent-mine count of a revealed cell.
        #[wasm_bindgen(js_name = "nearbyMines")]
        pub fn nearby_mines(&self, row: usize, col: usize) -> u8 {
            self.session.board().nearby_mines(Cell::new(row, col))
        }

        /// Summary of the session as a JS object:
        /// `{ status, revealed, flagged, knownMines, detonated }`.
        pub fn stats(&self) -> JsValue {
            let obj = js_sys::Object::new();
            let status = serde_wasm_bindgen::to_value(&self.session.status()).unwrap();
            js_sys::Reflect::set(&obj, &"status".into(), &status).unwrap();
            js_sys::Reflect::set(
                &obj,
                &"revealed".into(),
                &(self.session.revealed().len() as u32).into(),
            )
            .unwrap();
            js_sys::Reflect::set(
                &obj,
                &"flagged".into(),
                &(self.session.flags().len() as u32).into(),
            )
            .unwrap();
            js_sys::Reflect::set(
                &obj,
                &"knownMines".into(),
                &(self.session.engine().mines().len() as u32).into(),
            )
            .unwrap();
            let detonated = match self.session.detonated() {
                Some(cell) => serde_wasm_bindgen::to_value(&cell).unwrap(),
                None => JsValue::NULL,
            };
            js_sys::Reflect::set(&obj, &"detonated".into(), &detonated).unwrap();
            obj.into()
        }

        /// Start a fresh game; nothing carries over.
        pub fn reset(&mut self, height: usize, width: usize, mines: usize) {
            self.session.reset(height, width, mines);
        }
    }

    /// Ping function to verify WASM is loaded.
    #[wasm_bindgen(js_name = "ping")]
    pub fn wasm_ping() -> String {
        "WASM AI ready".to_string()
    }
}
