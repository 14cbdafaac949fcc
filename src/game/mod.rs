//! Core Connect Four game logic: board representation and scoring, player
//! types, and the game session that alternates turns.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, Score, Window, COLS, ROWS, WIN_SCORE};
pub use player::Player;
pub use state::{GameOutcome, GameState};
