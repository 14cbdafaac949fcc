use super::{Board, Player, Window};
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// One game in progress: the board plus whether it has finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    first_player: Player,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Create initial game state with `first_player` to move
    pub fn initial(first_player: Player) -> Self {
        let mut board = Board::new();
        board.set_current_turn(first_player);
        GameState {
            board,
            first_player,
            outcome: None,
        }
    }

    /// Start over with the same opening player
    pub fn reset(&mut self) {
        *self = GameState::initial(self.first_player);
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.board.current_turn()
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns (not full)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_columns().collect()
    }

    /// Cells of the line that ended the game, if it was won
    pub fn winning_line(&self) -> Option<Window> {
        match self.outcome {
            Some(GameOutcome::Winner(_)) => self.board.winning_line(),
            _ => None,
        }
    }

    /// Drop a chip for the player to move, then hand the turn over.
    ///
    /// Returns the outcome if this move ended the game.
    pub fn play(&mut self, column: usize) -> Result<Option<GameOutcome>, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let mover = self.current_player();
        self.board.drop_piece(column, mover)?;

        self.outcome = if let Some(winner) = self.board.winner() {
            Some(GameOutcome::Winner(winner))
        } else if self.board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        };

        self.board.set_current_turn(mover.other());
        Ok(self.outcome)
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::initial(Player::Human)
    }
}
