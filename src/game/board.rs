use std::fmt;

use super::Player;
use crate::error::MoveError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Heuristic or terminal value of a position, from the maximizer's side.
pub type Score = i32;

/// Sentinel returned by [`Board::evaluate`] for a completed line.
pub const WIN_SCORE: Score = 100_000;

/// Four `(row, col)` cells in a straight line.
pub type Window = [(usize, usize); 4];

const WINDOW_COUNT: usize = (ROWS - 3) * COLS + ROWS * (COLS - 3) + 2 * (ROWS - 3) * (COLS - 3);

/// Every window on the board, grouped by family in scan order: vertical,
/// horizontal, diagonal down-right, diagonal down-left.
const WINDOWS: [Window; WINDOW_COUNT] = build_windows();

const fn line(row: usize, col: usize, d_row: isize, d_col: isize) -> Window {
    let mut window = [(0, 0); 4];
    let mut i = 0;
    while i < 4 {
        window[i] = (
            (row as isize + d_row * i as isize) as usize,
            (col as isize + d_col * i as isize) as usize,
        );
        i += 1;
    }
    window
}

const fn build_windows() -> [Window; WINDOW_COUNT] {
    let mut windows = [[(0, 0); 4]; WINDOW_COUNT];
    let mut n = 0;

    // Vertical
    let mut row = 0;
    while row + 3 < ROWS {
        let mut col = 0;
        while col < COLS {
            windows[n] = line(row, col, 1, 0);
            n += 1;
            col += 1;
        }
        row += 1;
    }

    // Horizontal
    let mut row = 0;
    while row < ROWS {
        let mut col = 0;
        while col + 3 < COLS {
            windows[n] = line(row, col, 0, 1);
            n += 1;
            col += 1;
        }
        row += 1;
    }

    // Diagonal (top-left to bottom-right, \)
    let mut row = 0;
    while row + 3 < ROWS {
        let mut col = 0;
        while col + 3 < COLS {
            windows[n] = line(row, col, 1, 1);
            n += 1;
            col += 1;
        }
        row += 1;
    }

    // Diagonal (top-right to bottom-left, /)
    let mut row = 0;
    while row + 3 < ROWS {
        let mut col = 3;
        while col < COLS {
            windows[n] = line(row, col, 1, -1);
            n += 1;
            col += 1;
        }
        row += 1;
    }

    windows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Human,
    Ai,
}

/// A Connect Four position.
///
/// `Board` is `Copy`: search branches take their own copy before dropping a
/// chip, so no branch can observe another branch's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
    moves_played: usize,
    current_turn: Player,
}

impl Board {
    /// Create a new empty board, human to move
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
            moves_played: 0,
            current_turn: Player::Human,
        }
    }

    /// Clear every cell and hand the turn back to the human
    pub fn reset(&mut self) {
        *self = Board::new();
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Number of chips on the board
    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    /// Override whose turn it is. Informational only; search never reads it.
    pub fn set_current_turn(&mut self, player: Player) {
        self.current_turn = player;
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Columns that can still take a chip, lowest index first
    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLS).filter(move |&col| !self.is_column_full(col))
    }

    /// Drop a chip in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }

        if self.is_column_full(col) {
            return Err(MoveError::ColumnFull(col));
        }

        // Find the lowest empty row in this column
        let row = (0..ROWS)
            .rev()
            .find(|&row| self.cells[row][col] == Cell::Empty)
            .ok_or(MoveError::ColumnFull(col))?;

        self.cells[row][col] = player.to_cell();
        self.moves_played += 1;
        Ok(row)
    }

    /// Drop a chip, reporting only whether it landed. A rejected drop leaves
    /// the board untouched.
    pub fn try_drop(&mut self, col: usize, player: Player) -> bool {
        self.drop_piece(col, player).is_ok()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.moves_played == ROWS * COLS
    }

    fn count(&self, window: &Window, cell: Cell) -> usize {
        window
            .iter()
            .filter(|&&(row, col)| self.cells[row][col] == cell)
            .count()
    }

    /// Score the position for `maximizer`.
    ///
    /// Windows are visited in scan order. The first window holding four chips
    /// of one side decides the result: `-WIN_SCORE` if they belong to the
    /// minimizer, `+WIN_SCORE` if they belong to the maximizer. Otherwise the
    /// score is the number of maximizer chips summed over all windows. The
    /// minimizer's chips never subtract.
    pub fn evaluate(&self, maximizer: Player) -> Score {
        let own = maximizer.to_cell();
        let opp = maximizer.other().to_cell();
        let mut score = 0;

        for window in &WINDOWS {
            let mut own_count = 0usize;
            let mut opp_count = 0usize;
            for &(row, col) in window {
                let cell = self.cells[row][col];
                if cell == own {
                    own_count += 1;
                } else if cell == opp {
                    opp_count += 1;
                }
            }
            if opp_count == 4 {
                return -WIN_SCORE;
            }
            if own_count == 4 {
                return WIN_SCORE;
            }
            score += own_count as Score;
        }

        score
    }

    /// The first completed line in scan order, if any
    pub fn winning_line(&self) -> Option<Window> {
        WINDOWS.iter().copied().find(|window| {
            let (row, col) = window[0];
            let cell = self.cells[row][col];
            cell != Cell::Empty && self.count(window, cell) == 4
        })
    }

    /// Owner of the first completed line in scan order, if any
    pub fn winner(&self) -> Option<Player> {
        let (row, col) = self.winning_line()?[0];
        match self.cells[row][col] {
            Cell::Human => Some(Player::Human),
            Cell::Ai => Some(Player::Ai),
            Cell::Empty => None,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let symbol = match cell {
                    Cell::Empty => '.',
                    Cell::Human => 'X',
                    Cell::Ai => 'O',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(board: &mut Board, moves: &[(usize, Player)]) {
        for &(col, player) in moves {
            board.drop_piece(col, player).unwrap();
        }
    }

    /// A full board with no line for either side:
    /// rows alternate in pairs so nothing lines up four times.
    fn drawn_board() -> Board {
        let mut board = Board::new();
        for col in 0..COLS {
            for row in (0..ROWS).rev() {
                let player = if (row / 2 + col) % 2 == 0 {
                    Player::Human
                } else {
                    Player::Ai
                };
                board.drop_piece(col, player).unwrap();
            }
        }
        board
    }

    fn assert_gravity(board: &Board) {
        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if board.get(row, col) != Cell::Empty {
                    assert_ne!(
                        board.get(row + 1, col),
                        Cell::Empty,
                        "floating chip at ({row}, {col})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_window_table_covers_every_line_once() {
        assert_eq!(WINDOWS.len(), 69);
        for (i, a) in WINDOWS.iter().enumerate() {
            for &(row, col) in a {
                assert!(row < ROWS && col < COLS);
            }
            for b in &WINDOWS[i + 1..] {
                assert_ne!(a, b, "duplicate window {a:?}");
            }
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.moves_played(), 0);
        assert_eq!(board.current_turn(), Player::Human);
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new();

        let row = board.drop_piece(3, Player::Human).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.get(5, 3), Cell::Human);
        assert_eq!(board.moves_played(), 1);

        let row = board.drop_piece(3, Player::Ai).unwrap();
        assert_eq!(row, 4); // Should land on top of first piece
        assert_eq!(board.get(4, 3), Cell::Ai);
        assert_eq!(board.moves_played(), 2);
    }

    #[test]
    fn test_drops_respect_gravity() {
        let mut board = Board::new();
        let order = [3, 3, 2, 4, 4, 4, 0, 6, 6, 1, 3, 5];
        for (i, &col) in order.iter().enumerate() {
            let before = board.moves_played();
            let player = if i % 2 == 0 { Player::Human } else { Player::Ai };
            assert!(board.try_drop(col, player));
            assert_eq!(board.moves_played(), before + 1);
            assert_gravity(&board);
        }
    }

    #[test]
    fn test_drop_does_not_change_turn() {
        let mut board = Board::new();
        assert!(board.try_drop(0, Player::Ai));
        assert_eq!(board.current_turn(), Player::Human);
        board.set_current_turn(Player::Ai);
        assert_eq!(board.current_turn(), Player::Ai);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.drop_piece(0, Player::Human).unwrap();
        }

        assert!(board.is_column_full(0));
        assert_eq!(board.drop_piece(0, Player::Ai), Err(MoveError::ColumnFull(0)));
    }

    #[test]
    fn test_drop_on_full_column_leaves_board_unchanged() {
        let mut board = Board::new();
        for i in 0..ROWS {
            let player = if i % 2 == 0 { Player::Human } else { Player::Ai };
            board.drop_piece(2, player).unwrap();
        }
        let snapshot = board;

        assert!(!board.try_drop(2, Player::Ai));
        assert!(!board.try_drop(2, Player::Human));
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert_eq!(
            board.drop_piece(7, Player::Human),
            Err(MoveError::InvalidColumn(7))
        );
        assert!(!board.try_drop(usize::MAX, Player::Ai));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_full_board() {
        let board = drawn_board();
        assert!(board.is_full());
        assert_eq!(board.moves_played(), ROWS * COLS);
        assert_eq!(board.legal_columns().count(), 0);
    }

    #[test]
    fn test_legal_columns_skip_full() {
        let mut board = Board::new();
        for i in 0..ROWS {
            let player = if i % 2 == 0 { Player::Human } else { Player::Ai };
            board.drop_piece(4, player).unwrap();
        }
        let legal: Vec<usize> = board.legal_columns().collect();
        assert_eq!(legal, vec![0, 1, 2, 3, 5, 6]);
    }

    #[test]
    fn test_copy_is_independent() {
        let mut board = Board::new();
        board.drop_piece(3, Player::Human).unwrap();

        let mut branch = board;
        branch.drop_piece(3, Player::Ai).unwrap();

        assert_eq!(board.get(4, 3), Cell::Empty);
        assert_eq!(board.moves_played(), 1);
        assert_eq!(branch.get(4, 3), Cell::Ai);
        assert_eq!(branch.moves_played(), 2);
    }

    #[test]
    fn test_reset() {
        let mut board = Board::new();
        play(&mut board, &[(0, Player::Human), (1, Player::Ai)]);
        board.set_current_turn(Player::Ai);
        board.reset();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_evaluate_empty_board_is_zero() {
        let board = Board::new();
        assert_eq!(board.evaluate(Player::Ai), 0);
        assert_eq!(board.evaluate(Player::Human), 0);
    }

    #[test]
    fn test_evaluate_counts_windows_through_a_chip() {
        // A bottom-centre chip sits in 1 vertical, 4 horizontal and 2 diagonal windows
        let mut board = Board::new();
        board.drop_piece(3, Player::Ai).unwrap();
        assert_eq!(board.evaluate(Player::Ai), 7);

        let mut corner = Board::new();
        corner.drop_piece(0, Player::Ai).unwrap();
        assert_eq!(corner.evaluate(Player::Ai), 3);
    }

    #[test]
    fn test_evaluate_shared_windows_count_each_side() {
        // Bottom row: X X O O
        let mut board = Board::new();
        play(
            &mut board,
            &[
                (0, Player::Human),
                (1, Player::Human),
                (2, Player::Ai),
                (3, Player::Ai),
            ],
        );
        assert_eq!(board.evaluate(Player::Human), 7);
        assert_eq!(board.evaluate(Player::Ai), 12);
    }

    #[test]
    fn test_evaluate_ignores_minimizer_chips() {
        let mut board = Board::new();
        play(
            &mut board,
            &[(3, Player::Human), (3, Player::Human), (4, Player::Human)],
        );
        assert_eq!(board.evaluate(Player::Ai), 0);
        assert!(board.evaluate(Player::Human) > 0);
    }

    #[test]
    fn test_evaluate_horizontal_win() {
        let mut board = Board::new();
        play(
            &mut board,
            &[
                (0, Player::Ai),
                (1, Player::Ai),
                (2, Player::Ai),
                (3, Player::Ai),
                (0, Player::Human),
                (6, Player::Human),
            ],
        );
        assert_eq!(board.evaluate(Player::Ai), WIN_SCORE);
        assert_eq!(board.evaluate(Player::Human), -WIN_SCORE);
    }

    #[test]
    fn test_evaluate_vertical_win() {
        let mut board = Board::new();
        for _ in 0..4 {
            board.drop_piece(5, Player::Ai).unwrap();
        }
        assert_eq!(board.evaluate(Player::Ai), WIN_SCORE);
    }

    #[test]
    fn test_evaluate_diagonal_wins() {
        // Diagonal / ending at (2, 3)
        let mut up = Board::new();
        play(
            &mut up,
            &[
                (0, Player::Ai),
                (1, Player::Human),
                (1, Player::Ai),
                (2, Player::Human),
                (2, Player::Human),
                (2, Player::Ai),
                (3, Player::Human),
                (3, Player::Human),
                (3, Player::Human),
                (3, Player::Ai),
            ],
        );
        assert_eq!(up.evaluate(Player::Ai), WIN_SCORE);

        // Diagonal \ ending at (2, 3)
        let mut down = Board::new();
        play(
            &mut down,
            &[
                (6, Player::Ai),
                (5, Player::Human),
                (5, Player::Ai),
                (4, Player::Human),
                (4, Player::Human),
                (4, Player::Ai),
                (3, Player::Human),
                (3, Player::Human),
                (3, Player::Human),
                (3, Player::Ai),
            ],
        );
        assert_eq!(down.evaluate(Player::Ai), WIN_SCORE);
    }

    #[test]
    fn test_evaluate_win_sign_flips_with_maximizer() {
        let mut board = Board::new();
        for _ in 0..4 {
            board.drop_piece(1, Player::Human).unwrap();
        }
        assert_eq!(board.evaluate(Player::Human), WIN_SCORE);
        assert_eq!(board.evaluate(Player::Ai), -WIN_SCORE);
    }

    #[test]
    fn test_evaluate_first_line_in_scan_order_wins() {
        // Human vertical in column 6 is found before the AI's bottom row
        let mut board = Board::new();
        for col in 0..4 {
            board.drop_piece(col, Player::Ai).unwrap();
        }
        for _ in 0..4 {
            board.drop_piece(6, Player::Human).unwrap();
        }
        assert_eq!(board.evaluate(Player::Ai), -WIN_SCORE);
        assert_eq!(board.winner(), Some(Player::Human));
    }

    #[test]
    fn test_evaluate_three_is_not_a_win() {
        let mut board = Board::new();
        for col in 0..3 {
            board.drop_piece(col, Player::Ai).unwrap();
        }
        let score = board.evaluate(Player::Ai);
        assert!(score < WIN_SCORE);
        assert!(score > 0);
        assert_eq!(board.winning_line(), None);
    }

    #[test]
    fn test_evaluate_drawn_board_is_heuristic() {
        let board = drawn_board();
        assert_eq!(board.winning_line(), None);
        assert_eq!(board.evaluate(Player::Ai), 138);
        assert_eq!(board.evaluate(Player::Human), 138);
    }

    #[test]
    fn test_winning_line_cells() {
        let mut board = Board::new();
        for col in 2..6 {
            board.drop_piece(col, Player::Human).unwrap();
        }
        assert_eq!(
            board.winning_line(),
            Some([(5, 2), (5, 3), (5, 4), (5, 5)])
        );
        assert_eq!(board.winner(), Some(Player::Human));
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        play(&mut board, &[(0, Player::Human), (1, Player::Ai)]);
        let text = board.to_string();
        let last = text.lines().last().unwrap();
        assert_eq!(last, "XO.....");
        assert_eq!(text.lines().count(), ROWS);
    }
}
