//! Terminal detection: wins and draws.

use crate::board::{Board, Mark};
use crate::constants::LINES;

/// True if any row, column, or main diagonal is entirely `mark`.
pub fn is_winner(board: &Board, mark: Mark) -> bool {
    LINES
        .iter()
        .any(|line| line.iter().all(|&(r, c)| board.get(r, c) == Some(mark)))
}

/// True if the board is full and nobody has a winning line.
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && winner(board).is_none()
}

/// The side holding a complete line, if any. `O` is checked first, matching
/// the search's terminal test order.
pub fn winner(board: &Board) -> Option<Mark> {
    [Mark::MACHINE, Mark::HUMAN]
        .into_iter()
        .find(|&mark| is_winner(board, mark))
}

/// True if the game is over for any reason.
pub fn is_terminal(board: &Board) -> bool {
    board.is_full() || winner(board).is_some()
}
