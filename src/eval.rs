//! Static position evaluator used at the search cutoff.
//!
//! A line is open for a player while it holds none of the opponent's marks.
//! The score is the machine's open lines minus the human's, so positive
//! values favour `O`.

use crate::board::{Board, Mark};
use crate::constants::LINES;

/// Number of lines with no opposing mark in them.
pub fn open_lines(board: &Board, mark: Mark) -> i32 {
    let opponent = Some(mark.opponent());
    LINES
        .iter()
        .filter(|line| line.iter().all(|&(r, c)| board.get(r, c) != opponent))
        .count() as i32
}

/// Heuristic score of a non-terminal position from the machine's view.
pub fn evaluate(board: &Board) -> i32 {
    open_lines(board, Mark::MACHINE) - open_lines(board, Mark::HUMAN)
}
