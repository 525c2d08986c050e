//! A single live game between the human (`X`) and the machine (`O`).
//!
//! The session owns the board, whose turn it is, and the RNG used by the
//! random profile. Each [`GameSession::play_turn`] call applies the human's
//! move, checks for a result, lets the machine reply, and checks again. A win
//! is always reported before the other side gets to move, and a finished game
//! resets the session for the next one.

use fastrand::Rng;
use serde::{Serialize, Serializer};
use tracing::{error, info, warn};

use crate::board::{Board, Mark, Point};
use crate::difficulty::Difficulty;
use crate::rules::{is_draw, is_winner};
use crate::select::select_move;

/// Outcome of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The human's move was rejected; nothing changed.
    Invalid,
    Win,
    Draw,
    /// Game continues with the human to move.
    Next,
}

/// What a client gets back after a move.
///
/// `board` is the position at the moment the outcome was decided, so a
/// winning line is still visible even though the session has already reset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnReport {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Mark>,
    pub board: Board,
    /// Side to move next; empty once the game is over.
    #[serde(serialize_with = "serialize_turn")]
    pub turn: Option<Mark>,
    /// The machine's reply, if it moved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn serialize_turn<S: Serializer>(turn: &Option<Mark>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(turn.map_or("", Mark::as_str))
}

pub struct GameSession {
    board: Board,
    turn: Mark,
    rng: Rng,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Rng::new())
    }
}

impl GameSession {
    /// Create a session with an empty board and the human to move.
    pub fn new(rng: Rng) -> Self {
        Self::with_board(Board::new(), rng)
    }

    /// Create a session from an existing position, human to move.
    pub fn with_board(board: Board, rng: Rng) -> Self {
        Self {
            board,
            turn: Mark::HUMAN,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Clear the board and give the move back to the human.
    pub fn reset(&mut self) {
        self.board.reset();
        self.turn = Mark::HUMAN;
    }

    /// The move `difficulty` would play for the machine right now.
    pub fn suggest(&mut self, difficulty: Difficulty) -> Option<Point> {
        select_move(&mut self.board, difficulty, &mut self.rng)
    }

    /// Play the human's move at `point`, then the machine's reply.
    pub fn play_turn(&mut self, point: Point, difficulty: Difficulty) -> TurnReport {
        if let Err(err) = self.board.apply_move(point, Mark::HUMAN) {
            warn!(?point, %err, "rejected move");
            return TurnReport {
                status: Status::Invalid,
                winner: None,
                board: self.board.clone(),
                turn: Some(self.turn),
                reply: None,
                message: Some(err.to_string()),
            };
        }

        if let Some(report) = self.finish(Mark::HUMAN, None) {
            return report;
        }

        self.turn = Mark::MACHINE;
        let reply = self.suggest(difficulty);
        if let Some(pt) = reply {
            if let Err(err) = self.board.apply_move(pt, Mark::MACHINE) {
                error!(?pt, %err, "machine picked an unplayable cell");
                return TurnReport {
                    status: Status::Invalid,
                    winner: None,
                    board: self.board.clone(),
                    turn: Some(self.turn),
                    reply: None,
                    message: Some(err.to_string()),
                };
            }
        }

        if let Some(report) = self.finish(Mark::MACHINE, reply) {
            return report;
        }

        self.turn = Mark::HUMAN;
        TurnReport {
            status: Status::Next,
            winner: None,
            board: self.board.clone(),
            turn: Some(self.turn),
            reply,
            message: None,
        }
    }

    /// Report and reset if `mover` just won or filled the board.
    fn finish(&mut self, mover: Mark, reply: Option<Point>) -> Option<TurnReport> {
        let (status, winner) = if is_winner(&self.board, mover) {
            (Status::Win, Some(mover))
        } else if is_draw(&self.board) {
            (Status::Draw, None)
        } else {
            return None;
        };

        info!(?status, ?winner, "game over");
        let report = TurnReport {
            status,
            winner,
            board: self.board.clone(),
            turn: None,
            reply,
            message: None,
        };
        self.reset();
        Some(report)
    }
}
