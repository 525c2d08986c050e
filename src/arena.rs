//! Self-play between two difficulty profiles.
//!
//! The search always maximizes for `O`. To let a profile play `X`, it is
//! handed the mark-swapped board, where its own marks appear as `O`.

use fastrand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::board::{Board, Mark, MoveError, Point};
use crate::difficulty::Difficulty;
use crate::rules::{is_terminal, winner};
use crate::select::select_move;

/// A finished game: the winner (if any) and every move in order, `X` first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub winner: Option<Mark>,
    pub moves: Vec<Point>,
}

/// Aggregate results of a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub games: u32,
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl MatchStats {
    fn record(&mut self, winner: Option<Mark>) {
        self.games += 1;
        match winner {
            Some(Mark::X) => self.x_wins += 1,
            Some(Mark::O) => self.o_wins += 1,
            None => self.draws += 1,
        }
    }
}

/// Plays one game from the empty board with `X` moving first.
///
/// Fails only if a profile picks a cell that cannot be played.
pub fn play_game(x: Difficulty, o: Difficulty, rng: &mut Rng) -> Result<GameRecord, MoveError> {
    let mut board = Board::new();
    let mut moves = Vec::new();
    let mut turn = Mark::X;

    loop {
        let choice = match turn {
            Mark::X => select_move(&mut board.swapped(), x, rng),
            Mark::O => select_move(&mut board, o, rng),
        };
        let Some(pt) = choice else {
            return Ok(GameRecord { winner: None, moves });
        };
        board.apply_move(pt, turn)?;
        moves.push(pt);

        if is_terminal(&board) {
            return Ok(GameRecord {
                winner: winner(&board),
                moves,
            });
        }
        turn = turn.opponent();
    }
}

/// Plays `games` games of `x` against `o`.
pub fn play_match(
    x: Difficulty,
    o: Difficulty,
    games: u32,
    rng: &mut Rng,
) -> Result<MatchStats, MoveError> {
    let mut stats = MatchStats::default();
    for i in 0..games {
        let record = play_game(x, o, rng)?;
        debug!(game = i, winner = ?record.winner, plies = record.moves.len(), "game finished");
        stats.record(record.winner);
    }
    info!(%x, %o, ?stats, "match finished");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easy_mirror_match_is_a_draw() {
        let mut rng = Rng::with_seed(0);
        let record = play_game(Difficulty::MinimaxEasy, Difficulty::MinimaxEasy, &mut rng).unwrap();

        assert_eq!(record.winner, None);
        assert_eq!(record.moves.len(), 16);
        assert_eq!(&record.moves[..2], &[(0, 0), (0, 3)]);
    }

    #[test]
    fn test_moves_are_distinct() {
        let mut rng = Rng::with_seed(9);
        let record = play_game(Difficulty::Random, Difficulty::MinimaxMedium, &mut rng).unwrap();
        let mut seen = record.moves.clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), record.moves.len());
    }

    #[test]
    fn test_winner_made_the_last_move() {
        let mut rng = Rng::with_seed(4);
        for _ in 0..10 {
            let record = play_game(Difficulty::Random, Difficulty::MinimaxHard, &mut rng).unwrap();
            let mut board = Board::new();
            let mut mark = Mark::X;
            for &pt in &record.moves {
                board.apply_move(pt, mark).unwrap();
                mark = mark.opponent();
            }
            assert_eq!(winner(&board), record.winner);
            if let Some(w) = record.winner {
                // `mark` is now the side that did not move last.
                assert_eq!(w, mark.opponent());
            } else {
                assert!(board.is_full());
            }
        }
    }

    #[test]
    fn test_match_stats_add_up() {
        let mut rng = Rng::with_seed(21);
        let stats = play_match(Difficulty::Random, Difficulty::Random, 20, &mut rng).unwrap();
        assert_eq!(stats.games, 20);
        assert_eq!(stats.x_wins + stats.o_wins + stats.draws, 20);
    }
}
