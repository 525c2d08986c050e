//! Move selection: dispatches a difficulty to its strategy.

use fastrand::Rng;
use tracing::debug;

use crate::board::{Board, Point};
use crate::difficulty::{Difficulty, Strategy};
use crate::search::{Expectimax, Minimax};

/// Chooses the machine's (`O`) next cell.
///
/// Returns `None` only when the board has no empty cell. The board is borrowed
/// mutably for hypothetical moves and is unchanged on return. `rng` is used by
/// the random profile only.
pub fn select_move(board: &mut Board, difficulty: Difficulty, rng: &mut Rng) -> Option<Point> {
    let choice = match difficulty.strategy() {
        Strategy::Random => {
            let cells: Vec<Point> = board.empty_cells().collect();
            rng.choice(cells)
        }
        Strategy::Minimax { max_depth } => {
            let mut search = Minimax::new(max_depth);
            let best = search.best_move(board);
            debug!(
                %difficulty,
                max_depth,
                nodes = search.stats().nodes,
                score = best.map(|(_, score)| score),
                "minimax search done"
            );
            best.map(|(pt, _)| pt)
        }
        Strategy::Expectimax { max_depth } => {
            let mut search = Expectimax::new(max_depth);
            let best = search.best_move(board);
            debug!(
                %difficulty,
                max_depth,
                nodes = search.stats().nodes,
                score = best.map(|(_, score)| score),
                "expectimax search done"
            );
            best.map(|(pt, _)| pt)
        }
    };
    debug!(%difficulty, ?choice, "selected move");
    choice
}
