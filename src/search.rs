//! Depth-limited adversarial search.
//!
//! Two strategies share one terminal/cutoff test:
//! - [`Minimax`]: worst-case search with alpha-beta pruning.
//! - [`Expectimax`]: the opponent is modelled as a uniform random mover, so
//!   its nodes average their children instead of minimizing.
//!
//! The machine (`O`) always maximizes and the human (`X`) always minimizes.
//! Depth counts plies below the machine's candidate move: the root places an
//! `O` and then searches the resulting board at depth 0 with the opponent to
//! move.
//!
//! Hypothetical moves are made through [`Board::probe`], so the board is back
//! in its original state whenever a search call returns.

use crate::board::{Board, Mark, Point};
use crate::constants::{SCORE_INF, WIN_SCORE};
use crate::eval::evaluate;
use crate::rules::is_winner;

/// Node counts for a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
}

/// Terminal or cutoff score, or `None` if the node must be expanded.
///
/// Checked in order: machine win, human win, full board or depth limit.
fn leaf_score(board: &Board, depth: u32, max_depth: u32) -> Option<i32> {
    if is_winner(board, Mark::MACHINE) {
        return Some(WIN_SCORE - depth as i32);
    }
    if is_winner(board, Mark::HUMAN) {
        return Some(depth as i32 - WIN_SCORE);
    }
    if board.is_full() || depth >= max_depth {
        return Some(evaluate(board));
    }
    None
}

fn side_to_move(maximizing: bool) -> Mark {
    if maximizing { Mark::MACHINE } else { Mark::HUMAN }
}

// =============================================================================
// Minimax with alpha-beta pruning
// =============================================================================

/// Alpha-beta minimax searcher with a fixed depth limit.
#[derive(Debug, Clone)]
pub struct Minimax {
    max_depth: u32,
    stats: SearchStats,
}

impl Minimax {
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Scores `board` with `maximizing` telling whose turn it is.
    ///
    /// Children are scanned in row-major order. Scanning stops once
    /// `beta <= alpha`, which skips only siblings that cannot change the
    /// value returned to the caller.
    pub fn search(
        &mut self,
        board: &mut Board,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.stats.nodes += 1;
        if let Some(score) = leaf_score(board, depth, self.max_depth) {
            return score;
        }

        let moves: Vec<Point> = board.empty_cells().collect();
        let mark = side_to_move(maximizing);

        if maximizing {
            let mut best = -SCORE_INF;
            for pt in moves {
                let score = {
                    let mut child = board.probe(pt, mark);
                    self.search(&mut child, depth + 1, false, alpha, beta)
                };
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = SCORE_INF;
            for pt in moves {
                let score = {
                    let mut child = board.probe(pt, mark);
                    self.search(&mut child, depth + 1, true, alpha, beta)
                };
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Picks the machine's move: the first empty cell (row-major) with the
    /// strictly highest score. Returns `None` on a full board.
    pub fn best_move(&mut self, board: &mut Board) -> Option<(Point, i32)> {
        let moves: Vec<Point> = board.empty_cells().collect();
        let mut best: Option<(Point, i32)> = None;
        let mut alpha = -SCORE_INF;

        for pt in moves {
            let score = {
                let mut child = board.probe(pt, Mark::MACHINE);
                self.search(&mut child, 0, false, alpha, SCORE_INF)
            };
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((pt, score));
            }
            alpha = alpha.max(score);
        }
        best
    }
}

/// Scores `board` with a fresh [`Minimax`] searcher.
pub fn minimax(
    board: &mut Board,
    depth: u32,
    max_depth: u32,
    maximizing: bool,
    alpha: i32,
    beta: i32,
) -> i32 {
    Minimax::new(max_depth).search(board, depth, maximizing, alpha, beta)
}

/// Best machine move under alpha-beta minimax at `max_depth`.
pub fn best_minimax_move(board: &mut Board, max_depth: u32) -> Option<Point> {
    Minimax::new(max_depth).best_move(board).map(|(pt, _)| pt)
}

// =============================================================================
// Expectimax
// =============================================================================

/// Expectimax searcher: max at machine nodes, mean at opponent nodes.
/// No pruning is possible, every child is visited.
#[derive(Debug, Clone)]
pub struct Expectimax {
    max_depth: u32,
    stats: SearchStats,
}

impl Expectimax {
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn search(&mut self, board: &mut Board, depth: u32, maximizing: bool) -> f64 {
        self.stats.nodes += 1;
        if let Some(score) = leaf_score(board, depth, self.max_depth) {
            return score as f64;
        }

        let moves: Vec<Point> = board.empty_cells().collect();
        let mark = side_to_move(maximizing);

        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for pt in moves {
                let mut child = board.probe(pt, mark);
                best = best.max(self.search(&mut child, depth + 1, false));
            }
            best
        } else {
            if moves.is_empty() {
                return 0.0;
            }
            let count = moves.len() as f64;
            let mut total = 0.0;
            for pt in moves {
                let mut child = board.probe(pt, mark);
                total += self.search(&mut child, depth + 1, true);
            }
            total / count
        }
    }

    /// Same root rule as [`Minimax::best_move`]: strictly best, first found.
    pub fn best_move(&mut self, board: &mut Board) -> Option<(Point, f64)> {
        let moves: Vec<Point> = board.empty_cells().collect();
        let mut best: Option<(Point, f64)> = None;

        for pt in moves {
            let score = {
                let mut child = board.probe(pt, Mark::MACHINE);
                self.search(&mut child, 0, false)
            };
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((pt, score));
            }
        }
        best
    }
}

/// Scores `board` with a fresh [`Expectimax`] searcher.
pub fn expectimax(board: &mut Board, depth: u32, max_depth: u32, maximizing: bool) -> f64 {
    Expectimax::new(max_depth).search(board, depth, maximizing)
}

/// Best machine move under expectimax at `max_depth`.
pub fn best_expectimax_move(board: &mut Board, max_depth: u32) -> Option<Point> {
    Expectimax::new(max_depth).best_move(board).map(|(pt, _)| pt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EXPECTIMAX_DEPTH, HARD_DEPTH};

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    /// Plain minimax without any window, for checking the pruned search.
    fn plain_minimax(
        board: &mut Board,
        depth: u32,
        max_depth: u32,
        maximizing: bool,
        nodes: &mut u64,
    ) -> i32 {
        *nodes += 1;
        if let Some(score) = leaf_score(board, depth, max_depth) {
            return score;
        }
        let moves: Vec<Point> = board.empty_cells().collect();
        let scores: Vec<i32> = moves
            .into_iter()
            .map(|pt| {
                let mut child = board.probe(pt, side_to_move(maximizing));
                plain_minimax(&mut child, depth + 1, max_depth, !maximizing, nodes)
            })
            .collect();
        if maximizing {
            scores.into_iter().max().unwrap()
        } else {
            scores.into_iter().min().unwrap()
        }
    }

    fn plain_root(board: &mut Board, max_depth: u32, nodes: &mut u64) -> i32 {
        let moves: Vec<Point> = board.empty_cells().collect();
        moves
            .into_iter()
            .map(|pt| {
                let mut child = board.probe(pt, Mark::MACHINE);
                plain_minimax(&mut child, 0, max_depth, false, nodes)
            })
            .max()
            .unwrap()
    }

    #[test]
    fn test_machine_win_scores_by_depth() {
        let mut b = board("OOOO/X.../X.../X...");
        assert_eq!(minimax(&mut b, 0, 4, false, -SCORE_INF, SCORE_INF), WIN_SCORE);
        assert_eq!(minimax(&mut b, 3, 4, true, -SCORE_INF, SCORE_INF), WIN_SCORE - 3);
    }

    #[test]
    fn test_human_win_scores_by_depth() {
        let mut b = board("XXXX/O.../O.../O...");
        assert_eq!(minimax(&mut b, 2, 4, true, -SCORE_INF, SCORE_INF), 2 - WIN_SCORE);
    }

    #[test]
    fn test_cutoff_uses_evaluator() {
        let mut b = board("O.../..../..../....");
        assert_eq!(minimax(&mut b, 0, 0, false, -SCORE_INF, SCORE_INF), evaluate(&b));
        assert_eq!(expectimax(&mut b, 2, 2, true), evaluate(&b) as f64);
    }

    #[test]
    fn test_search_restores_board() {
        let mut b = board("XO../.X../..O./....");
        let before = b.clone();
        Minimax::new(3).best_move(&mut b);
        assert_eq!(b, before);
        Expectimax::new(2).best_move(&mut b);
        assert_eq!(b, before);
    }

    #[test]
    fn test_depth_zero_is_evaluator_argmax() {
        for s in ["..../..../..../....", "X.../..../..../....", "X.O./.X../..../...."] {
            let mut b = board(s);
            let cells: Vec<Point> = b.empty_cells().collect();
            let mut expected: Option<(Point, i32)> = None;
            for pt in cells {
                let child = b.probe(pt, Mark::MACHINE);
                let score = evaluate(&child);
                if expected.is_none_or(|(_, best)| score > best) {
                    expected = Some((pt, score));
                }
            }
            assert_eq!(best_minimax_move(&mut b, 0), expected.map(|(pt, _)| pt), "board {s}");
        }
    }

    #[test]
    fn test_empty_board_depth_zero_takes_corner() {
        // Corners and centre cells each sit on three lines; (0, 0) is first.
        let mut b = Board::new();
        assert_eq!(best_minimax_move(&mut b, 0), Some((0, 0)));
    }

    #[test]
    fn test_pruned_root_score_matches_plain_minimax() {
        let boards = [
            "..../..../..../....",
            "X.../..../..../....",
            "X.O./.X../..../....",
            "XO../.XO./..X./....",
            "XXO./OOX./X.../....",
        ];
        for s in boards {
            for max_depth in 0..=3 {
                let mut b = board(s);
                let mut nodes = 0;
                let expected = plain_root(&mut b, max_depth, &mut nodes);
                let (_, score) = Minimax::new(max_depth).best_move(&mut b).unwrap();
                assert_eq!(score, expected, "board {s} depth {max_depth}");
            }
        }
    }

    #[test]
    fn test_pruned_child_scores_match_plain_minimax() {
        let mut b = board("XO../.XO./..X./....");
        let cells: Vec<Point> = b.empty_cells().collect();
        for pt in cells {
            let mut child = b.probe(pt, Mark::MACHINE);
            let mut nodes = 0;
            let expected = plain_minimax(&mut child, 0, HARD_DEPTH, false, &mut nodes);
            let pruned = minimax(&mut child, 0, HARD_DEPTH, false, -SCORE_INF, SCORE_INF);
            assert_eq!(pruned, expected, "child {pt:?}");
        }
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let mut b = Board::new();
        let mut plain_nodes = 0;
        plain_root(&mut b, 3, &mut plain_nodes);

        let mut search = Minimax::new(3);
        search.best_move(&mut b);
        assert!(search.stats().nodes < plain_nodes);
    }

    #[test]
    fn test_minimizing_node_cuts_off_below_alpha() {
        // X at (0, 0) scores -3, already no better than alpha = 0 for the
        // maximizer above, so the other 15 replies are skipped.
        let mut b = Board::new();
        let mut search = Minimax::new(1);
        let score = search.search(&mut b, 0, false, 0, SCORE_INF);

        assert_eq!(score, -3);
        assert!(score <= 0);
        assert_eq!(search.stats().nodes, 2);
        assert_eq!(b, Board::new());
    }

    #[test]
    fn test_maximizing_node_cuts_off_above_beta() {
        // O at (0, 0) scores 3, already no worse than beta = 0.
        let mut b = Board::new();
        let mut search = Minimax::new(1);
        let score = search.search(&mut b, 0, true, -SCORE_INF, 0);

        assert_eq!(score, 3);
        assert_eq!(search.stats().nodes, 2);
    }

    #[test]
    fn test_minimizing_cutoffs_shrink_the_tree() {
        // Full-window search at depth 2 still cuts inside minimizing nodes:
        // each maximizer child after the first is refuted by some X reply.
        let mut b = Board::new();
        let mut plain_nodes = 0;
        plain_minimax(&mut b, 0, 2, true, &mut plain_nodes);

        let mut search = Minimax::new(2);
        let score = search.search(&mut b, 0, true, -SCORE_INF, SCORE_INF);
        let mut check_nodes = 0;
        assert_eq!(score, plain_minimax(&mut b, 0, 2, true, &mut check_nodes));
        assert!(search.stats().nodes < plain_nodes);
    }

    #[test]
    fn test_immediate_win_outranks_heuristic() {
        // O completes row 1 at (1, 3). Every other cell leaves X a reply.
        let mut b = board("X.X./OOO./X.../..X.");
        for max_depth in [1, 2, HARD_DEPTH] {
            let (pt, score) = Minimax::new(max_depth).best_move(&mut b).unwrap();
            assert_eq!(pt, (1, 3), "depth {max_depth}");
            assert_eq!(score, WIN_SCORE);
        }
        assert_eq!(best_expectimax_move(&mut b, EXPECTIMAX_DEPTH), Some((1, 3)));
    }

    #[test]
    fn test_blocks_open_three() {
        let mut b = board("XXX./OO../..../....");
        for max_depth in [1, HARD_DEPTH] {
            assert_eq!(best_minimax_move(&mut b, max_depth), Some((0, 3)), "depth {max_depth}");
        }
    }

    #[test]
    fn test_expectimax_gambles_on_random_opponent() {
        // A uniformly random X only finds (0, 3) one time in eleven, so the
        // average favours extending O's own lines over blocking.
        let mut b = board("XXX./OO../..../....");
        assert_eq!(best_expectimax_move(&mut b, EXPECTIMAX_DEPTH), Some((1, 2)));
    }

    #[test]
    fn test_expectimax_single_empty_cell() {
        // One empty cell, filling it with X creates no line.
        let mut b = board("XXOO/OOXX/XXOO/OOX.");
        let mut filled = b.clone();
        filled.apply_move((3, 3), Mark::X).unwrap();
        let expected = evaluate(&filled) as f64;
        assert_eq!(expectimax(&mut b, 0, EXPECTIMAX_DEPTH, false), expected);
    }

    #[test]
    fn test_expectimax_averages_opponent_replies() {
        // Two empty cells: X at (3, 3) completes the main diagonal, X at
        // (2, 3) does not.
        let mut b = board("XOOO/OXOO/OOX./XXO.");
        let score = expectimax(&mut b, 0, 1, false);
        let mut other = b.clone();
        other.apply_move((2, 3), Mark::X).unwrap();
        let expected = ((1 - WIN_SCORE) as f64 + evaluate(&other) as f64) / 2.0;
        assert_eq!(score, expected);
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut b = board("XXOO/OOXX/XXOO/OOXX");
        assert_eq!(best_minimax_move(&mut b, HARD_DEPTH), None);
        assert_eq!(best_expectimax_move(&mut b, EXPECTIMAX_DEPTH), None);
    }
}
