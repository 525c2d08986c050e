//! Constants for board geometry, search scoring, and difficulty depths.
//!
//! The board is a fixed 4x4 grid stored row-major. Lines are listed once here
//! so the terminal detector and the evaluator walk exactly the same 10 sets
//! of cells.

use crate::board::Point;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Only 4x4 is supported.
pub const N: usize = 4;

/// Total number of cells on the board.
pub const CELLS: usize = N * N;

/// Number of winning lines: 4 rows, 4 columns, 2 diagonals.
pub const LINE_COUNT: usize = 2 * N + 2;

/// Every winning line as a set of four `(row, col)` points.
pub const LINES: [[Point; N]; LINE_COUNT] = [
    // Rows
    [(0, 0), (0, 1), (0, 2), (0, 3)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(3, 0), (3, 1), (3, 2), (3, 3)],
    // Columns
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(0, 3), (1, 3), (2, 3), (3, 3)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2), (3, 3)],
    [(0, 3), (1, 2), (2, 1), (3, 0)],
];

// =============================================================================
// Search Scoring
// =============================================================================

/// Base score of a decided game. A win found at depth `d` scores
/// `WIN_SCORE - d`, a loss scores `d - WIN_SCORE`.
pub const WIN_SCORE: i32 = 8;

/// Alpha-beta window bounds. Any real score fits comfortably inside.
pub const SCORE_INF: i32 = i32::MAX;

// =============================================================================
// Difficulty Depths (plies below the machine's candidate move)
// =============================================================================

/// Max depth for `Minimax Easy`: pure one-ply evaluator lookahead.
pub const EASY_DEPTH: u32 = 0;

/// Max depth for `Minimax Medium`: also considers the opponent's reply.
pub const MEDIUM_DEPTH: u32 = 1;

/// Max depth for `Minimax Hard`.
pub const HARD_DEPTH: u32 = 4;

/// Max depth for `Expectimax`.
pub const EXPECTIMAX_DEPTH: u32 = 3;
