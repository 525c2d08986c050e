//! tictac4: a 4x4 tic-tac-toe engine.
//!
//! The machine plays `O` and picks its moves with depth-limited search:
//! alpha-beta minimax for the minimax difficulties and expectimax for the
//! probabilistic one. A static open-lines evaluator scores positions where
//! the search is cut off.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, line table, scores and search depths
//! - [`board`] - Board state and moves
//! - [`rules`] - Win and draw detection
//! - [`eval`] - Static position evaluator
//! - [`search`] - Minimax and expectimax
//! - [`difficulty`] - Difficulty profiles
//! - [`select`] - Move selection per difficulty
//! - [`game`] - A live game session
//! - [`protocol`] - Text protocol front end
//! - [`arena`] - Self-play between profiles
//!
//! ## Example
//!
//! ```
//! use fastrand::Rng;
//! use tictac4::board::{Board, Mark};
//! use tictac4::difficulty::Difficulty;
//! use tictac4::select::select_move;
//!
//! let mut board = Board::new();
//! board.apply_move((0, 0), Mark::X).unwrap();
//!
//! let reply = select_move(&mut board, Difficulty::MinimaxHard, &mut Rng::new());
//! assert!(reply.is_some());
//! ```

pub mod arena;
pub mod board;
pub mod constants;
pub mod difficulty;
pub mod eval;
pub mod game;
pub mod protocol;
pub mod rules;
pub mod search;
pub mod select;
