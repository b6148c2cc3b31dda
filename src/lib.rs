//! Qubic decision engine
//!
//! An adversarial engine for Qubic (4×4×4 three-dimensional tic-tac-toe):
//! two players alternately claim cells of a cube, and owning all 4 cells of
//! any of the 76 straight lines wins. The engine tracks board and line
//! state incrementally, ranks open cells with a line-aggregate heuristic,
//! and runs a depth/width-bounded backtracking search for forced wins,
//! falling back to the best-ranked move when no proof is found.
//!
//! # Architecture
//!
//! - [`board`]: cell/line model with incremental aggregates, apply/undo
//!   with stack discipline, and the injectable line geometry
//! - [`eval`]: the pure scoring function and tie-break-randomized ranker
//! - [`search`]: bounded adversarial backtracking with diagnostics
//! - [`engine`]: the [`QubicAi`] surface and its three implementations
//!
//! # Quick Start
//!
//! ```
//! use qubic::{AiEngine, Board, Coord, Player, QubicAi, SearchConfig};
//!
//! let mut board = Board::new();
//! assert!(board.apply(Coord::new(1, 1, 1))); // player A opens
//!
//! // Player B asks the engine for a reply; the engine restores the board
//! // after searching, so the caller applies the move itself.
//! let mut engine = AiEngine::seeded(SearchConfig::standard(), 42);
//! let reply = engine.find_move(&mut board, Player::B).unwrap();
//! assert!(board.apply(reply));
//! ```
//!
//! # Bounds, not perfection
//!
//! Full-width search of the 64-cell cube is infeasible, so both recursion
//! depth and per-ply branching are capped ([`SearchConfig`]). The engine
//! plays markedly stronger as the bounds grow but never guarantees optimal
//! play; "no forced win found" may be a false negative.
//!
//! # Concurrency
//!
//! The engine mutates the board in place during search and is therefore
//! not reentrant: run one search per board at a time, and don't let other
//! readers observe the board mid-search. Wrap `find_move` in an exclusive
//! lock or hand the search a dedicated clone if that matters.

pub mod board;
pub mod engine;
pub mod eval;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Coord, Geometry, LineState, Player, StateError};
pub use engine::{AiEngine, DefensiveAi, GreedyAi, MoveKind, MoveResult, QubicAi};
pub use eval::RankWeights;
pub use search::{SearchConfig, SearchObserver, SearchStats};
