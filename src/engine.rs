//! AI surface: engines that produce a move for a player on a board
//!
//! Three implementations share the [`QubicAi`] capability:
//!
//! 1. [`AiEngine`] — win-now/block-now fast path, then bounded
//!    backtracking for a forced win, then the heuristic best move
//! 2. [`GreedyAi`] — the top-ranked move outright, no lookahead
//! 3. [`DefensiveAi`] — reactive weights only: wins and blocks, otherwise
//!    indifferent
//!
//! # Example
//!
//! ```
//! use qubic::{AiEngine, Board, Coord, Player, QubicAi, SearchConfig};
//!
//! let mut board = Board::new();
//! board.apply(Coord::new(1, 1, 1));
//!
//! // B responds; seeded for a reproducible doc test
//! let mut engine = AiEngine::seeded(SearchConfig::standard(), 42);
//! if let Some(cell) = engine.find_move(&mut board, Player::B) {
//!     assert!(board.apply(cell));
//! }
//! ```

use std::time::Instant;

use tracing::debug;

use crate::board::{Board, Coord, Player};
use crate::eval::{Ranker, RankWeights};
use crate::search::{NoopObserver, SearchConfig, SearchObserver, SearchStats, Searcher};

/// Which phase of the engine produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Win-now or block-now candidate, returned without any recursion
    Immediate,
    /// First move of a forced win proven by the bounded search
    ForcedWin,
    /// Heuristic fallback: the top-ranked move
    Heuristic,
}

/// A chosen move with search diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct MoveResult {
    /// Best move found; `None` only on a terminal or full board
    pub best_move: Option<Coord>,
    /// Ranker score of the chosen move on the pre-move board
    pub score: i32,
    /// Phase that produced the move
    pub kind: MoveKind,
    /// Wall time spent, in milliseconds
    pub time_ms: u64,
    /// Bounded-search counters (all zero when the search never ran)
    pub stats: SearchStats,
}

/// Capability shared by every AI: given a board and the player to act for,
/// produce a legal open cell.
///
/// The board is borrowed mutably because engines may run trial moves on it;
/// every implementation restores the board exactly before returning. The
/// caller remains responsible for actually applying the chosen move.
pub trait QubicAi {
    fn find_move(&mut self, board: &mut Board, player: Player) -> Option<Coord>;
}

/// The full engine: immediate tactics, bounded forced-win search, and a
/// heuristic fallback, in that order.
pub struct AiEngine {
    searcher: Searcher,
    ranker: Ranker,
}

impl AiEngine {
    /// Engine with the given bounds, tie-breaking from system entropy.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            searcher: Searcher::new(config),
            ranker: Ranker::new(config.weights),
        }
    }

    /// Deterministic engine for reproducible games and tests.
    pub fn seeded(config: SearchConfig, seed: u64) -> Self {
        Self {
            searcher: Searcher::seeded(config, seed),
            ranker: Ranker::seeded(config.weights, seed ^ 0x9e37_79b9),
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        self.searcher.config()
    }

    /// Choose a move with full diagnostics, reporting per-ply events to
    /// `observer`.
    pub fn find_move_observed(
        &mut self,
        board: &mut Board,
        player: Player,
        observer: &mut dyn SearchObserver,
    ) -> MoveResult {
        let start = Instant::now();
        debug_assert_eq!(board.current_player(), player);

        if board.is_won() || board.is_draw() {
            return MoveResult {
                best_move: None,
                score: 0,
                kind: MoveKind::Heuristic,
                time_ms: elapsed_ms(start),
                stats: SearchStats::default(),
            };
        }

        let weights = self.searcher.config().weights;

        // 1. Win now or block now. A line at 3-for-me or 3-for-them
        // outranks everything else by construction, so one ranking pass
        // settles it without recursion.
        let ranked = self.ranker.rank(board, player);
        let top = match ranked.first() {
            Some(top) => *top,
            None => {
                return MoveResult {
                    best_move: None,
                    score: 0,
                    kind: MoveKind::Heuristic,
                    time_ms: elapsed_ms(start),
                    stats: SearchStats::default(),
                }
            }
        };
        if top.score >= weights.block {
            debug!(cell = %top.cell, score = top.score, "immediate tactic");
            return MoveResult {
                best_move: Some(top.cell),
                score: top.score,
                kind: MoveKind::Immediate,
                time_ms: elapsed_ms(start),
                stats: SearchStats::default(),
            };
        }

        // 2. Bounded backtracking for a provable forced win.
        if let Some(cell) = self.searcher.forced_win(board, observer) {
            return MoveResult {
                best_move: Some(cell),
                score: crate::eval::score(board, cell, player, &weights),
                kind: MoveKind::ForcedWin,
                time_ms: elapsed_ms(start),
                stats: self.searcher.stats(),
            };
        }

        // 3. No proof within bounds: fall back to the heuristic best move
        // on the real, untouched board.
        debug!(cell = %top.cell, score = top.score, "heuristic fallback");
        MoveResult {
            best_move: Some(top.cell),
            score: top.score,
            kind: MoveKind::Heuristic,
            time_ms: elapsed_ms(start),
            stats: self.searcher.stats(),
        }
    }

    /// Choose a move with full diagnostics.
    #[must_use]
    pub fn find_move_with_stats(&mut self, board: &mut Board, player: Player) -> MoveResult {
        self.find_move_observed(board, player, &mut NoopObserver)
    }
}

impl QubicAi for AiEngine {
    fn find_move(&mut self, board: &mut Board, player: Player) -> Option<Coord> {
        self.find_move_with_stats(board, player).best_move
    }
}

impl Default for AiEngine {
    fn default() -> Self {
        Self::new(SearchConfig::standard())
    }
}

/// One-ply AI: returns the top-ranked move outright.
pub struct GreedyAi {
    ranker: Ranker,
}

impl GreedyAi {
    pub fn new(weights: RankWeights) -> Self {
        Self {
            ranker: Ranker::new(weights),
        }
    }

    pub fn seeded(weights: RankWeights, seed: u64) -> Self {
        Self {
            ranker: Ranker::seeded(weights, seed),
        }
    }
}

impl QubicAi for GreedyAi {
    fn find_move(&mut self, board: &mut Board, player: Player) -> Option<Coord> {
        if board.is_won() {
            return None;
        }
        self.ranker.rank(board, player).first().map(|c| c.cell)
    }
}

impl Default for GreedyAi {
    fn default() -> Self {
        Self::new(RankWeights::standard())
    }
}

/// One-ply reactive AI: attends only to win-now and block-now lines and is
/// otherwise indifferent, so it punishes blunders without ever building a
/// plan of its own.
pub struct DefensiveAi {
    ranker: Ranker,
}

impl DefensiveAi {
    pub fn new() -> Self {
        Self {
            ranker: Ranker::new(RankWeights::reactive()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            ranker: Ranker::seeded(RankWeights::reactive(), seed),
        }
    }
}

impl QubicAi for DefensiveAi {
    fn find_move(&mut self, board: &mut Board, player: Player) -> Option<Coord> {
        if board.is_won() {
            return None;
        }
        self.ranker.rank(board, player).first().map(|c| c.cell)
    }
}

impl Default for DefensiveAi {
    fn default() -> Self {
        Self::new()
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
