//! Depth/width-bounded adversarial backtracking
//!
//! The search alternates two roles over the same recursion: whichever
//! player is about to move is the "mover" for that ply, and a ply's result
//! is mover-relative — `Some(cell)` means the mover achieves its objective
//! starting with `cell`. For the side being searched for the objective is
//! a forced win; for the opponent it is escaping one. Under that labeling
//! both roles reduce to the same rule: a candidate succeeds exactly when
//! the reply ply reports no success.
//!
//! Full-width, full-depth search of the 64-cell cube is infeasible, so
//! recursion depth is capped by `depth_limit` and each ply explores only
//! the `width_limit` best-ranked candidates. Hitting a bound is not an
//! error; it is a definitional "no forced outcome found", which may be a
//! false negative.
//!
//! The board is mutated in place and restored before every return, so the
//! search is not reentrant: one search per board at a time, and no other
//! reader may observe the board mid-search.

use tracing::{debug, trace};

use crate::board::{Board, Coord};
use crate::eval::{Ranker, RankWeights};

/// Bounds and weights for one searcher.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Maximum plies looked ahead before reporting "inconclusive".
    ///
    /// Even limits are conservative: the horizon then always cuts off a
    /// ply of the searched-for side, so an unproven line is never counted
    /// as a win. An odd limit can cut off the opponent's reply and claim
    /// wins the opponent could still escape.
    pub depth_limit: u8,
    /// Maximum ranked candidates explored per ply.
    pub width_limit: usize,
    /// Ranking weights; `weights.win` is also the proof threshold that
    /// short-circuits recursion.
    pub weights: RankWeights,
}

impl SearchConfig {
    /// Default bounds: 6 plies deep, 10 candidates wide.
    pub const fn standard() -> Self {
        Self {
            depth_limit: 6,
            width_limit: 10,
            weights: RankWeights::standard(),
        }
    }

    /// Slower, stronger preset: 8 plies deep.
    pub const fn deep() -> Self {
        Self {
            depth_limit: 8,
            ..Self::standard()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    /// Plies expanded (one per `prove` call that ranked candidates)
    pub nodes: u64,
    /// Trial moves applied and undone
    pub trial_moves: u64,
    /// Plies abandoned at the depth limit
    pub depth_cutoffs: u64,
}

/// Per-ply event sink for callers that want search visibility.
///
/// The default implementations do nothing, so an observer only overrides
/// what it cares about.
pub trait SearchObserver {
    /// A ply is being expanded at `level`.
    fn on_node(&mut self, level: u8) {
        let _ = level;
    }
    /// The mover at `level` was proven to achieve its objective via `cell`.
    fn on_success(&mut self, level: u8, cell: Coord) {
        let _ = (level, cell);
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Bounded backtracking searcher over a borrowed board.
#[derive(Debug)]
pub struct Searcher {
    config: SearchConfig,
    ranker: Ranker,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            ranker: Ranker::new(config.weights),
            config,
            stats: SearchStats::default(),
        }
    }

    /// Searcher with a deterministic tie-break stream.
    pub fn seeded(config: SearchConfig, seed: u64) -> Self {
        Self {
            ranker: Ranker::seeded(config.weights, seed),
            config,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Stats from the most recent [`Searcher::forced_win`] call.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Look for a move that forces a win for the player to move.
    ///
    /// Returns the first move of a winning sequence if one is proven within
    /// the depth/width bounds, `None` otherwise. The board is mutated
    /// during the search but restored exactly before returning.
    pub fn forced_win(
        &mut self,
        board: &mut Board,
        observer: &mut dyn SearchObserver,
    ) -> Option<Coord> {
        self.stats = SearchStats::default();
        let moves_before = board.move_count();
        let player_before = board.current_player();

        let found = self.prove(board, 0, observer);

        debug_assert_eq!(board.move_count(), moves_before);
        debug_assert_eq!(board.current_player(), player_before);
        debug_assert_eq!(board.validate(), Ok(()));

        match found {
            Some(cell) => debug!(%cell, nodes = self.stats.nodes, "forced win proven"),
            None => debug!(nodes = self.stats.nodes, "no forced outcome within bounds"),
        }
        found
    }

    /// One ply. `Some(cell)` means the player to move achieves its
    /// objective by playing `cell`; `None` means no proof within bounds.
    fn prove(
        &mut self,
        board: &mut Board,
        level: u8,
        observer: &mut dyn SearchObserver,
    ) -> Option<Coord> {
        if level >= self.config.depth_limit {
            self.stats.depth_cutoffs += 1;
            return None;
        }
        if board.is_won() || board.is_draw() {
            return None;
        }

        self.stats.nodes += 1;
        observer.on_node(level);

        let mover = board.current_player();
        let mut candidates = self.ranker.rank(board, mover);
        candidates.truncate(self.config.width_limit);

        for candidate in candidates {
            // A 3-owned line with its last cell open wins on the spot; no
            // recursion needed. This is the dominant path in real games.
            if candidate.score >= self.config.weights.win {
                trace!(level, cell = %candidate.cell, "immediate completion");
                observer.on_success(level, candidate.cell);
                return Some(candidate.cell);
            }

            self.stats.trial_moves += 1;
            let reply = board
                .trial(candidate.cell, |b| {
                    self.prove(b, level + 1, &mut *observer)
                })
                .expect("ranked candidate was not playable");

            // The candidate succeeds exactly when the other side has no
            // successful reply.
            if reply.is_none() {
                observer.on_success(level, candidate.cell);
                return Some(candidate.cell);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;

    fn play(board: &mut Board, moves: &[(u8, u8, u8)]) {
        for &(x, y, z) in moves {
            assert!(board.apply(Coord::new(x, y, z)), "illegal setup move");
        }
    }

    /// A owns three cells of the x-line at y=1,z=1; A to move.
    fn board_with_a_threat() -> Board {
        let mut board = Board::new();
        play(
            &mut board,
            &[
                (1, 1, 1),
                (4, 4, 2),
                (2, 1, 1),
                (3, 4, 2),
                (3, 1, 1),
                (2, 4, 3),
            ],
        );
        board
    }

    #[test]
    fn test_immediate_win_is_found_without_recursion() {
        let mut board = board_with_a_threat();
        let mut searcher = Searcher::seeded(SearchConfig::standard(), 3);
        let found = searcher.forced_win(&mut board, &mut NoopObserver);
        assert_eq!(found, Some(Coord::new(4, 1, 1)));
        assert_eq!(searcher.stats().trial_moves, 0);
    }

    #[test]
    fn test_double_threat_is_proven() {
        // A owns (2,1,1),(3,1,1) and (1,2,1),(1,3,1). Playing (1,1,1)
        // creates two 3-lines whose completion cells differ, so B can
        // block only one.
        let mut board = Board::new();
        play(
            &mut board,
            &[
                (2, 1, 1),
                (2, 2, 2),
                (3, 1, 1),
                (3, 3, 2),
                (1, 2, 1),
                (2, 3, 3),
                (1, 3, 1),
                (3, 2, 3),
            ],
        );
        let mut searcher = Searcher::seeded(SearchConfig::standard(), 11);
        let found = searcher.forced_win(&mut board, &mut NoopObserver);
        assert_eq!(found, Some(Coord::new(1, 1, 1)));
    }

    #[test]
    fn test_quiet_position_is_inconclusive() {
        let mut board = Board::new();
        play(&mut board, &[(1, 1, 1), (4, 4, 4)]);
        // Depth 2 cannot prove anything from a quiet opening.
        let config = SearchConfig {
            depth_limit: 2,
            ..SearchConfig::standard()
        };
        let mut searcher = Searcher::seeded(config, 5);
        assert_eq!(searcher.forced_win(&mut board, &mut NoopObserver), None);
        assert!(searcher.stats().depth_cutoffs > 0);
    }

    #[test]
    fn test_search_leaves_no_mutation_behind() {
        let mut board = Board::new();
        play(
            &mut board,
            &[(2, 2, 2), (1, 1, 1), (3, 3, 3), (2, 1, 1), (2, 3, 2), (3, 1, 1)],
        );
        let owners_before: Vec<_> = board.open_cells().collect();
        let history_before = board.move_count();
        let player_before = board.current_player();

        let mut searcher = Searcher::seeded(SearchConfig::standard(), 9);
        let _ = searcher.forced_win(&mut board, &mut NoopObserver);

        assert_eq!(board.open_cells().collect::<Vec<_>>(), owners_before);
        assert_eq!(board.move_count(), history_before);
        assert_eq!(board.current_player(), player_before);
        assert_eq!(board.validate(), Ok(()));
    }

    #[test]
    fn test_terminal_board_is_inconclusive() {
        let mut board = board_with_a_threat();
        assert!(board.apply(Coord::new(4, 1, 1)));
        assert!(board.is_won());
        let mut searcher = Searcher::seeded(SearchConfig::standard(), 2);
        assert_eq!(searcher.forced_win(&mut board, &mut NoopObserver), None);
    }

    #[test]
    fn test_observer_sees_success() {
        #[derive(Default)]
        struct Recorder {
            nodes: u64,
            successes: Vec<(u8, Coord)>,
        }
        impl SearchObserver for Recorder {
            fn on_node(&mut self, _level: u8) {
                self.nodes += 1;
            }
            fn on_success(&mut self, level: u8, cell: Coord) {
                self.successes.push((level, cell));
            }
        }

        let mut board = board_with_a_threat();
        let mut searcher = Searcher::seeded(SearchConfig::standard(), 1);
        let mut recorder = Recorder::default();
        let found = searcher.forced_win(&mut board, &mut recorder);
        assert_eq!(recorder.successes, vec![(0, found.unwrap())]);
        assert_eq!(recorder.nodes, searcher.stats().nodes);
    }

    #[test]
    fn test_width_limit_caps_exploration() {
        let mut board = Board::new();
        play(&mut board, &[(2, 2, 2), (3, 3, 3)]);
        let config = SearchConfig {
            depth_limit: 2,
            width_limit: 3,
            ..SearchConfig::standard()
        };
        let mut searcher = Searcher::seeded(config, 0);
        let found = searcher.forced_win(&mut board, &mut NoopObserver);
        assert_eq!(found, None);
        // Root expands 3 candidates; each reply ply claims its first
        // candidate once level 2 is cut off, so one trial each.
        assert_eq!(searcher.stats().nodes, 4);
        assert_eq!(searcher.stats().trial_moves, 6);
        assert_eq!(searcher.stats().depth_cutoffs, 3);
    }
}
