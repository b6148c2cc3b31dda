//! Candidate scoring and ranking with randomized tie-breaks
//!
//! [`score`] is a pure function of the line aggregates around one open
//! cell. [`Ranker`] turns it into a total ordering of all open cells:
//! descending by score, with exactly-equal scores ordered by a per-candidate
//! random value drawn once per ranking pass. Repeated rankings of the same
//! position may therefore permute equal-valued moves, but the set of
//! top-scored moves never changes.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Coord, LineState, Player};

use super::weights::RankWeights;

/// One ranked open cell.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub cell: Coord,
    pub score: i32,
    /// Random tie-break drawn for this ranking pass; compared only when
    /// scores are exactly equal.
    tiebreak: u8,
}

/// Score an open cell for `player` from the current line aggregates.
///
/// Sums one [`RankWeights`] contribution per line through the cell. The
/// cell itself is assumed open; owned cells are never candidates.
#[must_use]
pub fn score(board: &Board, cell: Coord, player: Player, weights: &RankWeights) -> i32 {
    let mut value = 0;
    for &li in board.geometry().lines_through(cell) {
        let li = li as usize;
        value += match (board.line_state(li), board.line_selected(li)) {
            (LineState::Mixed, _) => weights.mixed,
            (LineState::Owned(p), 3) if p == player => weights.win,
            (LineState::Owned(_), 3) => weights.block,
            (LineState::Owned(p), 2) if p == player => weights.pair_mine,
            (LineState::Owned(_), 2) => weights.pair_theirs,
            (LineState::Owned(p), 1) if p == player => weights.single_mine,
            (LineState::Owned(_), 1) => weights.single_theirs,
            (LineState::Open, _) => weights.open_line,
            // An owned line with 4 selected means the game is already won;
            // scoring is moot at that point.
            (LineState::Owned(_), _) => 0,
        };
    }
    value
}

/// Ranks open cells for a player, breaking exact ties randomly.
#[derive(Debug)]
pub struct Ranker {
    weights: RankWeights,
    rng: SmallRng,
}

impl Ranker {
    /// Ranker seeded from system entropy.
    pub fn new(weights: RankWeights) -> Self {
        Self {
            weights,
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Deterministic ranker for reproducible search.
    pub fn seeded(weights: RankWeights, seed: u64) -> Self {
        Self {
            weights,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn weights(&self) -> &RankWeights {
        &self.weights
    }

    /// Rank every open cell for `player`, best first.
    pub fn rank(&mut self, board: &Board, player: Player) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = board
            .open_cells()
            .map(|cell| Candidate {
                cell,
                score: score(board, cell, player, &self.weights),
                tiebreak: self.rng.random_range(0..100),
            })
            .collect();
        candidates.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| b.tiebreak.cmp(&a.tiebreak))
        });
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Apply a strict alternation of moves, panicking on an illegal one.
    fn play(board: &mut Board, moves: &[(u8, u8, u8)]) {
        for &(x, y, z) in moves {
            assert!(board.apply(Coord::new(x, y, z)), "illegal setup move");
        }
    }

    #[test]
    fn test_empty_board_scores_are_mobility_only() {
        let board = Board::new();
        let w = RankWeights::standard();
        // A corner lies on 7 open lines, a fully interior cell on 4.
        assert_eq!(score(&board, Coord::new(1, 1, 1), Player::A, &w), 7);
        assert_eq!(score(&board, Coord::new(2, 2, 1), Player::A, &w), 4);
    }

    #[test]
    fn test_winning_cell_dominates() {
        let mut board = Board::new();
        // A builds three on the x-line at y=1,z=1; B plays elsewhere.
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
        let w = RankWeights::standard();
        let s = score(&board, Coord::new(4, 1, 1), Player::A, &w);
        assert!(s >= w.win, "completing cell scored {s}");
        // The same cell seen from B is a must-block.
        let s = score(&board, Coord::new(4, 1, 1), Player::B, &w);
        assert!(s >= w.block && s < w.win, "blocking cell scored {s}");
    }

    #[test]
    fn test_mixed_lines_penalize() {
        let mut board = Board::new();
        // Both players on the x-line at y=1,z=1 kill it.
        play(&mut board, &[(1, 1, 1), (2, 1, 1)]);
        let w = RankWeights::standard();
        let open = score(&board, Coord::new(3, 1, 1), Player::A, &w);
        // (3,1,1) sits on 4 lines, one of them now mixed.
        assert_eq!(open, w.mixed + 3 * w.open_line);
    }

    #[test]
    fn test_rank_orders_best_first() {
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
        let mut ranker = Ranker::seeded(RankWeights::standard(), 7);
        let ranked = ranker.rank(&board, Player::A);
        assert_eq!(ranked[0].cell, Coord::new(4, 1, 1));
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_rank_covers_exactly_the_open_cells() {
        let mut board = Board::new();
        play(&mut board, &[(1, 1, 1), (2, 2, 2), (3, 3, 3)]);
        let mut ranker = Ranker::seeded(RankWeights::standard(), 0);
        let ranked = ranker.rank(&board, Player::B);
        assert_eq!(ranked.len(), 61);
        assert!(ranked.iter().all(|c| board.owner(c.cell).is_none()));
    }

    #[test]
    fn test_top_score_set_is_stable_across_passes() {
        let board = Board::new();
        let mut ranker = Ranker::seeded(RankWeights::standard(), 1);
        let top_set = |cands: &[Candidate]| {
            let best = cands[0].score;
            let mut cells: Vec<Coord> = cands
                .iter()
                .take_while(|c| c.score == best)
                .map(|c| c.cell)
                .collect();
            cells.sort();
            cells
        };
        let first = top_set(&ranker.rank(&board, Player::A));
        for _ in 0..10 {
            // Order among equals may permute, the set may not change.
            assert_eq!(top_set(&ranker.rank(&board, Player::A)), first);
        }
    }

    #[test]
    fn test_same_seed_same_order() {
        let board = Board::new();
        let mut r1 = Ranker::seeded(RankWeights::standard(), 42);
        let mut r2 = Ranker::seeded(RankWeights::standard(), 42);
        let order1: Vec<Coord> = r1.rank(&board, Player::A).iter().map(|c| c.cell).collect();
        let order2: Vec<Coord> = r2.rank(&board, Player::A).iter().map(|c| c.cell).collect();
        assert_eq!(order1, order2);
    }

    #[test]
    fn test_reactive_weights_score_nothing_quiet() {
        let mut board = Board::new();
        play(&mut board, &[(1, 1, 1), (4, 4, 4)]);
        let w = RankWeights::reactive();
        for cell in board.open_cells() {
            assert_eq!(score(&board, cell, Player::A, &w), 0);
        }
    }
}
