//! Scoring weights for move ranking
//!
//! Each weight is the contribution one line makes to a candidate cell's
//! score, keyed on the line's aggregate state and selected count as seen
//! from the player being ranked for. The magnitudes are tiered: a
//! completable line (`win`) dominates everything, a must-block line
//! (`block`) dominates every non-critical weight, and the small values
//! merely order otherwise-equivalent moves.

/// Tunable contribution table for [`score`](super::score).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankWeights {
    /// Line owned by me with 3 cells selected: playing here wins outright.
    pub win: i32,
    /// Line owned by the opponent with 3 selected: must block now.
    pub block: i32,
    /// Line owned by me with 2 selected. Higher values play more
    /// aggressively toward building threats.
    pub pair_mine: i32,
    /// Line owned by the opponent with 2 selected (defensive awareness).
    pub pair_theirs: i32,
    /// Line owned by me with 1 selected.
    pub single_mine: i32,
    /// Line owned by the opponent with 1 selected.
    pub single_theirs: i32,
    /// Untouched line (mobility bonus).
    pub open_line: i32,
    /// Dead line touched by both players.
    pub mixed: i32,
}

impl RankWeights {
    /// Balanced table used by the default engine.
    pub const fn standard() -> Self {
        Self {
            win: 50_000,
            block: 4_000,
            pair_mine: 10,
            pair_theirs: 3,
            single_mine: 2,
            single_theirs: 0,
            open_line: 1,
            mixed: -1,
        }
    }

    /// Doubles the own-pair weight, favoring threat building over safety.
    pub const fn aggressive() -> Self {
        Self {
            pair_mine: 20,
            ..Self::standard()
        }
    }

    /// Purely reactive table: only win-now and block-now lines score at
    /// all, so ranking ignores everything but 3-selected lines.
    pub const fn reactive() -> Self {
        Self {
            win: 50_000,
            block: 4_000,
            pair_mine: 0,
            pair_theirs: 0,
            single_mine: 0,
            single_theirs: 0,
            open_line: 0,
            mixed: 0,
        }
    }
}

impl Default for RankWeights {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_hierarchy() {
        let w = RankWeights::standard();
        // A winning move must dominate any sum of non-winning contributions,
        // and a block must dominate all non-critical weights.
        assert!(w.win > w.block * 7);
        assert!(w.block > (w.pair_mine + w.pair_theirs + w.single_mine + w.open_line) * 7);
        assert!(w.pair_mine > w.pair_theirs);
        assert!(w.pair_theirs > w.single_mine);
        assert!(w.mixed < 0);
    }

    #[test]
    fn test_aggressive_preset() {
        let w = RankWeights::aggressive();
        assert_eq!(w.pair_mine, 2 * RankWeights::standard().pair_mine);
        assert_eq!(w.win, RankWeights::standard().win);
    }

    #[test]
    fn test_reactive_preset_only_scores_threats() {
        let w = RankWeights::reactive();
        assert_eq!(w.pair_mine, 0);
        assert_eq!(w.pair_theirs, 0);
        assert_eq!(w.single_mine, 0);
        assert_eq!(w.single_theirs, 0);
        assert_eq!(w.open_line, 0);
        assert_eq!(w.mixed, 0);
        assert!(w.win > 0 && w.block > 0);
    }
}
