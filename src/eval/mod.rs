//! Move ranking for the Qubic engine
//!
//! Contains:
//! - Scoring weights for line-aggregate contributions
//! - The pure scoring function and the tie-break-randomized ranker

pub mod ranker;
pub mod weights;

pub use ranker::{score, Candidate, Ranker};
pub use weights::RankWeights;
