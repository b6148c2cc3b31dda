//! Search module for the Qubic engine
//!
//! Contains the depth/width-bounded adversarial backtracking search that
//! looks for provable forced wins, its configuration, and the diagnostics
//! sink that replaces ad-hoc progress printing.

pub mod backtrack;

pub use backtrack::{NoopObserver, SearchConfig, SearchObserver, SearchStats, Searcher};
