//! Scoring module - Weighted happiness scoring and candidate ranking.

mod happiness;
mod ranking;

pub use happiness::{HappinessModel, HappinessScore};
pub use ranking::{CakeCandidate, CakeRanking, RankedCake};
