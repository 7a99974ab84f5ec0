//! Exploration module - Shake-triggered divergent pick selection.

mod divergent;

pub use divergent::{DivergentPick, DivergentPickSelector, UNUSUAL_THRESHOLD};
