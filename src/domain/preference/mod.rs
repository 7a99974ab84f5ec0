//! Preference module - Taste axes, preference vectors, and happiness weights.

mod axis;
mod vector;
mod weights;

pub use axis::TasteAxis;
pub use vector::PreferenceVector;
pub use weights::HappinessWeights;
