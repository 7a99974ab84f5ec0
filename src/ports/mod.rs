//! Ports - narrow capability interfaces to external collaborators.
//!
//! The engine consumes these synchronously from its own perspective; any
//! real waiting happens inside the adapters behind them.

mod effect_sink;
mod preference_inference;

pub use effect_sink::{Destination, Effect, EffectSink, HapticKind};
pub use preference_inference::{
    AxisProbability, ConfidenceBand, InferenceContext, InferredPreference, PreferenceInference,
};
