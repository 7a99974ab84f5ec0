//! Choice module - The user's decision and the always-permitted override.

mod decision;
mod override_handler;

pub use decision::UserChoice;
pub use override_handler::{ChoiceOutcome, OverrideHandler};
