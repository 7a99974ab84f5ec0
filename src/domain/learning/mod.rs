//! Learning module - Partner profiles and adaptive preference learning.

mod learner;
mod profile;

pub use learner::{
    AxisDelta, LearningOutcome, LearningPriority, LearningTarget, PreferenceLearner,
};
pub use profile::{LearningEntry, ObservationSource, PartnerProfile, PreferenceObservation};
