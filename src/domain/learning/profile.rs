//! PartnerProfile aggregate - a preference estimate with an auditable history.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CakeId, PartnerId, Timestamp};
use crate::domain::preference::{PreferenceVector, TasteAxis};

/// History entries saturate here when deriving confidence from depth.
const CONFIDENCE_SATURATION_DEPTH: usize = 10;

/// Maximum confidence contribution from history depth.
const DEPTH_CONFIDENCE_CEILING: f64 = 0.7;

/// Maximum confidence contribution from accumulated learning gains.
const GAIN_CONFIDENCE_CEILING: f64 = 0.3;

/// Where a preference observation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationSource {
    Initial,
    UserInput,
    ObservedChoice,
    Serendipity,
    ExternalInference,
}

/// One entry in a profile's append-only observation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceObservation {
    pub vector: PreferenceVector,
    pub source: ObservationSource,
    /// The cake involved, when the observation came from a concrete choice.
    pub cake_id: Option<CakeId>,
    pub recorded_at: Timestamp,
}

/// A record of one axis moving, and why the estimate got more trustworthy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningEntry {
    pub axis: TasteAxis,
    pub previous: f64,
    pub updated: f64,
    pub confidence_gain: f64,
    pub recorded_at: Timestamp,
}

/// The longer-lived estimate of a partner's cake preferences.
///
/// Mutation is exclusively additive-and-replace: a new profile value is
/// derived from the old one plus one new history entry and zero or more
/// learning entries. The old value is never edited in place, preserving the
/// auditability of the history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerProfile {
    id: PartnerId,
    name: String,
    preferences: PreferenceVector,
    history: Vec<PreferenceObservation>,
    learning_log: Vec<LearningEntry>,
}

impl PartnerProfile {
    /// Creates a profile seeded with an initial observation.
    pub fn new(id: PartnerId, name: String, initial: PreferenceVector, at: Timestamp) -> Self {
        Self {
            id,
            name,
            preferences: initial,
            history: vec![PreferenceObservation {
                vector: initial,
                source: ObservationSource::Initial,
                cake_id: None,
                recorded_at: at,
            }],
            learning_log: Vec::new(),
        }
    }

    pub fn id(&self) -> PartnerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current preference estimate.
    pub fn preferences(&self) -> &PreferenceVector {
        &self.preferences
    }

    /// The ordered observation history, oldest first.
    pub fn history(&self) -> &[PreferenceObservation] {
        &self.history
    }

    /// Every recorded per-axis learning step, oldest first.
    pub fn learning_log(&self) -> &[LearningEntry] {
        &self.learning_log
    }

    /// Derives a new profile with updated preferences.
    ///
    /// Appends exactly one history entry plus the given learning entries;
    /// everything previously recorded is carried over untouched.
    pub fn with_revision(
        &self,
        preferences: PreferenceVector,
        source: ObservationSource,
        cake_id: Option<CakeId>,
        learning_entries: Vec<LearningEntry>,
        at: Timestamp,
    ) -> Self {
        let mut history = self.history.clone();
        history.push(PreferenceObservation {
            vector: preferences,
            source,
            cake_id,
            recorded_at: at,
        });
        let mut learning_log = self.learning_log.clone();
        learning_log.extend(learning_entries);

        Self {
            id: self.id,
            name: self.name.clone(),
            preferences,
            history,
            learning_log,
        }
    }

    /// Confidence in the estimate for one axis, in [0, 1].
    ///
    /// History depth saturates at 10 entries and contributes up to 0.7;
    /// accumulated learning gains on the axis contribute up to 0.3.
    pub fn axis_confidence(&self, axis: TasteAxis) -> f64 {
        let depth = self.history.len().min(CONFIDENCE_SATURATION_DEPTH) as f64;
        let depth_part =
            depth / CONFIDENCE_SATURATION_DEPTH as f64 * DEPTH_CONFIDENCE_CEILING;

        let gain_part = self
            .learning_log
            .iter()
            .filter(|entry| entry.axis == axis)
            .map(|entry| entry.confidence_gain)
            .sum::<f64>()
            .min(GAIN_CONFIDENCE_CEILING);

        (depth_part + gain_part).min(1.0)
    }
}
