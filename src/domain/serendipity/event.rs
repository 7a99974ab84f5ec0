//! Serendipity event types: what diverged, by how much, in which direction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::preference::{PreferenceVector, TasteAxis};

/// Dead-band around equality below which a difference counts as neutral.
const DIRECTION_DEAD_BAND: f64 = 0.1;

/// Which way an actual value landed relative to the expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectDirection {
    Higher,
    Lower,
    Neutral,
}

impl AspectDirection {
    /// Derives the direction with a +/-0.1 dead-band around equality.
    pub fn from_values(expected: f64, actual: f64) -> Self {
        let diff = actual - expected;
        if diff > DIRECTION_DEAD_BAND {
            AspectDirection::Higher
        } else if diff < -DIRECTION_DEAD_BAND {
            AspectDirection::Lower
        } else {
            AspectDirection::Neutral
        }
    }
}

impl fmt::Display for AspectDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectDirection::Higher => write!(f, "higher"),
            AspectDirection::Lower => write!(f, "lower"),
            AspectDirection::Neutral => write!(f, "about as expected"),
        }
    }
}

/// One axis where expected and actual differ enough to be notable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredAspect {
    pub axis: TasteAxis,
    pub expected: f64,
    pub actual: f64,
    /// Absolute difference; already in [0, 1] since components are.
    pub surprise_level: f64,
    pub direction: AspectDirection,
}

impl DiscoveredAspect {
    /// Builds an aspect from an expected/actual pair on one axis.
    pub fn from_values(axis: TasteAxis, expected: f64, actual: f64) -> Self {
        Self {
            axis,
            expected,
            actual,
            surprise_level: (actual - expected).abs(),
            direction: AspectDirection::from_values(expected, actual),
        }
    }
}

/// A detected divergence between an expected and an actual preference.
///
/// Exists only when the overall distance cleared the surprise threshold;
/// absence of an event is the ordinary non-surprise signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerendipityEvent {
    /// Euclidean distance between the vectors, in [0, sqrt(5)].
    pub divergence_score: f64,
    pub expected: PreferenceVector,
    pub actual: PreferenceVector,
    /// Axes whose individual difference met the per-dimension threshold.
    pub aspects: Vec<DiscoveredAspect>,
}

/// Overall significance of a detected divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    High,
    Moderate,
    Low,
}

/// How strongly the profile should be nudged in response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    SlightUpdate,
    ModerateUpdate,
    SignificantUpdate,
}

/// The analyzed reading of a serendipity event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerendipityAnalysis {
    pub significance: Significance,
    /// Serendipity is never discarded; learning is always recommended.
    pub should_learn: bool,
    /// One human-readable insight per discovered aspect.
    pub insights: Vec<String>,
    pub suggested_action: SuggestedAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_uses_dead_band_around_equality() {
        assert_eq!(AspectDirection::from_values(0.5, 0.55), AspectDirection::Neutral);
        assert_eq!(AspectDirection::from_values(0.5, 0.45), AspectDirection::Neutral);
        assert_eq!(AspectDirection::from_values(0.5, 0.65), AspectDirection::Higher);
        assert_eq!(AspectDirection::from_values(0.5, 0.35), AspectDirection::Lower);
    }

    #[test]
    fn aspect_surprise_is_absolute_difference() {
        let aspect = DiscoveredAspect::from_values(TasteAxis::Sweetness, 0.2, 0.9);
        assert!((aspect.surprise_level - 0.7).abs() < 1e-12);
        assert_eq!(aspect.direction, AspectDirection::Higher);

        let inverted = DiscoveredAspect::from_values(TasteAxis::Sweetness, 0.9, 0.2);
        assert_eq!(aspect.surprise_level, inverted.surprise_level);
        assert_eq!(inverted.direction, AspectDirection::Lower);
    }
}
