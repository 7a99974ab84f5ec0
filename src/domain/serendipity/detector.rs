//! SerendipityDetector - threshold-based divergence classification.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::preference::{PreferenceVector, TasteAxis};

use super::{
    DiscoveredAspect, SerendipityAnalysis, SerendipityEvent, Significance, SuggestedAction,
};

/// Pure, state-machine-free divergence detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SerendipityDetector {
    /// Overall distance at or above which an event exists.
    surprise_threshold: f64,
    /// Distance above which significance is High.
    strong_threshold: f64,
    /// Per-axis absolute difference at or above which an aspect is notable.
    dimension_threshold: f64,
}

impl SerendipityDetector {
    /// Default overall surprise threshold.
    pub const SURPRISE_THRESHOLD: f64 = 0.5;

    /// Default strong-divergence threshold.
    pub const STRONG_THRESHOLD: f64 = 0.7;

    /// Default per-dimension discovery threshold.
    pub const DIMENSION_THRESHOLD: f64 = 0.3;

    /// Creates a detector with explicit thresholds.
    pub fn new(surprise_threshold: f64, strong_threshold: f64, dimension_threshold: f64) -> Self {
        Self {
            surprise_threshold,
            strong_threshold,
            dimension_threshold,
        }
    }

    /// The overall surprise threshold in use.
    pub fn surprise_threshold(&self) -> f64 {
        self.surprise_threshold
    }

    /// Measures divergence and returns an event when it clears the threshold.
    ///
    /// Below the threshold there is no event; ordinary agreement is the
    /// expected outcome, not an error.
    pub fn detect(
        &self,
        expected: &PreferenceVector,
        actual: &PreferenceVector,
    ) -> Option<SerendipityEvent> {
        let divergence = expected.distance_to(actual);
        if divergence < self.surprise_threshold {
            return None;
        }

        let aspects: Vec<DiscoveredAspect> = TasteAxis::ALL
            .iter()
            .filter_map(|&axis| {
                let e = expected.component(axis);
                let a = actual.component(axis);
                if (a - e).abs() >= self.dimension_threshold {
                    Some(DiscoveredAspect::from_values(axis, e, a))
                } else {
                    None
                }
            })
            .collect();

        debug!(
            divergence,
            aspect_count = aspects.len(),
            "serendipity detected"
        );

        Some(SerendipityEvent {
            divergence_score: divergence,
            expected: *expected,
            actual: *actual,
            aspects,
        })
    }

    /// Classifies an event's significance and derives insights.
    ///
    /// Low significance is unreachable through [`Self::detect`] but remains
    /// representable for events constructed elsewhere. Learning is always
    /// recommended.
    pub fn analyze(&self, event: &SerendipityEvent) -> SerendipityAnalysis {
        let significance = if event.divergence_score > self.strong_threshold {
            Significance::High
        } else if event.divergence_score >= self.surprise_threshold {
            Significance::Moderate
        } else {
            Significance::Low
        };

        let insights = event
            .aspects
            .iter()
            .map(|aspect| {
                format!(
                    "{} landed {} than expected ({:.2} vs {:.2})",
                    aspect.axis, aspect.direction, aspect.actual, aspect.expected
                )
            })
            .collect();

        let peak_surprise = event
            .aspects
            .iter()
            .map(|a| a.surprise_level)
            .fold(0.0, f64::max);
        let suggested_action = if peak_surprise > 0.5 {
            SuggestedAction::SignificantUpdate
        } else if peak_surprise > 0.3 {
            SuggestedAction::ModerateUpdate
        } else {
            SuggestedAction::SlightUpdate
        };

        SerendipityAnalysis {
            significance,
            should_learn: true,
            insights,
            suggested_action,
        }
    }

    /// Raw divergence between two vectors. Monitoring helper, no side effects.
    pub fn divergence(&self, expected: &PreferenceVector, actual: &PreferenceVector) -> f64 {
        expected.distance_to(actual)
    }

    /// Divergence relative to the surprise threshold, clamped to [0, 1].
    pub fn warning_level(&self, expected: &PreferenceVector, actual: &PreferenceVector) -> f64 {
        (self.divergence(expected, actual) / self.surprise_threshold).clamp(0.0, 1.0)
    }
}

impl Default for SerendipityDetector {
    fn default() -> Self {
        Self::new(
            Self::SURPRISE_THRESHOLD,
            Self::STRONG_THRESHOLD,
            Self::DIMENSION_THRESHOLD,
        )
    }
}
