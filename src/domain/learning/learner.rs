//! PreferenceLearner - moves a partner profile toward observed reality.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::foundation::{CakeId, Timestamp};
use crate::domain::preference::{PreferenceVector, TasteAxis};
use crate::domain::serendipity::SerendipityEvent;

use super::{LearningEntry, ObservationSource, PartnerProfile};

/// Per-axis deltas above this magnitude count as significant.
const SIGNIFICANT_CHANGE_THRESHOLD: f64 = 0.1;

/// How much one axis moved in a learning pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDelta {
    pub axis: TasteAxis,
    pub previous: f64,
    pub updated: f64,
}

impl AxisDelta {
    /// Signed movement on the axis.
    pub fn delta(&self) -> f64 {
        self.updated - self.previous
    }
}

/// A serendipity learning pass: the new profile plus a change summary.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningOutcome {
    pub profile: PartnerProfile,
    pub deltas: Vec<AxisDelta>,
    /// True when any axis moved by more than 0.1.
    pub has_significant_changes: bool,
}

/// Priority tier for a learning target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningPriority {
    High,
    Medium,
    Low,
}

/// One discovered aspect mapped to how urgently it should be learned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningTarget {
    pub axis: TasteAxis,
    pub priority: LearningPriority,
    pub suggested_rate: f64,
}

/// Adaptive preference learner with bounded learning rates.
///
/// Higher surprise and lower confidence both push the rate upward: uncertain
/// or surprising data should move the estimate more.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreferenceLearner {
    base_rate: f64,
    min_rate: f64,
    max_rate: f64,
}

impl PreferenceLearner {
    /// Default base learning rate.
    pub const BASE_RATE: f64 = 0.3;

    /// Default lower learning-rate bound.
    pub const MIN_RATE: f64 = 0.1;

    /// Default upper learning-rate bound.
    pub const MAX_RATE: f64 = 0.5;

    /// Creates a learner with explicit rate settings.
    pub fn new(base_rate: f64, min_rate: f64, max_rate: f64) -> Self {
        Self {
            base_rate,
            min_rate,
            max_rate,
        }
    }

    /// Clamps a requested rate into the configured bounds.
    fn clamp_rate(&self, rate: f64) -> f64 {
        rate.clamp(self.min_rate, self.max_rate)
    }

    /// Applies a serendipity event to the profile.
    ///
    /// Each discovered aspect moves its axis by `(actual - expected) * rate`,
    /// clamped to the unit interval. Appends one Serendipity history entry
    /// and one learning entry per aspect (confidence gain = surprise x rate).
    pub fn learn_from_serendipity(
        &self,
        profile: &PartnerProfile,
        event: &SerendipityEvent,
        rate: Option<f64>,
        at: Timestamp,
    ) -> LearningOutcome {
        let rate = self.clamp_rate(rate.unwrap_or(self.base_rate));

        let mut updated = *profile.preferences();
        let mut deltas = Vec::with_capacity(event.aspects.len());
        let mut entries = Vec::with_capacity(event.aspects.len());

        for aspect in &event.aspects {
            let previous = updated.component(aspect.axis);
            let shifted = previous + (aspect.actual - aspect.expected) * rate;
            updated = updated.with_component(aspect.axis, shifted);
            let now = updated.component(aspect.axis);

            deltas.push(AxisDelta {
                axis: aspect.axis,
                previous,
                updated: now,
            });
            entries.push(LearningEntry {
                axis: aspect.axis,
                previous,
                updated: now,
                confidence_gain: aspect.surprise_level * rate,
                recorded_at: at,
            });
        }

        let has_significant_changes = deltas
            .iter()
            .any(|d| d.delta().abs() > SIGNIFICANT_CHANGE_THRESHOLD);

        debug!(
            rate,
            aspects = deltas.len(),
            significant = has_significant_changes,
            "learned from serendipity"
        );

        LearningOutcome {
            profile: profile.with_revision(
                updated,
                ObservationSource::Serendipity,
                None,
                entries,
                at,
            ),
            deltas,
            has_significant_changes,
        }
    }

    /// Blends an observed choice into the profile, no detection involved.
    pub fn learn_from_observation(
        &self,
        profile: &PartnerProfile,
        observed: &PreferenceVector,
        cake_id: CakeId,
        rate: Option<f64>,
        at: Timestamp,
    ) -> PartnerProfile {
        let rate = self.clamp_rate(rate.unwrap_or(self.base_rate));
        let blended = profile
            .preferences()
            .blend(observed, 1.0 - rate, rate)
            .expect("bounded rates always yield a positive weight sum");

        profile.with_revision(
            blended,
            ObservationSource::ObservedChoice,
            Some(cake_id),
            vec![],
            at,
        )
    }

    /// The adaptive rate: `0.5 * (1 - confidence) + 0.5 * surprise`, bounded.
    pub fn adaptive_learning_rate(&self, confidence: f64, surprise: f64) -> f64 {
        self.clamp_rate(0.5 * (1.0 - confidence) + 0.5 * surprise)
    }

    /// Maps each discovered aspect to a priority and a suggested rate.
    ///
    /// Pure re-derivation from the event, no mutation. The suggested rate
    /// assumes neutral (0.5) confidence since the event alone carries none.
    pub fn identify_learning_targets(&self, event: &SerendipityEvent) -> Vec<LearningTarget> {
        event
            .aspects
            .iter()
            .map(|aspect| {
                let priority = if aspect.surprise_level > 0.5 {
                    LearningPriority::High
                } else if aspect.surprise_level > 0.3 {
                    LearningPriority::Medium
                } else {
                    LearningPriority::Low
                };
                LearningTarget {
                    axis: aspect.axis,
                    priority,
                    suggested_rate: self.adaptive_learning_rate(0.5, aspect.surprise_level),
                }
            })
            .collect()
    }
}

impl Default for PreferenceLearner {
    fn default() -> Self {
        Self::new(Self::BASE_RATE, Self::MIN_RATE, Self::MAX_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::PartnerId;
    use crate::domain::serendipity::SerendipityDetector;

    fn vec5(c: [f64; 5]) -> PreferenceVector {
        PreferenceVector::from_components(c).unwrap()
    }

    fn ts() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    fn profile(initial: [f64; 5]) -> PartnerProfile {
        PartnerProfile::new(PartnerId::new(), "Alex".to_string(), vec5(initial), ts())
    }

    fn event(expected: [f64; 5], actual: [f64; 5]) -> SerendipityEvent {
        SerendipityDetector::default()
            .detect(&vec5(expected), &vec5(actual))
            .expect("test vectors must diverge enough for an event")
    }

    #[test]
    fn learn_from_serendipity_moves_each_discovered_axis() {
        let learner = PreferenceLearner::default();
        let p = profile([0.5; 5]);
        let e = event([0.5; 5], [1.0, 0.0, 0.5, 0.5, 0.5]);

        let outcome = learner.learn_from_serendipity(&p, &e, None, ts());

        // Sweetness: 0.5 + (1.0 - 0.5) * 0.3 = 0.65; sourness mirrors down.
        let prefs = outcome.profile.preferences();
        assert!((prefs.component(TasteAxis::Sweetness) - 0.65).abs() < 1e-12);
        assert!((prefs.component(TasteAxis::Sourness) - 0.35).abs() < 1e-12);
        assert_eq!(prefs.component(TasteAxis::Texture), 0.5);

        assert_eq!(outcome.deltas.len(), 2);
        assert!(outcome.has_significant_changes);

        let history = outcome.profile.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].source, ObservationSource::Serendipity);
        assert_eq!(outcome.profile.learning_log().len(), 2);
    }

    #[test]
    fn learn_from_serendipity_records_confidence_gains() {
        let learner = PreferenceLearner::default();
        let p = profile([0.5; 5]);
        let e = event([0.5; 5], [1.0, 0.0, 0.5, 0.5, 0.5]);

        let outcome = learner.learn_from_serendipity(&p, &e, None, ts());
        for entry in outcome.profile.learning_log() {
            // surprise 0.5 at rate 0.3.
            assert!((entry.confidence_gain - 0.15).abs() < 1e-12);
        }
    }

    #[test]
    fn learn_from_serendipity_clamps_requested_rate() {
        let learner = PreferenceLearner::default();
        let p = profile([0.5; 5]);
        let e = event([0.5; 5], [1.0, 0.0, 0.5, 0.5, 0.5]);

        let outcome = learner.learn_from_serendipity(&p, &e, Some(2.0), ts());
        // Rate clamps to 0.5: sweetness becomes 0.5 + 0.5 * 0.5 = 0.75.
        let prefs = outcome.profile.preferences();
        assert!((prefs.component(TasteAxis::Sweetness) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn learn_from_serendipity_clamps_axis_to_unit_interval() {
        let learner = PreferenceLearner::default();
        let p = profile([0.95, 0.5, 0.5, 0.5, 0.5]);
        let e = event([0.0, 0.5, 0.5, 0.5, 0.5], [1.0, 0.5, 0.5, 0.5, 0.5]);

        let outcome = learner.learn_from_serendipity(&p, &e, Some(0.5), ts());
        // 0.95 + 1.0 * 0.5 overshoots; clamped to 1.0.
        assert_eq!(
            outcome.profile.preferences().component(TasteAxis::Sweetness),
            1.0
        );
    }

    #[test]
    fn small_movement_is_not_significant() {
        let learner = PreferenceLearner::new(0.1, 0.1, 0.5);
        let p = profile([0.5; 5]);
        let e = event([0.5; 5], [0.8, 0.8, 0.8, 0.5, 0.5]);

        let outcome = learner.learn_from_serendipity(&p, &e, Some(0.1), ts());
        // Each axis moves by 0.3 * 0.1 = 0.03.
        assert!(!outcome.has_significant_changes);
    }

    #[test]
    fn learn_from_observation_blends_toward_the_choice() {
        let learner = PreferenceLearner::default();
        let p = profile([0.5; 5]);
        let observed = vec5([1.0, 0.0, 0.5, 0.5, 0.5]);

        let updated = learner.learn_from_observation(&p, &observed, CakeId::new(), None, ts());

        // 0.5 * 0.7 + 1.0 * 0.3 = 0.65 on sweetness.
        let prefs = updated.preferences();
        assert!((prefs.component(TasteAxis::Sweetness) - 0.65).abs() < 1e-12);
        assert!((prefs.component(TasteAxis::Sourness) - 0.35).abs() < 1e-12);

        assert_eq!(updated.history().len(), 2);
        assert_eq!(updated.history()[1].source, ObservationSource::ObservedChoice);
        assert!(updated.history()[1].cake_id.is_some());
        assert!(updated.learning_log().is_empty());
    }

    #[test]
    fn adaptive_rate_rises_with_surprise_and_uncertainty() {
        let learner = PreferenceLearner::default();

        // Confident and unsurprised: floor.
        assert_eq!(learner.adaptive_learning_rate(1.0, 0.0), 0.1);
        // Uncertain and surprised: ceiling.
        assert_eq!(learner.adaptive_learning_rate(0.0, 1.0), 0.5);
        // Midpoint lands inside the bounds.
        assert!((learner.adaptive_learning_rate(0.5, 0.3) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn identify_learning_targets_tiers_by_surprise() {
        let learner = PreferenceLearner::default();
        let e = event([0.0, 0.0, 0.0, 0.5, 0.5], [0.9, 0.4, 0.3, 0.5, 0.5]);

        let targets = learner.identify_learning_targets(&e);
        assert_eq!(targets.len(), 3);

        assert_eq!(targets[0].axis, TasteAxis::Sweetness);
        assert_eq!(targets[0].priority, LearningPriority::High);
        assert_eq!(targets[1].axis, TasteAxis::Sourness);
        assert_eq!(targets[1].priority, LearningPriority::Medium);
        assert_eq!(targets[2].axis, TasteAxis::Texture);
        assert_eq!(targets[2].priority, LearningPriority::Low);

        for target in &targets {
            assert!(target.suggested_rate >= 0.1 && target.suggested_rate <= 0.5);
        }
    }
}
