//! OverrideHandler - applies accept/override decisions and computes deltas.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::foundation::CakeId;
use crate::domain::preference::PreferenceVector;
use crate::domain::scoring::{HappinessModel, HappinessScore, RankedCake};
use crate::domain::serendipity::{SerendipityDetector, SerendipityEvent};

use super::decision::UNSPECIFIED_REASON;
use super::UserChoice;

/// The result of applying a user choice.
///
/// A positive `score_difference` means the choice scored lower than the
/// recommendation. That is recorded as data, never surfaced as a failure:
/// there is no "wrong choice" error class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOutcome {
    pub chosen_id: CakeId,
    pub chosen_name: String,
    pub score: HappinessScore,
    pub was_override: bool,
    /// Recommendation score minus chosen score.
    pub score_difference: f64,
    /// Present when the override diverged enough from the optimal vector.
    pub serendipity: Option<SerendipityEvent>,
}

impl ChoiceOutcome {
    /// True when the choice scored worse than the recommendation.
    pub fn is_lower_score(&self) -> bool {
        self.score_difference > 0.0
    }
}

/// Applies accept/override decisions.
///
/// Override is an unconditional invariant of the system: no method here can
/// reject one. The only failure mode is malformed input vectors, caught
/// earlier at `PreferenceVector` construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverrideHandler {
    model: HappinessModel,
    detector: SerendipityDetector,
}

impl OverrideHandler {
    /// Creates a handler sharing the engine's model and detector.
    pub fn new(model: HappinessModel, detector: SerendipityDetector) -> Self {
        Self { model, detector }
    }

    /// Builds an override choice. Always succeeds.
    pub fn create_override(
        &self,
        recommendation: &RankedCake,
        chosen_id: CakeId,
        chosen_name: String,
        chosen_vector: PreferenceVector,
        reason: Option<String>,
    ) -> UserChoice {
        UserChoice::ManualOverride {
            recommended_id: recommendation.candidate.id(),
            chosen_id,
            chosen_name,
            chosen_vector,
            reason: reason.unwrap_or_else(|| UNSPECIFIED_REASON.to_string()),
        }
    }

    /// Applies the choice, scoring overrides and probing for serendipity.
    pub fn apply_choice(
        &self,
        recommendation: &RankedCake,
        choice: &UserChoice,
        self_profile: &PreferenceVector,
        partner_profile: &PreferenceVector,
    ) -> ChoiceOutcome {
        match choice {
            UserChoice::Acceptance { .. } => ChoiceOutcome {
                chosen_id: recommendation.candidate.id(),
                chosen_name: recommendation.candidate.name().to_string(),
                score: recommendation.score,
                was_override: false,
                score_difference: 0.0,
                serendipity: None,
            },
            UserChoice::ManualOverride {
                chosen_id,
                chosen_name,
                chosen_vector,
                ..
            } => {
                let score = self.model.score(self_profile, partner_profile, chosen_vector);
                let optimal = self.model.optimal_vector(self_profile, partner_profile);
                let serendipity = self.detector.detect(&optimal, chosen_vector);
                let score_difference = recommendation.score.total - score.total;

                debug!(
                    chosen = %chosen_id,
                    score_difference,
                    serendipitous = serendipity.is_some(),
                    "override applied"
                );

                ChoiceOutcome {
                    chosen_id: *chosen_id,
                    chosen_name: chosen_name.clone(),
                    score,
                    was_override: true,
                    score_difference,
                    serendipity,
                }
            }
        }
    }

    /// Whether a choice at `actual` would register as serendipitous.
    pub fn might_trigger_serendipity(
        &self,
        expected: &PreferenceVector,
        actual: &PreferenceVector,
    ) -> bool {
        self.detector.detect(expected, actual).is_some()
    }
}
