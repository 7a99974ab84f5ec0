//! PreferenceInference port - external partner-preference estimation.
//!
//! The engine never calls this provider itself; callers run it ahead of
//! time and inject the result into `SelectionController::initialize`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, PartnerId};
use crate::domain::preference::{PreferenceVector, TasteAxis};

/// Confidence at or above which an inference counts as high.
pub const HIGH_CONFIDENCE: f64 = 0.7;

/// Confidence below which an inference counts as low.
pub const LOW_CONFIDENCE: f64 = 0.4;

/// Context handed to the provider for an inference request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceContext {
    pub partner_id: PartnerId,
    /// Free-form occasion hint ("birthday", "anniversary"), if known.
    pub occasion: Option<String>,
    /// Recent choice vectors the provider may condition on.
    pub recent_choices: Vec<PreferenceVector>,
}

/// Qualitative reading of an inference confidence value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    High,
    Moderate,
    Low,
}

impl ConfidenceBand {
    /// Classifies a confidence value into its band.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= HIGH_CONFIDENCE {
            ConfidenceBand::High
        } else if confidence < LOW_CONFIDENCE {
            ConfidenceBand::Low
        } else {
            ConfidenceBand::Moderate
        }
    }
}

/// An inferred partner preference with its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferredPreference {
    pub vector: PreferenceVector,
    /// In [0, 1].
    pub confidence: f64,
    pub reasoning: Option<String>,
}

impl InferredPreference {
    /// The qualitative band this inference falls in.
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }
}

/// Per-axis probabilistic estimate from the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisProbability {
    pub axis: TasteAxis,
    pub mean: f64,
    /// Non-negative.
    pub variance: f64,
    pub mode: f64,
    pub confidence_interval: (f64, f64),
}

/// Asynchronous partner-preference inference capability.
#[async_trait]
pub trait PreferenceInference: Send + Sync {
    /// Infers a single best-estimate preference vector.
    async fn infer_preference(
        &self,
        context: &InferenceContext,
    ) -> Result<InferredPreference, DomainError>;

    /// Returns per-axis probabilistic estimates.
    async fn get_probabilities(
        &self,
        context: &InferenceContext,
    ) -> Result<Vec<AxisProbability>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_bands_use_the_documented_cutoffs() {
        assert_eq!(ConfidenceBand::from_confidence(0.7), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_confidence(0.95), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_confidence(0.69), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::from_confidence(0.4), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::from_confidence(0.39), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::from_confidence(0.0), ConfidenceBand::Low);
    }

    #[test]
    fn inferred_preference_reports_its_band() {
        let inferred = InferredPreference {
            vector: PreferenceVector::neutral(),
            confidence: 0.85,
            reasoning: Some("strong recent signal".to_string()),
        };
        assert_eq!(inferred.band(), ConfidenceBand::High);
    }
}
