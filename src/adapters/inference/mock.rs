//! Deterministic mock inference provider for tests and offline hosts.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::preference::{PreferenceVector, TasteAxis};
use crate::ports::{
    AxisProbability, InferenceContext, InferredPreference, PreferenceInference,
};

/// Provider returning a fixed inference, regardless of context.
pub struct MockInferenceProvider {
    vector: PreferenceVector,
    confidence: f64,
    reasoning: Option<String>,
}

impl MockInferenceProvider {
    /// Creates a provider answering with the given vector and confidence.
    pub fn new(vector: PreferenceVector, confidence: f64) -> Self {
        Self {
            vector,
            confidence,
            reasoning: None,
        }
    }

    /// A provider that is highly confident in its answer.
    pub fn confident(vector: PreferenceVector) -> Self {
        Self::new(vector, 0.9)
    }

    /// A provider whose answers should be ignored by the engine.
    pub fn unreliable(vector: PreferenceVector) -> Self {
        Self::new(vector, 0.2)
    }

    /// Attaches a canned reasoning string.
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }
}

#[async_trait]
impl PreferenceInference for MockInferenceProvider {
    async fn infer_preference(
        &self,
        _context: &InferenceContext,
    ) -> Result<InferredPreference, DomainError> {
        Ok(InferredPreference {
            vector: self.vector,
            confidence: self.confidence,
            reasoning: self.reasoning.clone(),
        })
    }

    async fn get_probabilities(
        &self,
        _context: &InferenceContext,
    ) -> Result<Vec<AxisProbability>, DomainError> {
        // Point-mass estimates around the fixed vector; the interval
        // tightens as confidence rises.
        let half_width = 0.5 * (1.0 - self.confidence);
        Ok(TasteAxis::ALL
            .iter()
            .map(|&axis| {
                let mean = self.vector.component(axis);
                AxisProbability {
                    axis,
                    mean,
                    variance: half_width * half_width,
                    mode: mean,
                    confidence_interval: (
                        (mean - half_width).max(0.0),
                        (mean + half_width).min(1.0),
                    ),
                }
            })
            .collect())
    }
}
