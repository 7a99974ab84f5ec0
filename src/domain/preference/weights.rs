//! HappinessWeights value object - the self/partner weighting pair.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Relative weighting of the two preference profiles in the happiness score.
///
/// Both weights must be non-negative with a positive sum. The default is
/// partner-prioritizing: (0.2, 0.8).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HappinessWeights {
    self_weight: f64,
    partner_weight: f64,
}

impl HappinessWeights {
    /// Creates a new weight pair, validating non-negativity and positive sum.
    pub fn new(self_weight: f64, partner_weight: f64) -> Result<Self, ValidationError> {
        if self_weight < 0.0 || partner_weight < 0.0 || self_weight + partner_weight <= 0.0 {
            return Err(ValidationError::non_positive_weight_sum("happiness_weights"));
        }
        Ok(Self {
            self_weight,
            partner_weight,
        })
    }

    /// Returns the self weight.
    pub fn self_weight(&self) -> f64 {
        self.self_weight
    }

    /// Returns the partner weight.
    pub fn partner_weight(&self) -> f64 {
        self.partner_weight
    }

    /// Rescales the pair so the weights sum to exactly 1.0.
    pub fn normalized(&self) -> Self {
        let total = self.self_weight + self.partner_weight;
        Self {
            self_weight: self.self_weight / total,
            partner_weight: self.partner_weight / total,
        }
    }

    /// How strongly the partner is prioritized over self.
    pub fn partner_priority_ratio(&self) -> f64 {
        self.partner_weight / self.self_weight
    }
}

impl Default for HappinessWeights {
    fn default() -> Self {
        Self {
            self_weight: 0.2,
            partner_weight: 0.8,
        }
    }
}

impl fmt::Display for HappinessWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "self {:.2} / partner {:.2}",
            self.self_weight, self.partner_weight
        )
    }
}
