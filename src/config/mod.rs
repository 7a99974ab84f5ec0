//! Engine configuration module.
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `CAKE_CONCIERGE`
//! prefix and nested sections use double underscores as separators, e.g.
//! `CAKE_CONCIERGE__LEARNING__BASE_RATE=0.4`.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::preference::HappinessWeights;
use crate::domain::serendipity::SerendipityDetector;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors raised by semantic validation of loaded values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("Happiness weights must be non-negative with a positive sum")]
    InvalidWeights,

    #[error("Serendipity thresholds must be positive and ordered (surprise <= strong)")]
    InvalidThresholds,

    #[error("Learning rates must satisfy 0 < min <= base <= max <= 1")]
    InvalidLearningRates,
}

/// Weighting section.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_self_weight")]
    pub self_weight: f64,
    #[serde(default = "default_partner_weight")]
    pub partner_weight: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            self_weight: default_self_weight(),
            partner_weight: default_partner_weight(),
        }
    }
}

/// Serendipity threshold section.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SerendipityConfig {
    #[serde(default = "default_surprise_threshold")]
    pub surprise_threshold: f64,
    #[serde(default = "default_strong_threshold")]
    pub strong_threshold: f64,
    #[serde(default = "default_dimension_threshold")]
    pub dimension_threshold: f64,
}

impl Default for SerendipityConfig {
    fn default() -> Self {
        Self {
            surprise_threshold: default_surprise_threshold(),
            strong_threshold: default_strong_threshold(),
            dimension_threshold: default_dimension_threshold(),
        }
    }
}

/// Learning rate section.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LearningConfig {
    #[serde(default = "default_base_rate")]
    pub base_rate: f64,
    #[serde(default = "default_min_rate")]
    pub min_rate: f64,
    #[serde(default = "default_max_rate")]
    pub max_rate: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            base_rate: default_base_rate(),
            min_rate: default_min_rate(),
            max_rate: default_max_rate(),
        }
    }
}

/// Root engine configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub serendipity: SerendipityConfig,
    #[serde(default)]
    pub learning: LearningConfig,
}

impl EngineConfig {
    /// Loads configuration from the environment.
    ///
    /// Reads a `.env` file if present, then environment variables with the
    /// `CAKE_CONCIERGE` prefix. Every value has a default, so an empty
    /// environment yields the stock engine.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CAKE_CONCIERGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Performs semantic validation of the loaded values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.weights.self_weight < 0.0
            || self.weights.partner_weight < 0.0
            || self.weights.self_weight + self.weights.partner_weight <= 0.0
        {
            return Err(ConfigValidationError::InvalidWeights);
        }

        let s = &self.serendipity;
        if s.surprise_threshold <= 0.0
            || s.dimension_threshold <= 0.0
            || s.strong_threshold < s.surprise_threshold
        {
            return Err(ConfigValidationError::InvalidThresholds);
        }

        let l = &self.learning;
        if l.min_rate <= 0.0
            || l.min_rate > l.base_rate
            || l.base_rate > l.max_rate
            || l.max_rate > 1.0
        {
            return Err(ConfigValidationError::InvalidLearningRates);
        }

        Ok(())
    }

    /// The happiness weights described by this configuration.
    ///
    /// Call [`Self::validate`] first; invalid weights panic here by design
    /// of the `HappinessWeights` invariant.
    pub fn happiness_weights(&self) -> HappinessWeights {
        HappinessWeights::new(self.weights.self_weight, self.weights.partner_weight)
            .expect("validated configuration always yields legal weights")
    }

    /// The serendipity detector described by this configuration.
    pub fn detector(&self) -> SerendipityDetector {
        SerendipityDetector::new(
            self.serendipity.surprise_threshold,
            self.serendipity.strong_threshold,
            self.serendipity.dimension_threshold,
        )
    }
}

fn default_self_weight() -> f64 {
    0.2
}

fn default_partner_weight() -> f64 {
    0.8
}

fn default_surprise_threshold() -> f64 {
    SerendipityDetector::SURPRISE_THRESHOLD
}

fn default_strong_threshold() -> f64 {
    SerendipityDetector::STRONG_THRESHOLD
}

fn default_dimension_threshold() -> f64 {
    SerendipityDetector::DIMENSION_THRESHOLD
}

fn default_base_rate() -> f64 {
    0.3
}

fn default_min_rate() -> f64 {
    0.1
}

fn default_max_rate() -> f64 {
    0.5
}
