//! PreferenceVector value object - a point in the five-dimensional unit cube.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

use super::TasteAxis;

/// Immutable 5D preference vector with each component in [0.0, 1.0].
///
/// Every transformation returns a new instance; there is no identity beyond
/// structural equality. The maximum distance between two vectors is sqrt(5),
/// reached only between the all-zero and all-one corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreferenceVector {
    sweetness: f64,
    sourness: f64,
    texture: f64,
    temperature: f64,
    artistry: f64,
}

impl PreferenceVector {
    /// Maximum possible distance between two vectors in the unit cube.
    pub const MAX_DISTANCE: f64 = 2.236_067_977_499_79; // sqrt(5)

    /// Creates a new vector, validating every component into [0.0, 1.0].
    pub fn new(
        sweetness: f64,
        sourness: f64,
        texture: f64,
        temperature: f64,
        artistry: f64,
    ) -> Result<Self, ValidationError> {
        let vector = Self {
            sweetness,
            sourness,
            texture,
            temperature,
            artistry,
        };
        for axis in TasteAxis::ALL {
            let value = vector.component(axis);
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::out_of_range(
                    axis.label().to_lowercase(),
                    0.0,
                    1.0,
                    value,
                ));
            }
        }
        Ok(vector)
    }

    /// Creates a vector from components in canonical axis order.
    pub fn from_components(components: [f64; 5]) -> Result<Self, ValidationError> {
        Self::new(
            components[0],
            components[1],
            components[2],
            components[3],
            components[4],
        )
    }

    /// The neutral midpoint of the unit cube (0.5 on every axis).
    pub fn neutral() -> Self {
        Self {
            sweetness: 0.5,
            sourness: 0.5,
            texture: 0.5,
            temperature: 0.5,
            artistry: 0.5,
        }
    }

    /// Returns the value of a single axis.
    pub fn component(&self, axis: TasteAxis) -> f64 {
        match axis {
            TasteAxis::Sweetness => self.sweetness,
            TasteAxis::Sourness => self.sourness,
            TasteAxis::Texture => self.texture,
            TasteAxis::Temperature => self.temperature,
            TasteAxis::Artistry => self.artistry,
        }
    }

    /// Returns all components in canonical axis order.
    pub fn components(&self) -> [f64; 5] {
        [
            self.sweetness,
            self.sourness,
            self.texture,
            self.temperature,
            self.artistry,
        ]
    }

    /// Returns a new vector with one axis replaced, clamped to [0.0, 1.0].
    pub fn with_component(&self, axis: TasteAxis, value: f64) -> Self {
        let clamped = value.clamp(0.0, 1.0);
        let mut components = self.components();
        components[axis.index()] = clamped;
        // Clamping keeps the invariant, so the constructor cannot fail here.
        Self {
            sweetness: components[0],
            sourness: components[1],
            texture: components[2],
            temperature: components[3],
            artistry: components[4],
        }
    }

    /// Dot product with another vector. Commutative.
    pub fn dot(&self, other: &PreferenceVector) -> f64 {
        TasteAxis::ALL
            .iter()
            .map(|&axis| self.component(axis) * other.component(axis))
            .sum()
    }

    /// Euclidean distance to another vector.
    ///
    /// Symmetric, zero iff equal, at most [`Self::MAX_DISTANCE`].
    pub fn distance_to(&self, other: &PreferenceVector) -> f64 {
        TasteAxis::ALL
            .iter()
            .map(|&axis| {
                let diff = self.component(axis) - other.component(axis);
                diff * diff
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Euclidean norm of the vector itself.
    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Weighted per-axis average with another vector.
    ///
    /// Both weights must be non-negative and sum to a positive value. The
    /// result is clamped to [0.0, 1.0] to absorb floating-point overshoot.
    /// `blend(other, 1.0, 0.0)` equals self; `blend(other, 0.0, 1.0)` equals
    /// other.
    pub fn blend(
        &self,
        other: &PreferenceVector,
        self_weight: f64,
        other_weight: f64,
    ) -> Result<Self, ValidationError> {
        if self_weight < 0.0 || other_weight < 0.0 || self_weight + other_weight <= 0.0 {
            return Err(ValidationError::non_positive_weight_sum("blend_weights"));
        }
        let total = self_weight + other_weight;
        let mut components = [0.0; 5];
        for axis in TasteAxis::ALL {
            let mixed = (self.component(axis) * self_weight
                + other.component(axis) * other_weight)
                / total;
            components[axis.index()] = mixed.clamp(0.0, 1.0);
        }
        Ok(Self {
            sweetness: components[0],
            sourness: components[1],
            texture: components[2],
            temperature: components[3],
            artistry: components[4],
        })
    }
}

impl fmt::Display for PreferenceVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.2}, {:.2}, {:.2}, {:.2}, {:.2})",
            self.sweetness, self.sourness, self.texture, self.temperature, self.artistry
        )
    }
}
