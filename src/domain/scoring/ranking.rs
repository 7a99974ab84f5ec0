//! Cake candidates and the ranking produced by the happiness model.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CakeId, ValidationError};
use crate::domain::preference::PreferenceVector;

use super::HappinessScore;

/// A cake that can be recommended: identity, display name, taste profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CakeCandidate {
    id: CakeId,
    name: String,
    vector: PreferenceVector,
}

impl CakeCandidate {
    /// Creates a candidate from an already-validated preference vector.
    pub fn new(id: CakeId, name: String, vector: PreferenceVector) -> Self {
        Self { id, name, vector }
    }

    /// Creates a candidate from raw components, validating the vector.
    pub fn from_components(name: String, components: [f64; 5]) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id: CakeId::new(),
            name,
            vector: PreferenceVector::from_components(components)?,
        })
    }

    pub fn id(&self) -> CakeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vector(&self) -> &PreferenceVector {
        &self.vector
    }
}

/// One candidate with its score and 1-based rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCake {
    pub candidate: CakeCandidate,
    pub score: HappinessScore,
    /// 1 = highest total score.
    pub rank: u32,
}

/// The full ranking over a candidate set.
///
/// Recomputed wholesale whenever inputs change, never patched incrementally.
/// Also carries the optimal vector and score ceiling the ranking was
/// computed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CakeRanking {
    entries: Vec<RankedCake>,
    optimal: PreferenceVector,
    max_score: f64,
}

impl CakeRanking {
    /// Assembles a ranking from already-ordered entries.
    pub fn new(entries: Vec<RankedCake>, optimal: PreferenceVector, max_score: f64) -> Self {
        Self {
            entries,
            optimal,
            max_score,
        }
    }

    /// All entries in rank order.
    pub fn entries(&self) -> &[RankedCake] {
        &self.entries
    }

    /// The rank-1 entry, if any candidates were ranked.
    pub fn top_choice(&self) -> Option<&RankedCake> {
        self.entries.first()
    }

    /// Looks up the entry for a candidate id.
    pub fn entry(&self, id: CakeId) -> Option<&RankedCake> {
        self.entries.iter().find(|e| e.candidate.id() == id)
    }

    /// The blended optimal vector the ranking was computed against.
    pub fn optimal(&self) -> &PreferenceVector {
        &self.optimal
    }

    /// The score ceiling for this profile pair.
    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
