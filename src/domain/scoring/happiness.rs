//! Weighted happiness scoring over preference vector alignments.

use serde::{Deserialize, Serialize};

use crate::domain::preference::{HappinessWeights, PreferenceVector};

use super::{CakeCandidate, CakeRanking, RankedCake};

/// A happiness score for one candidate, with its per-profile breakdown.
///
/// Computed on demand per (self, partner, candidate, weights) tuple and
/// never mutated or stored independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HappinessScore {
    /// Combined weighted score.
    pub total: f64,
    /// Dot product of the self profile and the candidate.
    pub self_alignment: f64,
    /// Dot product of the partner profile and the candidate.
    pub partner_alignment: f64,
    /// The (normalized) weights the score was computed with.
    pub weights: HappinessWeights,
    /// The candidate vector that was scored.
    pub candidate: PreferenceVector,
}

/// Pure scoring model combining two preference profiles with fixed weights.
///
/// Weights are normalized once at construction; every method is a pure
/// function with no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HappinessModel {
    weights: HappinessWeights,
}

impl HappinessModel {
    /// Creates a model with the given weights (normalized internally).
    pub fn new(weights: HappinessWeights) -> Self {
        Self {
            weights: weights.normalized(),
        }
    }

    /// Returns the normalized weights in use.
    pub fn weights(&self) -> HappinessWeights {
        self.weights
    }

    /// Scores a candidate: `wSelf * dot(self, c) + wPartner * dot(partner, c)`.
    pub fn score(
        &self,
        self_profile: &PreferenceVector,
        partner_profile: &PreferenceVector,
        candidate: &PreferenceVector,
    ) -> HappinessScore {
        let self_alignment = self_profile.dot(candidate);
        let partner_alignment = partner_profile.dot(candidate);
        let total = self.weights.self_weight() * self_alignment
            + self.weights.partner_weight() * partner_alignment;
        HappinessScore {
            total,
            self_alignment,
            partner_alignment,
            weights: self.weights,
            candidate: *candidate,
        }
    }

    /// The theoretical best-fit vector: the weighted blend of both profiles.
    pub fn optimal_vector(
        &self,
        self_profile: &PreferenceVector,
        partner_profile: &PreferenceVector,
    ) -> PreferenceVector {
        // Weights are normalized and sum to 1, so blend cannot fail.
        self_profile
            .blend(
                partner_profile,
                self.weights.self_weight(),
                self.weights.partner_weight(),
            )
            .expect("normalized weights always have a positive sum")
    }

    /// The ranking ceiling: the score of the optimal vector itself.
    pub fn max_possible_score(
        &self,
        self_profile: &PreferenceVector,
        partner_profile: &PreferenceVector,
    ) -> f64 {
        let optimal = self.optimal_vector(self_profile, partner_profile);
        self.score(self_profile, partner_profile, &optimal).total
    }

    /// How close a candidate comes to the ceiling, in [0, 1].
    ///
    /// Defined as 0 when the ceiling is exactly 0 (the degenerate all-zero
    /// preference case), avoiding division by zero. Exactly 1.0 at the
    /// optimal vector.
    pub fn optimality(
        &self,
        self_profile: &PreferenceVector,
        partner_profile: &PreferenceVector,
        candidate: &PreferenceVector,
    ) -> f64 {
        let max = self.max_possible_score(self_profile, partner_profile);
        if max == 0.0 {
            return 0.0;
        }
        self.score(self_profile, partner_profile, candidate).total / max
    }

    /// Scores every candidate and assigns 1-based ranks by descending total.
    ///
    /// The sort is stable, so ties keep their input order. An empty candidate
    /// list yields an empty ranking with no top choice, not an error.
    pub fn rank(
        &self,
        self_profile: &PreferenceVector,
        partner_profile: &PreferenceVector,
        candidates: &[CakeCandidate],
    ) -> CakeRanking {
        let mut scored: Vec<(CakeCandidate, HappinessScore)> = candidates
            .iter()
            .map(|candidate| {
                (
                    candidate.clone(),
                    self.score(self_profile, partner_profile, candidate.vector()),
                )
            })
            .collect();
        scored.sort_by(|a, b| {
            b.1.total
                .partial_cmp(&a.1.total)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let entries = scored
            .into_iter()
            .enumerate()
            .map(|(i, (candidate, score))| RankedCake {
                candidate,
                score,
                rank: (i + 1) as u32,
            })
            .collect();

        CakeRanking::new(
            entries,
            self.optimal_vector(self_profile, partner_profile),
            self.max_possible_score(self_profile, partner_profile),
        )
    }
}

impl Default for HappinessModel {
    fn default() -> Self {
        Self::new(HappinessWeights::default())
    }
}
