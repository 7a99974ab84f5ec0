//! DivergentPickSelector - surfaces the candidate furthest from the optimum.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::preference::{PreferenceVector, TasteAxis};
use crate::domain::scoring::CakeCandidate;
use crate::domain::serendipity::{SerendipityDetector, SerendipityEvent};

/// Default distance threshold for [`DivergentPickSelector::filter_unusual`].
pub const UNUSUAL_THRESHOLD: f64 = 0.5;

/// The most divergent candidate, with its normalized surprise measures.
///
/// `forced_event` is present only when the winner also clears the absolute
/// serendipity threshold. The relative (percentage-of-max) selection and the
/// absolute cutoff are independent criteria and can disagree for small or
/// tightly clustered candidate sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivergentPick {
    pub candidate: CakeCandidate,
    /// Raw distance from the optimal vector.
    pub distance: f64,
    /// Distance normalized by sqrt(5), in [0, 1].
    pub surprise_fraction: f64,
    /// The fraction as a 0-100 percentage.
    pub surprise_percent: f64,
    pub forced_event: Option<SerendipityEvent>,
}

/// Selects deliberately-divergent candidates for exploration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DivergentPickSelector {
    detector: SerendipityDetector,
}

impl DivergentPickSelector {
    /// Creates a selector sharing the engine's detector.
    pub fn new(detector: SerendipityDetector) -> Self {
        Self { detector }
    }

    /// Picks the candidate furthest from the optimal vector.
    ///
    /// Ties keep the first-encountered candidate. Empty input yields None,
    /// not an error.
    pub fn most_divergent(
        &self,
        optimal: &PreferenceVector,
        candidates: &[CakeCandidate],
    ) -> Option<DivergentPick> {
        let mut best: Option<(&CakeCandidate, f64)> = None;
        for candidate in candidates {
            let distance = optimal.distance_to(candidate.vector());
            match best {
                Some((_, best_distance)) if distance <= best_distance => {}
                _ => best = Some((candidate, distance)),
            }
        }

        best.map(|(candidate, distance)| {
            let surprise_fraction = distance / PreferenceVector::MAX_DISTANCE;
            let forced_event = self.detector.detect(optimal, candidate.vector());
            debug!(
                candidate = %candidate.id(),
                distance,
                forced = forced_event.is_some(),
                "divergent pick selected"
            );
            DivergentPick {
                candidate: candidate.clone(),
                distance,
                surprise_fraction,
                surprise_percent: surprise_fraction * 100.0,
                forced_event,
            }
        })
    }

    /// Samples a candidate with probability proportional to its distance
    /// from the optimum.
    ///
    /// Pure in its random input (`random_value` in [0, 1)) for testability;
    /// there is no internal entropy source. Zero total weight - every
    /// candidate identical to the optimum - yields None.
    pub fn weighted_random_divergent(
        &self,
        optimal: &PreferenceVector,
        candidates: &[CakeCandidate],
        random_value: f64,
    ) -> Option<CakeCandidate> {
        let weights: Vec<f64> = candidates
            .iter()
            .map(|c| optimal.distance_to(c.vector()))
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return None;
        }

        let target = random_value * total;
        let mut cumulative = 0.0;
        for (candidate, weight) in candidates.iter().zip(&weights) {
            cumulative += weight;
            if target < cumulative {
                return Some(candidate.clone());
            }
        }
        // Rounding can leave the target just past the final bucket.
        candidates.last().cloned()
    }

    /// Keeps candidates far enough from the average of past choices.
    ///
    /// An empty past-choice list averages to the neutral midpoint.
    pub fn filter_unusual(
        &self,
        candidates: &[CakeCandidate],
        past_choices: &[PreferenceVector],
        threshold: f64,
    ) -> Vec<CakeCandidate> {
        let average = Self::average_vector(past_choices);
        candidates
            .iter()
            .filter(|c| average.distance_to(c.vector()) >= threshold)
            .cloned()
            .collect()
    }

    fn average_vector(vectors: &[PreferenceVector]) -> PreferenceVector {
        if vectors.is_empty() {
            return PreferenceVector::neutral();
        }
        let count = vectors.len() as f64;
        let mut mean = PreferenceVector::neutral();
        for axis in TasteAxis::ALL {
            let sum: f64 = vectors.iter().map(|v| v.component(axis)).sum();
            mean = mean.with_component(axis, sum / count);
        }
        mean
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CakeId;

    fn vec5(c: [f64; 5]) -> PreferenceVector {
        PreferenceVector::from_components(c).unwrap()
    }

    fn candidate(name: &str, c: [f64; 5]) -> CakeCandidate {
        CakeCandidate::new(CakeId::new(), name.to_string(), vec5(c))
    }

    #[test]
    fn most_divergent_selects_maximum_distance() {
        let selector = DivergentPickSelector::default();
        let optimal = vec5([0.5; 5]);
        let candidates = vec![
            candidate("Near", [0.5, 0.5, 0.5, 0.5, 0.6]),
            candidate("Far", [1.0, 0.0, 1.0, 0.0, 1.0]),
            candidate("Middle", [0.7, 0.3, 0.5, 0.5, 0.5]),
        ];

        let pick = selector.most_divergent(&optimal, &candidates).unwrap();
        assert_eq!(pick.candidate.name(), "Far");
        assert!(pick.forced_event.is_some());
        assert!((pick.surprise_fraction * 100.0 - pick.surprise_percent).abs() < 1e-12);
    }

    #[test]
    fn most_divergent_breaks_ties_by_first_encountered() {
        let selector = DivergentPickSelector::default();
        let optimal = vec5([0.5; 5]);
        let first = candidate("First", [0.9, 0.5, 0.5, 0.5, 0.5]);
        let twin = candidate("Twin", [0.1, 0.5, 0.5, 0.5, 0.5]);

        let pick = selector
            .most_divergent(&optimal, &[first.clone(), twin])
            .unwrap();
        assert_eq!(pick.candidate.id(), first.id());
    }

    #[test]
    fn most_divergent_of_empty_input_is_none() {
        let selector = DivergentPickSelector::default();
        assert!(selector.most_divergent(&vec5([0.5; 5]), &[]).is_none());
    }

    #[test]
    fn tight_cluster_selects_a_winner_without_forced_event() {
        let selector = DivergentPickSelector::default();
        let optimal = vec5([0.5; 5]);
        // The relative winner exists but never clears the absolute 0.5 cutoff.
        let candidates = vec![
            candidate("A", [0.55, 0.5, 0.5, 0.5, 0.5]),
            candidate("B", [0.6, 0.5, 0.5, 0.5, 0.5]),
        ];

        let pick = selector.most_divergent(&optimal, &candidates).unwrap();
        assert_eq!(pick.candidate.name(), "B");
        assert!(pick.forced_event.is_none());
    }

    #[test]
    fn weighted_random_is_deterministic_in_its_random_input() {
        let selector = DivergentPickSelector::default();
        let optimal = vec5([0.5; 5]);
        // Distances 0.1 and 0.4: cumulative buckets [0, 0.1) and [0.1, 0.5).
        let near = candidate("Near", [0.6, 0.5, 0.5, 0.5, 0.5]);
        let far = candidate("Far", [0.9, 0.5, 0.5, 0.5, 0.5]);
        let candidates = vec![near.clone(), far.clone()];

        let low = selector
            .weighted_random_divergent(&optimal, &candidates, 0.1)
            .unwrap();
        assert_eq!(low.id(), near.id());

        let high = selector
            .weighted_random_divergent(&optimal, &candidates, 0.9)
            .unwrap();
        assert_eq!(high.id(), far.id());
    }

    #[test]
    fn weighted_random_with_zero_total_weight_is_none() {
        let selector = DivergentPickSelector::default();
        let optimal = vec5([0.5; 5]);
        let identical = vec![candidate("Same", [0.5; 5]), candidate("Twin", [0.5; 5])];

        assert!(selector
            .weighted_random_divergent(&optimal, &identical, 0.3)
            .is_none());
        assert!(selector
            .weighted_random_divergent(&optimal, &[], 0.3)
            .is_none());
    }

    #[test]
    fn filter_unusual_keeps_distant_candidates() {
        let selector = DivergentPickSelector::default();
        let past = vec![vec5([0.4; 5]), vec5([0.6; 5])];
        let usual = candidate("Usual", [0.5; 5]);
        let unusual = candidate("Unusual", [1.0, 0.0, 1.0, 0.0, 1.0]);

        let kept = selector.filter_unusual(
            &[usual, unusual.clone()],
            &past,
            UNUSUAL_THRESHOLD,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id(), unusual.id());
    }

    #[test]
    fn filter_unusual_with_no_past_uses_neutral_midpoint() {
        let selector = DivergentPickSelector::default();
        let near_neutral = candidate("Near", [0.55, 0.5, 0.5, 0.5, 0.5]);
        let corner = candidate("Corner", [1.0, 1.0, 0.0, 0.0, 0.0]);

        let kept = selector.filter_unusual(
            &[near_neutral, corner.clone()],
            &[],
            UNUSUAL_THRESHOLD,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id(), corner.id());
    }
}
