//! SelectionController - orchestrates ranking, overrides, and exploration.

use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::domain::choice::{ChoiceOutcome, OverrideHandler, UserChoice};
use crate::domain::exploration::DivergentPickSelector;
use crate::domain::foundation::{CakeId, DomainError, ErrorCode, StateMachine};
use crate::domain::preference::PreferenceVector;
use crate::domain::scoring::{CakeCandidate, CakeRanking, HappinessModel, RankedCake};
use crate::domain::serendipity::SerendipityDetector;
use crate::ports::{ConfidenceBand, Destination, Effect, HapticKind, InferredPreference};

use super::memory::override_memory;
use super::{InteractionEvent, PhaseKind, SelectionPhase, SerendipityMode};

/// The inputs a selection round was initialized with, retained so Restart
/// can recompute from scratch.
#[derive(Debug, Clone)]
struct SelectionInputs {
    self_profile: PreferenceVector,
    partner_profile: PreferenceVector,
    candidates: Vec<CakeCandidate>,
}

/// The interaction state machine.
///
/// Processes one event to completion before the next; every transition
/// replaces the whole state snapshot. The serendipity mode is an orthogonal
/// facet and never changes the primary phase.
#[derive(Debug)]
pub struct SelectionController {
    model: HappinessModel,
    override_handler: OverrideHandler,
    divergent_selector: DivergentPickSelector,
    inputs: Option<SelectionInputs>,
    ranking: Option<CakeRanking>,
    phase: SelectionPhase,
    serendipity_mode: SerendipityMode,
    last_outcome: Option<ChoiceOutcome>,
    override_count: usize,
}

impl SelectionController {
    /// Creates a controller from a scoring model and detector.
    pub fn new(model: HappinessModel, detector: SerendipityDetector) -> Self {
        Self {
            model,
            override_handler: OverrideHandler::new(model, detector),
            divergent_selector: DivergentPickSelector::new(detector),
            inputs: None,
            ranking: None,
            phase: SelectionPhase::Initial,
            serendipity_mode: SerendipityMode::Off,
            last_outcome: None,
            override_count: 0,
        }
    }

    /// Creates a controller from validated engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            HappinessModel::new(config.happiness_weights()),
            config.detector(),
        )
    }

    /// The current primary phase.
    pub fn phase(&self) -> &SelectionPhase {
        &self.phase
    }

    /// The current serendipity mode.
    pub fn serendipity_mode(&self) -> &SerendipityMode {
        &self.serendipity_mode
    }

    /// The current ranking, once initialized.
    pub fn ranking(&self) -> Option<&CakeRanking> {
        self.ranking.as_ref()
    }

    /// The outcome of the most recent completed choice.
    pub fn last_outcome(&self) -> Option<&ChoiceOutcome> {
        self.last_outcome.as_ref()
    }

    /// Ranks the candidates and presents the top choice.
    ///
    /// An inferred partner preference, when provided, is folded in by
    /// confidence band: high adopts the inferred vector, moderate blends it
    /// in proportionally, low is ignored. An empty candidate list puts the
    /// controller in the Error phase.
    pub fn initialize(
        &mut self,
        self_profile: PreferenceVector,
        partner_profile: PreferenceVector,
        candidates: Vec<CakeCandidate>,
        partner_hint: Option<InferredPreference>,
    ) -> Result<Vec<Effect>, DomainError> {
        self.transition(PhaseKind::Loading, SelectionPhase::Loading)?;

        let partner_profile = Self::resolve_partner(partner_profile, partner_hint);
        self.inputs = Some(SelectionInputs {
            self_profile,
            partner_profile,
            candidates,
        });
        self.rank_stored_inputs()
    }

    /// Applies one interaction event, returning its one-shot effects in
    /// emission order. Events that do not apply to the current phase are
    /// ignored.
    pub fn handle_event(&mut self, event: InteractionEvent) -> Vec<Effect> {
        debug!(?event, phase = ?self.phase.kind(), "handling event");
        match event {
            InteractionEvent::Tap { cake_id } => self.on_tap(cake_id),
            InteractionEvent::LongPress { cake_id } => self.on_long_press(cake_id),
            // Touch begin/end must not perturb state, scores, or ranking.
            InteractionEvent::TouchStart { .. } | InteractionEvent::TouchEnd => Vec::new(),
            InteractionEvent::Accept => self.on_accept(),
            InteractionEvent::ConfirmOverride { cake_id } => self.on_confirm_override(cake_id),
            InteractionEvent::ShakeDetected => self.on_shake(),
            InteractionEvent::DismissSerendipity => {
                self.serendipity_mode = SerendipityMode::Off;
                Vec::new()
            }
            InteractionEvent::Retry => self.on_retry(),
            InteractionEvent::Restart => self.on_restart(),
        }
    }

    fn resolve_partner(
        stored: PreferenceVector,
        hint: Option<InferredPreference>,
    ) -> PreferenceVector {
        let Some(hint) = hint else {
            return stored;
        };
        match hint.band() {
            ConfidenceBand::High => {
                info!(confidence = hint.confidence, "adopting inferred partner profile");
                hint.vector
            }
            ConfidenceBand::Moderate => stored
                .blend(&hint.vector, 1.0 - hint.confidence, hint.confidence)
                .expect("confidence in [0,1] keeps the weight sum positive"),
            ConfidenceBand::Low => {
                debug!(confidence = hint.confidence, "ignoring low-confidence inference");
                stored
            }
        }
    }

    fn rank_stored_inputs(&mut self) -> Result<Vec<Effect>, DomainError> {
        let inputs = self
            .inputs
            .as_ref()
            .expect("rank_stored_inputs requires stored inputs");
        let ranking = self.model.rank(
            &inputs.self_profile,
            &inputs.partner_profile,
            &inputs.candidates,
        );

        let top = ranking.top_choice().map(|t| (t.candidate.id(), t.score.total));
        match top {
            Some((recommended_id, total)) => {
                info!(%recommended_id, total, "recommendation ready");
                self.ranking = Some(ranking);
                self.transition(
                    PhaseKind::Ready,
                    SelectionPhase::Ready { recommended_id },
                )?;
                Ok(Vec::new())
            }
            None => {
                let message = "No cake candidates available".to_string();
                warn!("initialization with empty candidate list");
                self.ranking = Some(ranking);
                self.transition(
                    PhaseKind::Error,
                    SelectionPhase::Error {
                        message: message.clone(),
                    },
                )?;
                Err(DomainError::new(ErrorCode::NoCandidatesAvailable, message))
            }
        }
    }

    fn transition(&mut self, kind: PhaseKind, phase: SelectionPhase) -> Result<(), DomainError> {
        self.phase
            .kind()
            .transition_to(kind)
            .map_err(DomainError::from)?;
        debug!(from = ?self.phase.kind(), to = ?kind, "phase transition");
        self.phase = phase;
        Ok(())
    }

    /// The id the current phase recommends, if it has one.
    fn current_recommendation(&self) -> Option<CakeId> {
        match &self.phase {
            SelectionPhase::Ready { recommended_id } => Some(*recommended_id),
            SelectionPhase::Overriding { original_id, .. } => Some(*original_id),
            _ => None,
        }
    }

    fn on_tap(&mut self, cake_id: CakeId) -> Vec<Effect> {
        let Some(recommended_id) = self.current_recommendation() else {
            debug!(%cake_id, "tap ignored outside Ready/Overriding");
            return Vec::new();
        };

        if cake_id == recommended_id {
            return self.complete_acceptance(recommended_id);
        }

        let known = self
            .ranking
            .as_ref()
            .is_some_and(|r| r.entry(cake_id).is_some());
        if !known {
            warn!(%cake_id, "tap on unknown candidate ignored");
            return Vec::new();
        }

        let phase = SelectionPhase::Overriding {
            original_id: recommended_id,
            candidate_id: cake_id,
        };
        if self.transition(PhaseKind::Overriding, phase).is_err() {
            return Vec::new();
        }
        vec![Effect::PlayHaptic {
            kind: HapticKind::Light,
        }]
    }

    fn on_long_press(&self, cake_id: CakeId) -> Vec<Effect> {
        let Some(entry) = self.ranking.as_ref().and_then(|r| r.entry(cake_id)) else {
            return Vec::new();
        };
        vec![Effect::ShowToast {
            message: format!(
                "{}: rank {} with happiness {:.2}",
                entry.candidate.name(),
                entry.rank,
                entry.score.total
            ),
        }]
    }

    fn on_accept(&mut self) -> Vec<Effect> {
        match self.current_recommendation() {
            Some(recommended_id) => self.complete_acceptance(recommended_id),
            None => Vec::new(),
        }
    }

    fn complete_acceptance(&mut self, recommended_id: CakeId) -> Vec<Effect> {
        let Some((inputs, recommendation)) = self.recommendation_entry(recommended_id) else {
            return Vec::new();
        };

        let choice = UserChoice::Acceptance { recommended_id };
        let outcome = self.override_handler.apply_choice(
            &recommendation,
            &choice,
            &inputs.0,
            &inputs.1,
        );

        let phase = SelectionPhase::Completed {
            chosen_id: recommended_id,
            was_override: false,
        };
        if self.transition(PhaseKind::Completed, phase).is_err() {
            return Vec::new();
        }
        self.last_outcome = Some(outcome);

        vec![
            Effect::PlayHaptic {
                kind: HapticKind::Success,
            },
            Effect::Navigate {
                destination: Destination::SelectionSummary,
            },
        ]
    }

    fn on_confirm_override(&mut self, cake_id: CakeId) -> Vec<Effect> {
        let SelectionPhase::Overriding {
            original_id,
            candidate_id,
        } = &self.phase
        else {
            debug!(%cake_id, "override confirmation outside Overriding ignored");
            return Vec::new();
        };
        let (original_id, candidate_id) = (*original_id, *candidate_id);
        if cake_id != candidate_id {
            warn!(%cake_id, %candidate_id, "override confirmation for a different candidate");
            return Vec::new();
        }

        let Some((profiles, recommendation)) = self.recommendation_entry(original_id) else {
            return Vec::new();
        };
        let Some(chosen) = self
            .ranking
            .as_ref()
            .and_then(|r| r.entry(cake_id))
            .cloned()
        else {
            return Vec::new();
        };

        let choice = self.override_handler.create_override(
            &recommendation,
            chosen.candidate.id(),
            chosen.candidate.name().to_string(),
            *chosen.candidate.vector(),
            None,
        );
        let outcome =
            self.override_handler
                .apply_choice(&recommendation, &choice, &profiles.0, &profiles.1);

        let phase = SelectionPhase::Completed {
            chosen_id: cake_id,
            was_override: true,
        };
        if self.transition(PhaseKind::Completed, phase).is_err() {
            return Vec::new();
        }

        let mut effects = vec![
            Effect::PlayHaptic {
                kind: HapticKind::Success,
            },
            override_memory(self.override_count),
        ];
        self.override_count += 1;

        // Serendipity is an auxiliary facet of the completed snapshot, not
        // a competing state.
        if let Some(event) = &outcome.serendipity {
            info!(
                divergence = event.divergence_score,
                "override registered as serendipitous"
            );
            effects.push(Effect::ShowToast {
                message: format!(
                    "Serendipity: this pick diverged by {:.2} from the computed optimum",
                    event.divergence_score
                ),
            });
        }
        effects.push(Effect::Navigate {
            destination: Destination::SelectionSummary,
        });

        self.last_outcome = Some(outcome);
        effects
    }

    fn on_shake(&mut self) -> Vec<Effect> {
        let Some(ranking) = self.ranking.as_ref() else {
            debug!("shake ignored before initialization");
            return Vec::new();
        };
        let Some(inputs) = self.inputs.as_ref() else {
            return Vec::new();
        };

        match self
            .divergent_selector
            .most_divergent(ranking.optimal(), &inputs.candidates)
        {
            Some(pick) => {
                let message = format!(
                    "Wildcard: {} is {:.0}% off the beaten path",
                    pick.candidate.name(),
                    pick.surprise_percent
                );
                self.serendipity_mode = SerendipityMode::Active { pick };
                vec![
                    Effect::PlayHaptic {
                        kind: HapticKind::Warning,
                    },
                    Effect::ShowToast { message },
                ]
            }
            None => Vec::new(),
        }
    }

    fn on_retry(&mut self) -> Vec<Effect> {
        if self.phase.kind() == PhaseKind::Initial {
            return Vec::new();
        }
        info!("retry: discarding derived selection state");
        self.phase = SelectionPhase::Initial;
        self.ranking = None;
        self.serendipity_mode = SerendipityMode::Off;
        self.last_outcome = None;
        Vec::new()
    }

    fn on_restart(&mut self) -> Vec<Effect> {
        if self.inputs.is_none()
            || !matches!(
                self.phase.kind(),
                PhaseKind::Ready | PhaseKind::Overriding | PhaseKind::Completed
            )
        {
            return Vec::new();
        }
        if self
            .transition(PhaseKind::Loading, SelectionPhase::Loading)
            .is_err()
        {
            return Vec::new();
        }
        self.serendipity_mode = SerendipityMode::Off;
        self.last_outcome = None;
        // Pure recomputation over the stored inputs, not an incremental patch.
        match self.rank_stored_inputs() {
            Ok(effects) => effects,
            Err(_) => Vec::new(),
        }
    }

    /// The stored profile pair plus the ranked entry for an id.
    fn recommendation_entry(
        &self,
        id: CakeId,
    ) -> Option<((PreferenceVector, PreferenceVector), RankedCake)> {
        let inputs = self.inputs.as_ref()?;
        let entry = self.ranking.as_ref()?.entry(id)?.clone();
        Some(((inputs.self_profile, inputs.partner_profile), entry))
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(HappinessModel::default(), SerendipityDetector::default())
    }
}
