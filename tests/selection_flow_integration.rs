//! Integration tests for the full selection-and-learning flow.
//!
//! Exercises the engine end to end: ranking from two weighted profiles,
//! the override pathway, serendipity detection, and the preference learner
//! feeding the partner profile.

use std::sync::Arc;

use cake_concierge::adapters::effects::RecordingEffectSink;
use cake_concierge::adapters::inference::MockInferenceProvider;
use cake_concierge::application::event_pump::EventPump;
use cake_concierge::application::handlers::{
    InferPartnerPreferenceCommand, InferPartnerPreferenceHandler,
};
use cake_concierge::application::selection::{
    InteractionEvent, SelectionController, SelectionPhase,
};
use cake_concierge::config::EngineConfig;
use cake_concierge::domain::foundation::{CakeId, PartnerId, Timestamp};
use cake_concierge::domain::learning::{PartnerProfile, PreferenceLearner};
use cake_concierge::domain::preference::{PreferenceVector, TasteAxis};
use cake_concierge::domain::scoring::CakeCandidate;
use cake_concierge::ports::{Effect, InferenceContext};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

fn vec5(c: [f64; 5]) -> PreferenceVector {
    PreferenceVector::from_components(c).unwrap()
}

fn scenario_candidates() -> Vec<CakeCandidate> {
    vec![
        CakeCandidate::new(CakeId::new(), "Balanced".to_string(), vec5([0.5; 5])),
        CakeCandidate::new(CakeId::new(), "Plain".to_string(), vec5([0.0; 5])),
        CakeCandidate::new(
            CakeId::new(),
            "Tangy".to_string(),
            vec5([1.0, 1.0, 0.0, 0.0, 0.0]),
        ),
    ]
}

fn initialized_controller() -> (SelectionController, Vec<CakeCandidate>) {
    let mut controller = SelectionController::from_config(&EngineConfig::default());
    let cakes = scenario_candidates();
    controller
        .initialize(
            vec5([0.8, 0.2, 0.5, 0.5, 0.5]),
            vec5([0.2, 0.8, 0.5, 0.5, 0.5]),
            cakes.clone(),
            None,
        )
        .unwrap();
    (controller, cakes)
}

#[test]
fn ranking_reproduces_the_weighted_sum_formula() {
    init_tracing();
    let (controller, cakes) = initialized_controller();
    let ranking = controller.ranking().unwrap();

    // total = 0.2 * dot(self, c) + 0.8 * dot(partner, c)
    let expected: Vec<(&str, f64)> = vec![("Balanced", 1.25), ("Tangy", 1.0), ("Plain", 0.0)];
    for (entry, (name, total)) in ranking.entries().iter().zip(&expected) {
        assert_eq!(entry.candidate.name(), *name);
        assert!(
            (entry.score.total - total).abs() < 1e-12,
            "{} scored {}, expected {}",
            name,
            entry.score.total,
            total
        );
    }

    let ranks: Vec<u32> = ranking.entries().iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert_eq!(ranking.top_choice().unwrap().candidate.id(), cakes[0].id());
}

#[test]
fn override_flow_detects_serendipity_and_updates_the_profile() {
    init_tracing();
    let (mut controller, cakes) = initialized_controller();

    // Override toward the tangy corner cake.
    controller.handle_event(InteractionEvent::Tap {
        cake_id: cakes[2].id(),
    });
    controller.handle_event(InteractionEvent::ConfirmOverride {
        cake_id: cakes[2].id(),
    });

    let outcome = controller.last_outcome().expect("a completed choice");
    assert!(outcome.was_override);
    assert!(outcome.is_lower_score());

    let event = outcome
        .serendipity
        .as_ref()
        .expect("the tangy cake diverges from the optimum");
    assert!(event.divergence_score >= 0.5);

    // Feed the divergence into the partner profile.
    let learner = PreferenceLearner::default();
    let before = PartnerProfile::new(
        PartnerId::new(),
        "Alex".to_string(),
        vec5([0.2, 0.8, 0.5, 0.5, 0.5]),
        Timestamp::now(),
    );
    let learned = learner.learn_from_serendipity(&before, event, None, Timestamp::now());

    assert!(learned.has_significant_changes);
    assert_eq!(learned.profile.history().len(), 2);
    assert!(!learned.profile.learning_log().is_empty());
    // The tangy pick pulls sweetness upward.
    assert!(
        learned.profile.preferences().component(TasteAxis::Sweetness)
            > before.preferences().component(TasteAxis::Sweetness)
    );
}

#[test]
fn touch_events_leave_scores_byte_for_byte_identical() {
    init_tracing();
    let (mut controller, cakes) = initialized_controller();
    let before = serde_json::to_string(controller.ranking().unwrap()).unwrap();

    controller.handle_event(InteractionEvent::TouchStart {
        cake_id: cakes[2].id(),
    });
    controller.handle_event(InteractionEvent::TouchEnd);

    let after = serde_json::to_string(controller.ranking().unwrap()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn shake_surfaces_the_most_divergent_candidate() {
    init_tracing();
    let (mut controller, cakes) = initialized_controller();

    let effects = controller.handle_event(InteractionEvent::ShakeDetected);
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::ShowToast { .. })));

    match controller.serendipity_mode() {
        cake_concierge::application::selection::SerendipityMode::Active { pick } => {
            // Plain (all zeros) sits furthest from the optimum (0.32, 0.68, 0.5...).
            assert_eq!(pick.candidate.id(), cakes[1].id());
            assert!(pick.surprise_percent > 0.0 && pick.surprise_percent <= 100.0);
        }
        _ => panic!("expected an active serendipity mode"),
    }

    // Dismissal returns to Off without touching the primary phase.
    let phase_before = controller.phase().clone();
    controller.handle_event(InteractionEvent::DismissSerendipity);
    assert!(!controller.serendipity_mode().is_active());
    assert_eq!(controller.phase(), &phase_before);
}

#[tokio::test]
async fn inference_handler_feeds_initialize() {
    init_tracing();
    let inferred_vector = vec5([0.9, 0.1, 0.6, 0.4, 0.7]);
    let handler = InferPartnerPreferenceHandler::new(Arc::new(
        MockInferenceProvider::confident(inferred_vector).with_reasoning("recent orders"),
    ));

    let inferred = handler
        .handle(InferPartnerPreferenceCommand {
            context: InferenceContext {
                partner_id: PartnerId::new(),
                occasion: Some("birthday".to_string()),
                recent_choices: vec![],
            },
        })
        .await
        .unwrap();

    let mut controller = SelectionController::default();
    controller
        .initialize(
            vec5([0.5; 5]),
            vec5([0.5; 5]),
            scenario_candidates(),
            Some(inferred),
        )
        .unwrap();

    // High confidence adopts the inferred vector outright.
    let optimal = controller.ranking().unwrap().optimal();
    let expected_sweetness = 0.2 * 0.5 + 0.8 * 0.9;
    assert!((optimal.component(TasteAxis::Sweetness) - expected_sweetness).abs() < 1e-12);
}

#[tokio::test]
async fn full_session_through_the_event_pump() {
    init_tracing();
    let (mut controller, cakes) = initialized_controller();
    let sink = Arc::new(RecordingEffectSink::default());
    let pump = EventPump::new(sink.clone());

    let events = futures::stream::iter(vec![
        InteractionEvent::ShakeDetected,
        InteractionEvent::DismissSerendipity,
        InteractionEvent::Tap {
            cake_id: cakes[2].id(),
        },
        InteractionEvent::ConfirmOverride {
            cake_id: cakes[2].id(),
        },
    ]);
    pump.run(&mut controller, events).await.unwrap();

    match controller.phase() {
        SelectionPhase::Completed {
            chosen_id,
            was_override,
        } => {
            assert_eq!(*chosen_id, cakes[2].id());
            assert!(*was_override);
        }
        other => panic!("expected Completed, got {:?}", other),
    }

    // Exactly one override memory was shown for the single override.
    let memories = sink
        .recorded()
        .into_iter()
        .filter(|e| matches!(e, Effect::ShowOverrideMemory { .. }))
        .count();
    assert_eq!(memories, 1);
}
