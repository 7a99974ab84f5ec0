//! EventPump - drains interaction events through the controller.
//!
//! One event is processed to completion before the next is taken, and its
//! effects are delivered in emission order. This is where the engine's
//! ordering guarantee is enforced against the host's event stream.

use std::sync::Arc;

use futures::{Stream, StreamExt};
use tracing::debug;

use crate::domain::foundation::DomainError;
use crate::ports::EffectSink;

use super::selection::{InteractionEvent, SelectionController};

/// Pumps events from a stream into a controller, forwarding effects.
pub struct EventPump {
    sink: Arc<dyn EffectSink>,
}

impl EventPump {
    pub fn new(sink: Arc<dyn EffectSink>) -> Self {
        Self { sink }
    }

    /// Runs until the stream ends. Effects of each event are fully
    /// delivered before the next event is read.
    pub async fn run(
        &self,
        controller: &mut SelectionController,
        mut events: impl Stream<Item = InteractionEvent> + Unpin,
    ) -> Result<(), DomainError> {
        while let Some(event) = events.next().await {
            let effects = controller.handle_event(event);
            debug!(?event, effect_count = effects.len(), "event pumped");
            for effect in effects {
                self.sink.deliver(effect).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::effects::RecordingEffectSink;
    use crate::domain::foundation::CakeId;
    use crate::domain::preference::PreferenceVector;
    use crate::domain::scoring::CakeCandidate;
    use crate::ports::Effect;

    fn vec5(c: [f64; 5]) -> PreferenceVector {
        PreferenceVector::from_components(c).unwrap()
    }

    fn candidates() -> Vec<CakeCandidate> {
        vec![
            CakeCandidate::new(CakeId::new(), "Balanced".to_string(), vec5([0.5; 5])),
            CakeCandidate::new(
                CakeId::new(),
                "Tangy".to_string(),
                vec5([1.0, 1.0, 0.0, 0.0, 0.0]),
            ),
        ]
    }

    #[tokio::test]
    async fn pump_delivers_effects_in_emission_order() {
        let cakes = candidates();
        let mut controller = SelectionController::default();
        controller
            .initialize(
                vec5([0.8, 0.2, 0.5, 0.5, 0.5]),
                vec5([0.2, 0.8, 0.5, 0.5, 0.5]),
                cakes.clone(),
                None,
            )
            .unwrap();

        let sink = Arc::new(RecordingEffectSink::default());
        let pump = EventPump::new(sink.clone());

        let events = futures::stream::iter(vec![
            InteractionEvent::TouchStart {
                cake_id: cakes[1].id(),
            },
            InteractionEvent::Tap {
                cake_id: cakes[1].id(),
            },
            InteractionEvent::ConfirmOverride {
                cake_id: cakes[1].id(),
            },
        ]);

        pump.run(&mut controller, events).await.unwrap();

        let delivered = sink.recorded();
        // Tap produced one haptic; the confirmation produced haptic,
        // memory, and navigation in that order.
        assert!(matches!(delivered[0], Effect::PlayHaptic { .. }));
        assert!(matches!(delivered[1], Effect::PlayHaptic { .. }));
        assert!(matches!(delivered[2], Effect::ShowOverrideMemory { .. }));
        assert!(matches!(
            delivered.last().unwrap(),
            Effect::Navigate { .. }
        ));
    }

    #[tokio::test]
    async fn pump_with_empty_stream_is_a_no_op() {
        let mut controller = SelectionController::default();
        let sink = Arc::new(RecordingEffectSink::default());
        let pump = EventPump::new(sink.clone());

        pump.run(&mut controller, futures::stream::iter(Vec::new()))
            .await
            .unwrap();

        assert!(sink.recorded().is_empty());
    }
}
