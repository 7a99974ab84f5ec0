//! Recording effect sink - captures delivered effects in order.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::{Effect, EffectSink};

/// Sink that records every delivered effect. Useful in tests and for hosts
/// that render effects on their own cadence.
#[derive(Default)]
pub struct RecordingEffectSink {
    delivered: Mutex<Vec<Effect>>,
}

impl RecordingEffectSink {
    /// Everything delivered so far, in delivery order.
    pub fn recorded(&self) -> Vec<Effect> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl EffectSink for RecordingEffectSink {
    async fn deliver(&self, effect: Effect) -> Result<(), DomainError> {
        self.delivered.lock().unwrap().push(effect);
        Ok(())
    }
}
