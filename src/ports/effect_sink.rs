//! EffectSink port - one-shot effects emitted toward the presentation layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;

/// Haptic feedback flavors the host may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HapticKind {
    Light,
    Success,
    Warning,
}

/// Navigation targets the controller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    SelectionSummary,
}

/// A one-shot effect. Delivery order must match emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    PlayHaptic { kind: HapticKind },
    ShowToast { message: String },
    Navigate { destination: Destination },
    /// Emitted whenever an override is confirmed, independent of how far
    /// the override diverged.
    ShowOverrideMemory { notification: String, moment: String },
}

/// Outward effect delivery capability.
#[async_trait]
pub trait EffectSink: Send + Sync {
    /// Delivers one effect. Implementations must preserve call order.
    async fn deliver(&self, effect: Effect) -> Result<(), DomainError>;
}
