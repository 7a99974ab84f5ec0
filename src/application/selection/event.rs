//! Interaction events delivered from the UI and sensor layers.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CakeId;

/// One input event. The controller processes each to completion, in
/// delivery order, before accepting the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionEvent {
    Tap { cake_id: CakeId },
    LongPress { cake_id: CakeId },
    /// No-op with respect to state and scores.
    TouchStart { cake_id: CakeId },
    /// No-op with respect to state and scores.
    TouchEnd,
    Accept,
    ConfirmOverride { cake_id: CakeId },
    ShakeDetected,
    DismissSerendipity,
    Retry,
    Restart,
}
