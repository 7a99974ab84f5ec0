//! Selection phases and the orthogonal serendipity mode.

use serde::{Deserialize, Serialize};

use crate::domain::exploration::DivergentPick;
use crate::domain::foundation::{CakeId, StateMachine};

/// The primary interaction state. Each variant carries only the fields
/// valid for that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SelectionPhase {
    Initial,
    Loading,
    Ready {
        recommended_id: CakeId,
    },
    Overriding {
        original_id: CakeId,
        candidate_id: CakeId,
    },
    Completed {
        chosen_id: CakeId,
        was_override: bool,
    },
    Error {
        message: String,
    },
}

impl SelectionPhase {
    /// The data-free discriminant used for transition validation.
    pub fn kind(&self) -> PhaseKind {
        match self {
            SelectionPhase::Initial => PhaseKind::Initial,
            SelectionPhase::Loading => PhaseKind::Loading,
            SelectionPhase::Ready { .. } => PhaseKind::Ready,
            SelectionPhase::Overriding { .. } => PhaseKind::Overriding,
            SelectionPhase::Completed { .. } => PhaseKind::Completed,
            SelectionPhase::Error { .. } => PhaseKind::Error,
        }
    }
}

/// Phase discriminants forming the validated state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Initial,
    Loading,
    Ready,
    Overriding,
    Completed,
    Error,
}

impl StateMachine for PhaseKind {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PhaseKind::*;
        // Retry returns to Initial from anywhere; Restart re-enters Loading
        // from any post-ranking phase.
        matches!(
            (self, target),
            (Initial, Loading)
                | (Loading, Ready)
                | (Loading, Error)
                | (Ready, Overriding)
                | (Ready, Completed)
                | (Ready, Loading)
                | (Overriding, Overriding)
                | (Overriding, Completed)
                | (Overriding, Loading)
                | (Completed, Loading)
                | (_, Initial)
        ) && !(self == &Initial && target == &Initial)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PhaseKind::*;
        match self {
            Initial => vec![Loading],
            Loading => vec![Ready, Error, Initial],
            Ready => vec![Overriding, Completed, Loading, Initial],
            Overriding => vec![Overriding, Completed, Loading, Initial],
            Completed => vec![Loading, Initial],
            Error => vec![Initial],
        }
    }
}

/// The orthogonal exploration mode toggled by shake events.
///
/// Never changes the primary phase; at most one candidate is marked as the
/// current divergent pick.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SerendipityMode {
    #[default]
    Off,
    Active {
        pick: DivergentPick,
    },
}

impl SerendipityMode {
    pub fn is_active(&self) -> bool {
        matches!(self, SerendipityMode::Active { .. })
    }
}
