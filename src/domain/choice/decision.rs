//! UserChoice - accept the recommendation or override it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CakeId;
use crate::domain::preference::PreferenceVector;

/// Fallback reason recorded when an override arrives without one.
pub const UNSPECIFIED_REASON: &str = "unspecified";

/// The user's decision about the current recommendation.
///
/// A tagged sum type: each variant carries only the fields valid for that
/// case. There is no representable "override denied" state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UserChoice {
    /// The user took the recommended cake.
    Acceptance { recommended_id: CakeId },
    /// The user picked a different cake. Always permitted.
    ManualOverride {
        recommended_id: CakeId,
        chosen_id: CakeId,
        chosen_name: String,
        chosen_vector: PreferenceVector,
        reason: String,
    },
}

impl UserChoice {
    /// True when this choice overrides the recommendation.
    pub fn is_override(&self) -> bool {
        matches!(self, UserChoice::ManualOverride { .. })
    }

    /// The recommendation this choice was made against.
    pub fn recommended_id(&self) -> CakeId {
        match self {
            UserChoice::Acceptance { recommended_id }
            | UserChoice::ManualOverride { recommended_id, .. } => *recommended_id,
        }
    }
}
