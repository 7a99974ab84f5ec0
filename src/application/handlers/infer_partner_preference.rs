//! InferPartnerPreference - Command handler for running partner inference.
//!
//! The controller never calls the inference provider itself; this handler
//! runs ahead of initialization and its result is injected into
//! `SelectionController::initialize`.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{InferenceContext, InferredPreference, PreferenceInference};

/// Command to infer a partner's preference vector.
#[derive(Debug, Clone)]
pub struct InferPartnerPreferenceCommand {
    pub context: InferenceContext,
}

/// Handler bridging the inference port into the selection flow.
pub struct InferPartnerPreferenceHandler {
    provider: Arc<dyn PreferenceInference>,
}

impl InferPartnerPreferenceHandler {
    pub fn new(provider: Arc<dyn PreferenceInference>) -> Self {
        Self { provider }
    }

    pub async fn handle(
        &self,
        cmd: InferPartnerPreferenceCommand,
    ) -> Result<InferredPreference, DomainError> {
        let inferred = self.provider.infer_preference(&cmd.context).await?;

        if !(0.0..=1.0).contains(&inferred.confidence) {
            return Err(DomainError::new(
                ErrorCode::InferenceProviderError,
                "Provider returned a confidence outside [0, 1]",
            )
            .with_detail("confidence", inferred.confidence.to_string()));
        }

        info!(
            partner_id = %cmd.context.partner_id,
            confidence = inferred.confidence,
            band = ?inferred.band(),
            "partner preference inferred"
        );
        Ok(inferred)
    }
}
