//! The estimate pipeline: validate, prompt, complete, parse.
//!
//! `Estimator` owns nothing mutable. Each call runs independently, and the
//! provider call is its only await point.

pub mod parse;
pub mod prompt;

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::llm::CompletionProvider;
use crate::types::{EstimateError, EstimateRequest, MealEstimate, Variant};

/// Validate a request body, returning the description verbatim.
///
/// The body must be a JSON object whose `description` is a string that is
/// non-empty once trimmed. Anything else is `InvalidInput`.
pub fn validate_request(body: &Value) -> Result<EstimateRequest, EstimateError> {
    match body.get("description") {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(EstimateRequest {
            description: s.clone(),
        }),
        _ => Err(EstimateError::InvalidInput),
    }
}

/// Runs estimates against an injected completion provider.
pub struct Estimator {
    provider: Arc<dyn CompletionProvider>,
    variant: Variant,
}

impl Estimator {
    pub fn new(provider: Arc<dyn CompletionProvider>, variant: Variant) -> Self {
        Self { provider, variant }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Validate `body` and estimate it. The provider is not called when
    /// validation fails.
    pub async fn estimate_body(&self, body: &Value) -> Result<MealEstimate, EstimateError> {
        let request = validate_request(body).inspect_err(|_| {
            warn!("Rejected estimate request without a usable description");
        })?;
        self.estimate(&request).await
    }

    /// Estimate an already-validated request.
    pub async fn estimate(&self, request: &EstimateRequest) -> Result<MealEstimate, EstimateError> {
        let prompt = prompt::build_prompt(&request.description, self.variant);
        debug!(variant = %self.variant, model = %self.model_name(), "Requesting estimate");

        let raw = self.provider.complete(&prompt).await.map_err(|e| {
            error!(error = %e, model = %self.model_name(), "Completion provider failed");
            EstimateError::from(e)
        })?;

        let estimate = parse::parse_estimate(&raw, self.variant)?;
        info!(
            total_calories = %estimate.total_calories,
            confidence = %estimate.confidence,
            items = estimate.breakdown.len(),
            "Estimate complete"
        );
        Ok(estimate)
    }
}
