//! Extraction and validation of model output.
//!
//! The model is asked for a bare JSON object but often wraps it in prose.
//! The span from the first `{` to the last `}` is taken greedily; if the
//! model emits two objects that span will not parse and the response is
//! rejected rather than guessed at.

use serde_json::Value;
use tracing::{error, warn};

use crate::types::{EstimateError, MealEstimate, Variant};

/// Extract the greedy `{ ... }` span from raw model text.
pub fn extract_json_span(raw: &str) -> Option<&str> {
    let text = raw.trim();
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Turn raw model text into a validated estimate for `variant`.
pub fn parse_estimate(raw: &str, variant: Variant) -> Result<MealEstimate, EstimateError> {
    let Some(span) = extract_json_span(raw) else {
        error!(raw = %raw, "Invalid AI response: no JSON object found");
        return Err(EstimateError::MalformedResponse {
            reason: "no JSON object found".to_string(),
        });
    };

    let value: Value = serde_json::from_str(span).map_err(|e| {
        error!(raw = %raw, error = %e, "Invalid AI response: JSON parse failed");
        EstimateError::MalformedResponse {
            reason: e.to_string(),
        }
    })?;

    validate_estimate(value, variant)
}

/// Structural validation of a parsed JSON value.
///
/// Type checks for the shared fields come from the typed decode. Protein
/// keys are raw JSON and only checked when the variant requires them.
pub fn validate_estimate(value: Value, variant: Variant) -> Result<MealEstimate, EstimateError> {
    if !value.is_object() {
        return Err(schema_error("response is not a JSON object"));
    }

    let estimate: MealEstimate =
        serde_json::from_value(value).map_err(|e| schema_error(&e.to_string()))?;

    if variant.requires_protein() {
        if !estimate.total_protein().is_some_and(Value::is_number) {
            return Err(schema_error("totalProtein is not a number"));
        }
        if let Some(idx) = estimate
            .breakdown
            .iter()
            .position(|b| !b.protein().is_some_and(Value::is_number))
        {
            return Err(schema_error(&format!("breakdown[{idx}] protein is not a number")));
        }
    }

    Ok(estimate)
}

fn schema_error(reason: &str) -> EstimateError {
    warn!(reason, "Invalid calorie estimate structure");
    EstimateError::InvalidSchema(reason.to_string())
}
