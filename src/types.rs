//! Shared types for the meal gateway.
//!
//! These types form the data model used across the estimator, the
//! completion provider, and the HTTP layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Variant
// ---------------------------------------------------------------------------

/// Which estimate contract the gateway serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Calories and protein, per meal and per breakdown item.
    #[default]
    Protein,
    /// Calories only.
    Calories,
}

impl Variant {
    /// Whether estimates must carry protein figures.
    pub fn requires_protein(self) -> bool {
        matches!(self, Variant::Protein)
    }

    /// Client-facing message when the completion provider fails.
    pub fn provider_failure_message(self) -> &'static str {
        match self {
            Variant::Protein => "Estimation failed",
            Variant::Calories => "Groq estimation failed",
        }
    }

    /// Message reported by `GET /health`.
    pub fn health_message(self) -> &'static str {
        match self {
            Variant::Protein => "Backend healthy",
            Variant::Calories => "Calorie estimator healthy",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Protein => write!(f, "protein"),
            Variant::Calories => write!(f, "calories"),
        }
    }
}

// ---------------------------------------------------------------------------
// Confidence
// ---------------------------------------------------------------------------

/// Certainty levels a model may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceLevel::High => write!(f, "high"),
            ConfidenceLevel::Medium => write!(f, "medium"),
            ConfidenceLevel::Low => write!(f, "low"),
        }
    }
}

impl FromStr for ConfidenceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(ConfidenceLevel::High),
            "medium" => Ok(ConfidenceLevel::Medium),
            "low" => Ok(ConfidenceLevel::Low),
            "" => Err("confidence is empty".to_string()),
            other => Err(format!("unknown confidence level: {other}")),
        }
    }
}

/// Model self-reported certainty.
///
/// The level is matched case-insensitively, but the text serializes back
/// exactly as the model wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Confidence {
    level: ConfidenceLevel,
    raw: String,
}

impl Confidence {
    pub fn level(&self) -> ConfidenceLevel {
        self.level
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level)
    }
}

impl TryFrom<String> for Confidence {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let level = value.parse()?;
        Ok(Self { level, raw: value })
    }
}

impl From<Confidence> for String {
    fn from(confidence: Confidence) -> Self {
        confidence.raw
    }
}

// ---------------------------------------------------------------------------
// Request / result
// ---------------------------------------------------------------------------

/// A validated estimate request. The description is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateRequest {
    pub description: String,
}

/// The estimate returned to callers.
///
/// Numbers are carried as `serde_json::Number` so provider values pass
/// through exactly as emitted. Every other key, protein figures included,
/// stays in `extra` as raw JSON and is serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEstimate {
    pub total_calories: Number,
    pub confidence: Confidence,
    pub breakdown: Vec<BreakdownItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MealEstimate {
    /// Raw `totalProtein` value, if the model sent the key.
    pub fn total_protein(&self) -> Option<&Value> {
        self.extra.get("totalProtein")
    }
}

/// One itemized component of a meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub item: String,
    pub calories: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BreakdownItem {
    /// Raw `protein` value, if the model sent the key.
    pub fn protein(&self) -> Option<&Value> {
        self.extra.get("protein")
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Failures of the completion provider call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider returned no completion text")]
    EmptyCompletion,
}

/// Outcome of a failed estimate, one variant per HTTP mapping.
#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    #[error("Meal description is required")]
    InvalidInput,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Model response is not extractable JSON: {reason}")]
    MalformedResponse { reason: String },

    #[error("Model response does not match the estimate schema: {0}")]
    InvalidSchema(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
