//! HTTP route handlers and the error-to-response mapping.
//!
//! All endpoints except `GET /` return JSON. State is shared via
//! `Arc<GatewayState>` and is read-only.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::estimator::Estimator;
use crate::types::{EstimateError, MealEstimate, Variant};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// State accessible by all route handlers.
pub struct GatewayState {
    pub estimator: Estimator,
}

impl GatewayState {
    pub fn new(estimator: Estimator) -> Self {
        Self { estimator }
    }

    pub fn variant(&self) -> Variant {
        self.estimator.variant()
    }
}

pub type AppState = Arc<GatewayState>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Client-facing error: a status and a fixed message, nothing internal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl ApiError {
    pub fn from_estimate(err: &EstimateError, variant: Variant) -> Self {
        match err {
            EstimateError::InvalidInput => Self {
                status: StatusCode::BAD_REQUEST,
                message: "Meal description is required",
            },
            EstimateError::Provider(_) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: variant.provider_failure_message(),
            },
            EstimateError::MalformedResponse { .. } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Invalid AI response format",
            },
            EstimateError::InvalidSchema(_) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Invalid calorie estimate structure",
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /
pub async fn root() -> &'static str {
    "✅ Backend is running"
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: state.variant().health_message().to_string(),
    })
}

/// POST /estimate
///
/// The body is taken as raw bytes so that a non-JSON body is reported
/// with the same 400 as a missing description.
pub async fn estimate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MealEstimate>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("estimate", %request_id, variant = %state.variant());

    async move {
        let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        state
            .estimator
            .estimate_body(&body)
            .await
            .map(Json)
            .map_err(|e| ApiError::from_estimate(&e, state.variant()))
    }
    .instrument(span)
    .await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
