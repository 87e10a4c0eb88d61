//! Axum web server exposing the estimate endpoint.
//!
//! CORS is open to any origin so browser front-ends can call the gateway
//! directly; preflight requests are answered by the CORS layer.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::types::Variant;
use routes::AppState;

/// Build the Axum router with all routes and middleware.
///
/// `GET /` only exists for the protein variant.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let mut router = Router::new()
        .route("/health", get(routes::health))
        .route("/estimate", post(routes::estimate));

    if state.variant() == Variant::Protein {
        router = router.route("/", get(routes::root));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `port` on all interfaces and serve until Ctrl+C.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    info!(port, "Backend running on http://localhost:{port}");
    info!("Health check: http://localhost:{port}/health");
    info!("Estimate: POST http://localhost:{port}/estimate");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down cleanly.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
