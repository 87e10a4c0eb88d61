//! Meal Gateway: LLM-backed calorie and protein estimation
//!
//! Entry point. Loads configuration, initialises structured logging,
//! validates the provider API key, and serves HTTP until Ctrl+C.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use meal_gateway::config::{self, AppConfig};
use meal_gateway::estimator::Estimator;
use meal_gateway::llm::groq::GroqClient;
use meal_gateway::server::{self, routes::GatewayState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let config_path = std::env::var("MEAL_GATEWAY_CONFIG")
        .unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let port_override = std::env::var("PORT").ok();
    let cfg = AppConfig::load(&config_path)?.with_port_override(port_override.as_deref())?;

    // Fail before binding if the key is absent
    let api_key = cfg.resolve_api_key()?;

    info!(
        variant = %cfg.server.variant,
        model = %cfg.provider.model,
        port = cfg.server.port,
        "Meal Gateway starting up"
    );

    let provider = GroqClient::new(&cfg.provider, api_key)
        .context("Failed to build Groq HTTP client")?;
    let estimator = Estimator::new(Arc::new(provider), cfg.server.variant);
    let state = Arc::new(GatewayState::new(estimator));

    server::serve(state, cfg.server.port).await
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("meal_gateway=info,tower_http=info"));

    let json_logging = std::env::var("MEAL_GATEWAY_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
