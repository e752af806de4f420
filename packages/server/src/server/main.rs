// Main entry point for the verification API server

use std::time::Duration;

use anyhow::{Context, Result};
use server_core::{server::build_app, Config, GeminiForensicModel, HttpPageExtractor};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use verification::{Enrichment, Verifier, VerifierConfig};

use gemini_client::GeminiClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,verification=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting TrustLens verification API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Forensic enrichment is a startup capability: no key means the
    // process runs on rule-based evidence alone.
    let model = config
        .gemini_api_key
        .as_ref()
        .map(|key| GeminiForensicModel::new(GeminiClient::new(key), config.gemini_model.clone()));
    match &model {
        Some(_) => tracing::info!(model = %config.gemini_model, "forensic enrichment enabled"),
        None => tracing::warn!("GEMINI_API_KEY not set - forensic enrichment disabled"),
    }

    let verifier_config = VerifierConfig::default()
        .with_extract_timeout(Duration::from_secs(config.extract_timeout_secs))
        .with_extract_concurrency(config.extract_concurrency);

    let verifier = Verifier::new(HttpPageExtractor::new(), Enrichment::from_option(model))
        .with_config(verifier_config);

    // Build application
    let app = build_app(verifier);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/api/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
