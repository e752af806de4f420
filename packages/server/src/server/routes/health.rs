use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AxumAppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    enrichment: String,
}

/// Health check endpoint
///
/// The verifier is in-process and has no backing store, so the check is
/// a liveness probe plus the enrichment capability of this process.
pub async fn health_handler(Extension(state): Extension<AxumAppState>) -> Json<HealthResponse> {
    let enrichment = if state.verifier.enrichment_enabled() {
        "enabled"
    } else {
        "disabled"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        enrichment: enrichment.to_string(),
    })
}
