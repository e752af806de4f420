//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::extract::UploadSniffer;
use crate::server::routes::{analyze_image_handler, health_handler, verify_certificate_handler};
use crate::AppVerifier;

/// Uploads above this size are rejected before the handler runs.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub verifier: Arc<AppVerifier>,
    pub sniffer: UploadSniffer,
}

/// Build the Axum application router
pub fn build_app(verifier: AppVerifier) -> Router {
    let app_state = AxumAppState {
        verifier: Arc::new(verifier),
        sniffer: UploadSniffer::new(),
    };

    // CORS configuration - the bot frontend is served from a different
    // origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/bot/analyze-image", post(analyze_image_handler))
        .route("/api/bot/verify-certificate", post(verify_certificate_handler))
        .route("/api/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
