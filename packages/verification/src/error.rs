//! Typed errors for the verification library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Most foreseeable failures
//! (scrape timeout, model unavailability, malformed model output) are
//! absorbed into the evidence model and never surface here; these types
//! cover collaborator faults and genuinely invalid input.

use thiserror::Error;

/// Errors raised by a forensic model collaborator.
///
/// The orchestrator catches every variant at the enrichment boundary
/// and degrades to rule-based evidence only. `QuotaExhausted` is kept
/// distinguishable so the boundary can surface a stable "service busy"
/// message instead of a generic failure.
#[derive(Debug, Clone, Error)]
pub enum ForensicError {
    /// Rate limit or quota exceeded (HTTP 429 / RESOURCE_EXHAUSTED)
    #[error("model quota exhausted")]
    QuotaExhausted,

    /// Model service unreachable or misconfigured
    #[error("model unavailable: {0}")]
    Unavailable(String),

    /// Model returned a non-success response
    #[error("model API error: {0}")]
    Api(String),

    /// Model returned no usable text
    #[error("model returned no text")]
    EmptyResponse,
}

impl ForensicError {
    /// Whether this failure is a rate-limit/quota signature.
    pub fn is_quota_exhausted(&self) -> bool {
        matches!(self, ForensicError::QuotaExhausted)
    }
}

/// Errors that can occur during verification operations.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// Request rejected before any pipeline stage ran
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Forensic model failure that could not be absorbed
    #[error("forensic model error: {0}")]
    Forensic(#[from] ForensicError),

    /// JSON serialization failure at a boundary
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for verification operations.
pub type Result<T> = std::result::Result<T, VerificationError>;
