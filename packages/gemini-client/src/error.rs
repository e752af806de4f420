//! Error types for the Gemini client.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Model answered without any text candidate
    #[error("empty response from model")]
    EmptyResponse,
}

impl GeminiError {
    /// Whether this error carries the rate-limit/quota signature
    /// (HTTP 429 or a `RESOURCE_EXHAUSTED` status in the body).
    pub fn is_quota_exhausted(&self) -> bool {
        match self {
            GeminiError::Api { status, message } => {
                *status == 429 || message.contains("RESOURCE_EXHAUSTED")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_signature_is_recognized() {
        assert!(GeminiError::Api {
            status: 429,
            message: "too many requests".to_string()
        }
        .is_quota_exhausted());

        assert!(GeminiError::Api {
            status: 403,
            message: "RESOURCE_EXHAUSTED: quota".to_string()
        }
        .is_quota_exhausted());

        assert!(!GeminiError::Api {
            status: 500,
            message: "internal".to_string()
        }
        .is_quota_exhausted());
        assert!(!GeminiError::Network("reset".to_string()).is_quota_exhausted());
    }
}
