//! Pure Google Gemini REST API client
//!
//! A clean, minimal client for the Gemini `generateContent` API with no
//! domain-specific logic. Supports text prompts and inline media parts
//! (images, PDFs).
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, Part};
//!
//! let client = GeminiClient::from_env()?;
//!
//! // Text-only generation
//! let text = client
//!     .generate_text("gemini-2.0-flash", "Describe this protocol")
//!     .await?;
//!
//! // Text + inline image
//! let text = client
//!     .generate_content(
//!         "gemini-2.0-flash",
//!         vec![Part::text(prompt), Part::inline_data("image/png", &bytes)],
//!     )
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies or test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate text from a plain prompt.
    pub async fn generate_text(&self, model: &str, prompt: &str) -> Result<String> {
        self.generate_content(model, vec![Part::text(prompt)]).await
    }

    /// Generate text from arbitrary parts (text and inline media).
    ///
    /// Single attempt, no retry; quota exhaustion is surfaced through
    /// [`GeminiError::is_quota_exhausted`].
    pub async fn generate_content(&self, model: &str, parts: Vec<Part>) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );
        let request = GenerateContentRequest {
            contents: vec![Content::user(parts)],
            generation_config: None,
        };

        debug!(model, "sending generateContent request");
        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(parsed) => format!("{}: {}", parsed.error.status, parsed.error.message),
                Err(_) => body,
            };
            warn!(model, status = status.as_u16(), "generateContent failed");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GeminiError::Parse(e.to_string()))?;

        parsed.text().ok_or(GeminiError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_overridable() {
        let client = GeminiClient::new("key").with_base_url("http://localhost:9999");
        assert_eq!(client.base_url(), "http://localhost:9999");
    }
}
