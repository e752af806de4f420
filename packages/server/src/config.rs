use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,

    /// Absent key permanently disables forensic enrichment for this
    /// process; it is a capability flag, not a retried resource.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,

    pub extract_timeout_secs: u64,
    pub extract_concurrency: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            extract_timeout_secs: env::var("EXTRACT_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("EXTRACT_TIMEOUT_SECS must be a valid number")?,
            extract_concurrency: env::var("EXTRACT_CONCURRENCY")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .context("EXTRACT_CONCURRENCY must be a valid number")?,
        })
    }
}
