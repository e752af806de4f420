//! Testing utilities including mock collaborators.
//!
//! Useful for testing the pipeline without network or model calls.
//! Mocks are deterministic, configurable, and track their calls for
//! assertions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ForensicError;
use crate::traits::extractor::{ContentExtractor, ContentSource};
use crate::traits::forensic::{ForensicModel, MediaPayload};

/// A mock content extractor with scripted responses.
///
/// Responses are keyed by URL for `ContentSource::Url` and by MIME type
/// for `ContentSource::Bytes`; unmatched sources fall back to the
/// default text (empty unless configured). Clones share state, so a
/// retained clone can assert on calls after the original moves into a
/// verifier.
#[derive(Clone, Default)]
pub struct MockExtractor {
    responses: Arc<RwLock<HashMap<String, String>>>,
    default_text: Arc<RwLock<String>>,
    delay: Option<Duration>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for a URL or MIME key.
    pub fn with_text(self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(key.into(), text.into());
        self
    }

    /// Set the fallback response for unscripted sources.
    pub fn with_default_text(self, text: impl Into<String>) -> Self {
        *self.default_text.write().unwrap() = text.into();
        self
    }

    /// Delay every extraction, for timeout tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sources this extractor was asked about, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl ContentExtractor for MockExtractor {
    async fn extract_text(&self, source: &ContentSource) -> String {
        let key = match source {
            ContentSource::Url(url) => url.clone(),
            ContentSource::Bytes { mime, .. } => mime.clone(),
        };
        self.calls.write().unwrap().push(key.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .read()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| self.default_text.read().unwrap().clone())
    }

    fn name(&self) -> &str {
        "mock-extractor"
    }
}

/// A mock forensic model returning a fixed response or a fixed error.
/// Clones share state, like [`MockExtractor`].
#[derive(Clone, Default)]
pub struct MockForensicModel {
    response: Arc<RwLock<Option<String>>>,
    error: Arc<RwLock<Option<ForensicError>>>,
    prompts: Arc<RwLock<Vec<String>>>,
    media_calls: Arc<RwLock<usize>>,
}

impl MockForensicModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer with this commentary.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        *self.response.write().unwrap() = Some(text.into());
        self
    }

    /// Always fail with this error.
    pub fn failing_with(self, error: ForensicError) -> Self {
        *self.error.write().unwrap() = Some(error);
        self
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.read().unwrap().len()
    }

    /// How many calls carried a media payload.
    pub fn media_call_count(&self) -> usize {
        *self.media_calls.read().unwrap()
    }
}

#[async_trait]
impl ForensicModel for MockForensicModel {
    async fn generate_forensic_text(
        &self,
        prompt: &str,
        media: Option<&MediaPayload>,
    ) -> Result<String, ForensicError> {
        self.prompts.write().unwrap().push(prompt.to_string());
        if media.is_some() {
            *self.media_calls.write().unwrap() += 1;
        }

        if let Some(error) = self.error.read().unwrap().clone() {
            return Err(error);
        }
        Ok(self
            .response
            .read()
            .unwrap()
            .clone()
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock-forensic-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_extractor_scripts_by_key_and_tracks_calls() {
        let extractor = MockExtractor::new().with_text("https://a.test", "hello");
        let text = extractor
            .extract_text(&ContentSource::Url("https://a.test".to_string()))
            .await;
        assert_eq!(text, "hello");

        let fallback = extractor
            .extract_text(&ContentSource::Url("https://b.test".to_string()))
            .await;
        assert_eq!(fallback, "");
        assert_eq!(extractor.calls(), vec!["https://a.test", "https://b.test"]);
    }

    #[tokio::test]
    async fn mock_model_errors_when_scripted() {
        let model = MockForensicModel::new().failing_with(ForensicError::QuotaExhausted);
        let err = model.generate_forensic_text("prompt", None).await.unwrap_err();
        assert!(err.is_quota_exhausted());
        assert_eq!(model.call_count(), 1);
    }
}
