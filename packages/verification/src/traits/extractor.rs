//! Content extraction contract.

use async_trait::async_trait;

/// What a content extractor is pointed at.
#[derive(Debug, Clone)]
pub enum ContentSource {
    /// A page to render and read
    Url(String),

    /// Uploaded document bytes with their sniffed MIME type
    Bytes { data: Vec<u8>, mime: String },
}

impl ContentSource {
    /// Short description for logging.
    pub fn describe(&self) -> String {
        match self {
            ContentSource::Url(url) => url.clone(),
            ContentSource::Bytes { data, mime } => {
                format!("{} upload ({} bytes)", mime, data.len())
            }
        }
    }
}

/// Extracts plain text from a URL or document bytes.
///
/// Contract: returns extracted text or the empty string. Internal
/// navigation, parsing, and transport errors are swallowed and mapped
/// to empty — the orchestrator must never receive an error from this
/// stage. Implementations may block internally (browser automation,
/// PDF parsing); the pipeline offloads and bounds the call, so an
/// implementation only needs to be honest about doing its blocking work
/// off the async path (e.g. via `spawn_blocking`).
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Extract plain text from the source. Never fails; failures are
    /// the empty string.
    async fn extract_text(&self, source: &ContentSource) -> String;

    /// Extractor name, for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl<T: ContentExtractor + ?Sized> ContentExtractor for std::sync::Arc<T> {
    async fn extract_text(&self, source: &ContentSource) -> String {
        (**self).extract_text(source).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
