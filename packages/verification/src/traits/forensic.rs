//! Generative forensic model contract.

use async_trait::async_trait;

use crate::error::ForensicError;

/// Media attached to a forensic prompt.
#[derive(Debug, Clone)]
pub struct MediaPayload {
    pub data: Vec<u8>,
    pub mime: String,
}

impl MediaPayload {
    pub fn new(data: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            data,
            mime: mime.into(),
        }
    }
}

/// Produces free-text forensic commentary about an artifact.
///
/// Implementations wrap a specific generative model provider. Calls are
/// single-attempt with no retry; failures (including the
/// distinguishable quota signature) are caught at the orchestrator
/// boundary and mapped to a skipped-enrichment state, never to a
/// request failure.
#[async_trait]
pub trait ForensicModel: Send + Sync {
    /// Generate forensic commentary for the prompt, optionally grounded
    /// in an attached media payload.
    async fn generate_forensic_text(
        &self,
        prompt: &str,
        media: Option<&MediaPayload>,
    ) -> Result<String, ForensicError>;

    /// Model name, for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl<T: ForensicModel + ?Sized> ForensicModel for std::sync::Arc<T> {
    async fn generate_forensic_text(
        &self,
        prompt: &str,
        media: Option<&MediaPayload>,
    ) -> Result<String, ForensicError> {
        (**self).generate_forensic_text(prompt, media).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// The enrichment capability injected into the orchestrator at startup.
///
/// Explicitly either enabled with a model or disabled for the process
/// lifetime (no credential at startup), rather than a null-checked
/// global. Absence is a capability flag, not a retried resource.
pub enum Enrichment<M> {
    Enabled(M),
    Disabled,
}

impl<M> Enrichment<M> {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Enrichment::Enabled(_))
    }

    /// Build from an optional model handle (e.g. config-dependent
    /// client construction).
    pub fn from_option(model: Option<M>) -> Self {
        match model {
            Some(m) => Enrichment::Enabled(m),
            None => Enrichment::Disabled,
        }
    }
}
