//! Verification orchestrator.
//!
//! Sequences validation → extraction → rule scoring → optional forensic
//! enrichment → fusion. Terminal failures short-circuit to well-formed
//! low-confidence results; enrichment is strictly fail-open: any model
//! failure degrades the evidence set and the pipeline continues on
//! rule-based evidence alone. A request never errors out of a stage the
//! design marks as recoverable.

pub mod certificate;
pub mod media;
pub mod prompts;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::{Result, VerificationError};
use crate::fusion::FusionWeights;
use crate::profiles::ProfileRegistry;
use crate::traits::extractor::{ContentExtractor, ContentSource};
use crate::traits::forensic::{Enrichment, ForensicModel, MediaPayload};
use crate::types::decision::{CertificateReport, FileVerification, MediaOutcome};
use crate::types::request::{ExtractedContent, MediaKind, Subject, VerificationRequest};

/// Stable title for the quota-exhaustion outcome.
pub const SERVICE_BUSY_TITLE: &str = "Service Currently Busy";

/// Stable user-facing message for the quota-exhaustion outcome.
pub const SERVICE_BUSY_MESSAGE: &str =
    "Our forensic analysis service is currently experiencing unusually high demand. \
     Your submission was processed securely and has not been stored. \
     Please wait a brief moment before attempting your verification again.";

/// Title for non-quota model failures.
pub const ANALYSIS_FAILED_TITLE: &str = "Analysis Failed";

/// Reason recorded when extraction yields the empty sentinel.
pub const EXTRACTION_EMPTY_REASON: &str = "Could not retrieve content.";

/// Orchestrator tuning knobs.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Hard wall-clock bound on one extraction call
    pub extract_timeout: Duration,

    /// Character budget applied to extracted text
    pub max_extract_chars: usize,

    /// Concurrent extraction slots; extraction is the blocking-prone
    /// stage, so concurrent requests must not serialize behind one
    /// slow scrape
    pub extract_concurrency: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            extract_timeout: Duration::from_secs(30),
            max_extract_chars: 15_000,
            extract_concurrency: 4,
        }
    }
}

impl VerifierConfig {
    pub fn with_extract_timeout(mut self, timeout: Duration) -> Self {
        self.extract_timeout = timeout;
        self
    }

    pub fn with_max_extract_chars(mut self, max_chars: usize) -> Self {
        self.max_extract_chars = max_chars;
        self
    }

    pub fn with_extract_concurrency(mut self, concurrency: usize) -> Self {
        self.extract_concurrency = concurrency.max(1);
        self
    }
}

/// Outcome of the enrichment stage.
#[derive(Debug, Clone)]
pub enum EnrichmentOutcome {
    /// Model produced forensic commentary
    Report(String),

    /// Enrichment did not contribute; the pipeline proceeds regardless
    Skipped(SkipReason),
}

/// Why enrichment was skipped.
#[derive(Debug, Clone)]
pub enum SkipReason {
    /// No model capability configured for this process
    Disabled,

    /// Model quota/rate limit hit; surfaced as "service busy"
    QuotaExhausted,

    /// Model call failed for another reason
    ModelError(String),

    /// Model answered with no usable text
    EmptyOutput,
}

/// Terminal artifact of [`Verifier::verify`], one variant per flow.
#[derive(Debug, Clone)]
pub enum VerificationOutcome {
    Certificate(CertificateReport),
    Media(MediaOutcome),
    File(FileVerification),
}

/// The verification orchestrator.
///
/// Holds the immutable profile registry, the weight table, the content
/// extractor, and the enrichment capability. All dependencies are
/// injected at construction; per-request state lives on the stack.
pub struct Verifier<E, M> {
    registry: ProfileRegistry,
    weights: FusionWeights,
    config: VerifierConfig,
    extractor: E,
    enrichment: Enrichment<M>,
    extract_permits: Arc<Semaphore>,
}

impl<E, M> Verifier<E, M>
where
    E: ContentExtractor,
    M: ForensicModel,
{
    /// Create a verifier with the built-in registry and default
    /// weights/config.
    pub fn new(extractor: E, enrichment: Enrichment<M>) -> Self {
        let config = VerifierConfig::default();
        let extract_permits = Arc::new(Semaphore::new(config.extract_concurrency));
        Self {
            registry: ProfileRegistry::builtin(),
            weights: FusionWeights::default(),
            config,
            extractor,
            enrichment,
            extract_permits,
        }
    }

    /// Replace the profile registry.
    pub fn with_registry(mut self, registry: ProfileRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the weight table.
    pub fn with_weights(mut self, weights: FusionWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Replace the tuning config.
    pub fn with_config(mut self, config: VerifierConfig) -> Self {
        self.extract_permits = Arc::new(Semaphore::new(config.extract_concurrency));
        self.config = config;
        self
    }

    /// Whether forensic enrichment is available in this process.
    pub fn enrichment_enabled(&self) -> bool {
        self.enrichment.is_enabled()
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    pub fn weights(&self) -> &FusionWeights {
        &self.weights
    }

    /// Dispatch a verification request to the matching flow.
    pub async fn verify(&self, request: VerificationRequest) -> Result<VerificationOutcome> {
        match (request.subject, request.media_type) {
            (Subject::Url(url), MediaKind::Certificate) => {
                if url.trim().is_empty() {
                    return Err(VerificationError::InvalidRequest {
                        reason: "URL is required".to_string(),
                    });
                }
                Ok(VerificationOutcome::Certificate(
                    self.verify_certificate(&url).await,
                ))
            }
            (Subject::Url(_), kind) => Err(VerificationError::InvalidRequest {
                reason: format!("{} verification requires an uploaded file, not a URL", kind),
            }),
            (Subject::FileBytes { data, .. }, _) if data.is_empty() => {
                Err(VerificationError::InvalidRequest {
                    reason: "no file uploaded".to_string(),
                })
            }
            (Subject::FileBytes { data, mime }, MediaKind::Certificate) => Ok(
                VerificationOutcome::File(self.verify_file(&data, &mime).await),
            ),
            (Subject::FileBytes { data, mime }, kind) => Ok(VerificationOutcome::Media(
                self.analyze_media(&data, &mime, kind, &request.signals)
                    .await,
            )),
        }
    }

    /// Run the extractor behind the bounded, timed guard.
    ///
    /// Every failure path — permit acquisition, timeout, the
    /// collaborator's own swallowed errors — maps to the empty-content
    /// sentinel; nothing propagates.
    pub(crate) async fn extract_guarded(&self, source: &ContentSource) -> ExtractedContent {
        let permit = match self.extract_permits.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                warn!(source = %source.describe(), "extraction pool closed");
                return ExtractedContent::empty();
            }
        };

        let raw = match timeout(
            self.config.extract_timeout,
            self.extractor.extract_text(source),
        )
        .await
        {
            Ok(text) => text,
            Err(_) => {
                warn!(
                    source = %source.describe(),
                    timeout_secs = self.config.extract_timeout.as_secs(),
                    extractor = self.extractor.name(),
                    "extraction timed out"
                );
                return ExtractedContent::empty();
            }
        };
        drop(permit);

        ExtractedContent::from_raw(raw, self.config.max_extract_chars)
    }

    /// Run the enrichment stage. Single attempt, no retry; all failure
    /// modes collapse into a [`SkipReason`].
    pub(crate) async fn enrich(
        &self,
        prompt: &str,
        media: Option<&MediaPayload>,
    ) -> EnrichmentOutcome {
        let model = match &self.enrichment {
            Enrichment::Enabled(model) => model,
            Enrichment::Disabled => {
                debug!("enrichment disabled for this process");
                return EnrichmentOutcome::Skipped(SkipReason::Disabled);
            }
        };

        match model.generate_forensic_text(prompt, media).await {
            Ok(text) if text.trim().is_empty() => {
                warn!(model = model.name(), "model returned empty commentary");
                EnrichmentOutcome::Skipped(SkipReason::EmptyOutput)
            }
            Ok(text) => EnrichmentOutcome::Report(text),
            Err(err) if err.is_quota_exhausted() => {
                warn!(model = model.name(), "model quota exhausted");
                EnrichmentOutcome::Skipped(SkipReason::QuotaExhausted)
            }
            Err(err) => {
                warn!(model = model.name(), error = %err, "model call failed");
                EnrichmentOutcome::Skipped(SkipReason::ModelError(err.to_string()))
            }
        }
    }
}
