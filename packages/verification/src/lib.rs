//! Evidence-Fusion Verification Library
//!
//! Assesses the authenticity of submitted artifacts — images and online
//! course certificates — by combining several independent, individually
//! weak signals into a single categorical verdict with a numeric
//! confidence.
//!
//! # Design Philosophy
//!
//! **Aggregate observations, never claim ground truth.**
//!
//! - Every signal is weak on its own; only the fused evidence decides
//! - Deterministic rule scoring, free-text model output normalized into
//!   discrete tags
//! - Fail-open orchestration: a scrape timeout, a missing model, or
//!   malformed model output degrades the evidence set, never the request
//! - Collaborators behind traits; the core never talks to a network
//!
//! # Usage
//!
//! ```rust,ignore
//! use verification::{Enrichment, Verifier};
//! use verification::testing::{MockExtractor, MockForensicModel};
//!
//! let extractor = MockExtractor::new()
//!     .with_text("https://www.udemy.com/certificate/UC-123456", page_text);
//! let verifier = Verifier::new(extractor, Enrichment::<MockForensicModel>::Disabled);
//!
//! let report = verifier
//!     .verify_certificate("https://www.udemy.com/certificate/UC-123456")
//!     .await;
//! assert!(report.valid);
//! ```
//!
//! # Modules
//!
//! - [`profiles`] - Platform profile registry (URL shapes, keywords)
//! - [`validator`] - URL/format validation against the registry
//! - [`rules`] - Deterministic keyword rule engine
//! - [`forensics`] - Forensic signal normalizer for model commentary
//! - [`fusion`] - Decision fusion engine with the published weight table
//! - [`pipeline`] - Verification orchestrator
//! - [`traits`] - Collaborator contracts (extractor, model, sniffer)
//! - [`testing`] - Mock collaborators for tests

pub mod error;
pub mod forensics;
pub mod fusion;
pub mod pipeline;
pub mod profiles;
pub mod rules;
pub mod testing;
pub mod traits;
pub mod types;
pub mod validator;

// Re-export core types at crate root
pub use error::{ForensicError, Result, VerificationError};
pub use forensics::{normalize_report, NormalizedReport};
pub use fusion::{fuse, FusionWeights};
pub use pipeline::{
    EnrichmentOutcome, SkipReason, VerificationOutcome, Verifier, VerifierConfig,
    ANALYSIS_FAILED_TITLE, EXTRACTION_EMPTY_REASON, SERVICE_BUSY_MESSAGE, SERVICE_BUSY_TITLE,
};
pub use profiles::{PlatformProfile, ProfileRegistry};
pub use rules::{score_text, MIN_TEXT_LEN};
pub use traits::{
    extractor::{ContentExtractor, ContentSource},
    forensic::{Enrichment, ForensicModel, MediaPayload},
    media::{MagicNumberSniffer, MimeSniffer},
};
pub use types::{
    decision::{
        CertificateReport, DecisionResult, DecisionStatus, FileVerification, MediaOutcome,
        MediaReport, StructuredAnalysis,
    },
    evidence::EvidenceTag,
    request::{ExtractedContent, MediaKind, StructuralSignals, Subject, VerificationRequest},
    verdict::{RuleStatus, RuleVerdict},
};
pub use validator::{validate_url, UrlValidation};
