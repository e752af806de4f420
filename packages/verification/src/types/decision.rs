//! Terminal decision artifacts and boundary payload shapes.

use serde::{Deserialize, Serialize};

use crate::types::verdict::RuleVerdict;

/// Three-level verdict of the fusion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionStatus {
    Verified,
    Suspicious,
    NotVerified,
}

impl DecisionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Verified => "VERIFIED",
            DecisionStatus::Suspicious => "SUSPICIOUS",
            DecisionStatus::NotVerified => "NOT_VERIFIED",
        }
    }
}

impl std::fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal artifact of the pipeline. Never mutated after creation.
///
/// Invariant: `confidence` is always `clamp(score, 0, 100) / 100`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResult {
    pub status: DecisionStatus,
    pub confidence: f64,
    pub reasons: Vec<String>,
}

impl DecisionResult {
    pub fn new(status: DecisionStatus, confidence: f64, reasons: Vec<String>) -> Self {
        Self {
            status,
            confidence,
            reasons,
        }
    }

    /// A zero-confidence `NOT_VERIFIED` result for terminal
    /// short-circuits (rejected URL, empty extraction).
    pub fn not_verified(reasons: Vec<String>) -> Self {
        Self::new(DecisionStatus::NotVerified, 0.0, reasons)
    }
}

/// The rule-plus-model breakdown attached to certificate and file
/// verification responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredAnalysis {
    /// Matched provider name, or "Unknown"
    pub platform: String,

    /// Rule engine verdict; `None` when the pipeline short-circuited
    /// before the rule engine ran
    pub rule_result: Option<RuleVerdict>,

    /// Raw forensic commentary from the model, when enrichment ran
    pub ai_analysis: Option<String>,
}

/// Response payload of the certificate verification flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateReport {
    pub valid: bool,
    pub provider: String,
    pub details: String,
    pub structured_analysis: StructuredAnalysis,
    pub decision: DecisionResult,
}

/// Response payload of the image/document analysis flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaReport {
    pub is_ai: bool,
    pub confidence: f64,
    pub reasoning: String,
    pub decision: DecisionResult,
}

/// Outcome of the media analysis flow.
///
/// All three variants are successful response shapes; upstream model
/// failures are reported as data, never as transport errors.
#[derive(Debug, Clone)]
pub enum MediaOutcome {
    /// Analysis completed (possibly without enrichment)
    Report(MediaReport),

    /// Model quota exhausted; stable user-facing retry message
    ServiceBusy { title: String, message: String },

    /// Model call failed for a non-quota reason
    Failed { title: String, message: String },
}

/// Response payload of the generalized file-verification flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileVerification {
    pub platform: String,
    pub rule_based_result: RuleVerdict,
    pub ai_analysis: Option<String>,
    pub message: String,
    pub decision: DecisionResult,
}
