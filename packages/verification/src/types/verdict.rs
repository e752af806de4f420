//! Rule engine verdicts.

use serde::{Deserialize, Serialize};

/// Outcome category of the rule engine for one (text, profile) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleStatus {
    /// All required keywords present and the provider identifier found
    Consistent,
    /// Some required keywords present
    PartialMatch,
    /// No required keywords, or negative keywords present
    Inconsistent,
    /// Provider unknown; no profile to score against
    Unsupported,
    /// Not enough text to analyze
    Inconclusive,
}

impl RuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleStatus::Consistent => "consistent",
            RuleStatus::PartialMatch => "partial_match",
            RuleStatus::Inconsistent => "inconsistent",
            RuleStatus::Unsupported => "unsupported",
            RuleStatus::Inconclusive => "inconclusive",
        }
    }
}

impl std::fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule engine output: a status plus the ordered evidence trail that
/// produced it. Derived purely from the (text, profile) pair; produced
/// once per request and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleVerdict {
    pub status: RuleStatus,
    pub evidence: Vec<String>,
}

impl RuleVerdict {
    pub fn new(status: RuleStatus) -> Self {
        Self {
            status,
            evidence: Vec::new(),
        }
    }

    pub fn with_evidence(mut self, evidence: Vec<String>) -> Self {
        self.evidence = evidence;
        self
    }
}
