//! Evidence tags: named, signed point contributions to the fusion score.

use serde::{Deserialize, Serialize};

/// A single evidence contribution.
///
/// Weights are fixed constants from the published weight table
/// ([`crate::fusion::FusionWeights`]); they are never computed from
/// unrelated request data. The full evidence set for a request is an
/// ordered sequence of tags, append-only during orchestration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceTag {
    pub label: String,
    pub weight: i32,
}

impl EvidenceTag {
    pub fn new(label: impl Into<String>, weight: i32) -> Self {
        Self {
            label: label.into(),
            weight,
        }
    }
}

impl std::fmt::Display for EvidenceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:+})", self.label, self.weight)
    }
}
