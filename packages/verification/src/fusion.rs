//! Decision fusion engine.
//!
//! Combines every evidence contribution collected for a request into a
//! single bounded score, mapped to a three-level verdict with a
//! normalized confidence. Pure function of the evidence sequence: no
//! hidden state, no randomness, fully reproducible.

use serde::{Deserialize, Serialize};

use crate::types::decision::{DecisionResult, DecisionStatus};
use crate::types::evidence::EvidenceTag;
use crate::types::verdict::RuleStatus;

/// The published weight table and verdict thresholds.
///
/// The values are empirically chosen constants carried over from the
/// system this consolidates; there is no calibration data behind them,
/// so they are exposed as configuration rather than baked into call
/// sites. The verdict mapping is identical across media kinds; only
/// which signals apply differs, and that is decided by which tags the
/// orchestrator emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionWeights {
    /// URL matched a profile's official pattern
    pub url_format_valid: i32,
    /// Domain belongs to a known provider
    pub recognized_provider: i32,
    /// Each certificate positive forensic indicator
    pub cert_positive_indicator: i32,
    /// Each certificate negative forensic indicator
    pub cert_negative_indicator: i32,
    /// Each image/document forensic indicator
    pub image_indicator: i32,
    /// QR code detected in the artifact
    pub qr_detected: i32,
    /// OCR text longer than [`FusionWeights::ocr_min_chars`]
    pub ocr_text: i32,
    /// Structural metadata present
    pub metadata_present: i32,
    /// Video longer than [`FusionWeights::video_min_secs`]
    pub video_duration: i32,
    /// At least [`FusionWeights::video_min_frames`] sample frames
    pub video_frames: i32,
    /// Rule engine bonus for a `Consistent` verdict
    pub rule_consistent: i32,
    /// Rule engine bonus for a `PartialMatch` verdict
    pub rule_partial_match: i32,
    /// Rule engine penalty for an `Inconsistent` verdict
    pub rule_inconsistent: i32,
    /// Minimum fused score for `VERIFIED`
    pub verified_threshold: i32,
    /// Minimum fused score for `SUSPICIOUS`
    pub suspicious_threshold: i32,
    /// OCR length gate for the OCR bonus
    pub ocr_min_chars: usize,
    /// Duration gate for the video bonus, in seconds
    pub video_min_secs: f64,
    /// Frame-count gate for the frames bonus
    pub video_min_frames: u32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            url_format_valid: 40,
            recognized_provider: 10,
            cert_positive_indicator: 5,
            cert_negative_indicator: -15,
            image_indicator: 15,
            qr_detected: 40,
            ocr_text: 30,
            metadata_present: 10,
            video_duration: 40,
            video_frames: 30,
            rule_consistent: 20,
            rule_partial_match: 10,
            rule_inconsistent: -20,
            verified_threshold: 70,
            suspicious_threshold: 40,
            ocr_min_chars: 100,
            video_min_secs: 5.0,
            video_min_frames: 3,
        }
    }
}

impl FusionWeights {
    /// Fixed bonus for a rule engine outcome. `Unsupported` and
    /// `Inconclusive` contribute nothing: absence of evidence is not
    /// evidence of absence.
    pub fn rule_bonus(&self, status: RuleStatus) -> i32 {
        match status {
            RuleStatus::Consistent => self.rule_consistent,
            RuleStatus::PartialMatch => self.rule_partial_match,
            RuleStatus::Inconsistent => self.rule_inconsistent,
            RuleStatus::Unsupported | RuleStatus::Inconclusive => 0,
        }
    }
}

/// Fuse an ordered evidence sequence into a decision.
///
/// The score is the clamped-to-`[0, 100]` sum of all tag weights, so an
/// out-of-range confidence is unreachable. Confidence is exactly
/// `score / 100`.
pub fn fuse(evidence: &[EvidenceTag], weights: &FusionWeights) -> DecisionResult {
    let raw: i32 = evidence.iter().map(|tag| tag.weight).sum();
    let score = raw.clamp(0, 100);

    let status = if score >= weights.verified_threshold {
        DecisionStatus::Verified
    } else if score >= weights.suspicious_threshold {
        DecisionStatus::Suspicious
    } else {
        DecisionStatus::NotVerified
    };

    let reasons = evidence.iter().map(|tag| tag.label.clone()).collect();

    tracing::debug!(raw, score, status = %status, tags = evidence.len(), "fused evidence");

    DecisionResult::new(status, f64::from(score) / 100.0, reasons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tag(weight: i32) -> EvidenceTag {
        EvidenceTag::new(format!("signal {:+}", weight), weight)
    }

    #[test]
    fn score_72_is_verified() {
        let result = fuse(&[tag(40), tag(30), tag(2)], &FusionWeights::default());
        assert_eq!(result.status, DecisionStatus::Verified);
        assert!((result.confidence - 0.72).abs() < f64::EPSILON);
    }

    #[test]
    fn score_55_is_suspicious() {
        let result = fuse(&[tag(40), tag(15)], &FusionWeights::default());
        assert_eq!(result.status, DecisionStatus::Suspicious);
        assert!((result.confidence - 0.55).abs() < f64::EPSILON);
    }

    #[test]
    fn score_10_is_not_verified() {
        let result = fuse(&[tag(10)], &FusionWeights::default());
        assert_eq!(result.status, DecisionStatus::NotVerified);
        assert!((result.confidence - 0.10).abs() < f64::EPSILON);
    }

    #[test]
    fn threshold_boundaries_at_exactly_40_and_70() {
        let weights = FusionWeights::default();
        assert_eq!(fuse(&[tag(70)], &weights).status, DecisionStatus::Verified);
        assert_eq!(
            fuse(&[tag(69)], &weights).status,
            DecisionStatus::Suspicious
        );
        assert_eq!(
            fuse(&[tag(40)], &weights).status,
            DecisionStatus::Suspicious
        );
        assert_eq!(
            fuse(&[tag(39)], &weights).status,
            DecisionStatus::NotVerified
        );
    }

    #[test]
    fn negative_sums_clamp_to_zero() {
        let result = fuse(&[tag(-15), tag(-15)], &FusionWeights::default());
        assert_eq!(result.status, DecisionStatus::NotVerified);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn oversized_sums_clamp_to_one() {
        let evidence: Vec<EvidenceTag> = (0..5).map(|_| tag(40)).collect();
        let result = fuse(&evidence, &FusionWeights::default());
        assert_eq!(result.status, DecisionStatus::Verified);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn reasons_preserve_evidence_order() {
        let result = fuse(
            &[
                EvidenceTag::new("first", 40),
                EvidenceTag::new("second", 10),
            ],
            &FusionWeights::default(),
        );
        assert_eq!(result.reasons, vec!["first", "second"]);
    }

    #[test]
    fn rule_bonus_table() {
        let weights = FusionWeights::default();
        assert_eq!(weights.rule_bonus(RuleStatus::Consistent), 20);
        assert_eq!(weights.rule_bonus(RuleStatus::PartialMatch), 10);
        assert_eq!(weights.rule_bonus(RuleStatus::Inconsistent), -20);
        assert_eq!(weights.rule_bonus(RuleStatus::Unsupported), 0);
        assert_eq!(weights.rule_bonus(RuleStatus::Inconclusive), 0);
    }

    proptest! {
        #[test]
        fn confidence_is_always_clamped_score_over_100(
            tag_weights in proptest::collection::vec(-200i32..200, 0..32)
        ) {
            let evidence: Vec<EvidenceTag> =
                tag_weights.iter().map(|w| tag(*w)).collect();
            let result = fuse(&evidence, &FusionWeights::default());
            let expected =
                f64::from(tag_weights.iter().sum::<i32>().clamp(0, 100)) / 100.0;
            prop_assert!((0.0..=1.0).contains(&result.confidence));
            prop_assert_eq!(result.confidence, expected);
        }

        #[test]
        fn fusion_is_deterministic(
            tag_weights in proptest::collection::vec(-200i32..200, 0..32)
        ) {
            let evidence: Vec<EvidenceTag> =
                tag_weights.iter().map(|w| tag(*w)).collect();
            let a = fuse(&evidence, &FusionWeights::default());
            let b = fuse(&evidence, &FusionWeights::default());
            prop_assert_eq!(a.status, b.status);
            prop_assert_eq!(a.confidence, b.confidence);
            prop_assert_eq!(a.reasons, b.reasons);
        }
    }
}
