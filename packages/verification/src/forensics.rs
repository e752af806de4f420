//! Forensic signal normalizer.
//!
//! Turns free-text commentary from a generative model into discrete,
//! signed evidence tags by scanning for a fixed vocabulary of
//! observational indicator phrases. Model output is never guaranteed to
//! be well-formed: structured parsing is attempted first (fenced-code
//! markers stripped, then a lenient JSON parse), but the indicator scan
//! always runs over the raw text, so a malformed report still yields
//! whatever evidence its prose carries. This stage never fails; the
//! worst outcome is an empty evidence sequence plus a passthrough note.

use tracing::debug;

use crate::fusion::FusionWeights;
use crate::types::evidence::EvidenceTag;
use crate::types::request::MediaKind;

/// Phrases associated with synthetic or manipulated imagery.
/// Each present occurrence contributes the image-indicator weight.
pub const IMAGE_INDICATORS: &[&str] = &[
    "over-smoothing",
    "plastic-like",
    "inconsistent sharpness",
    "warped edges",
    "unnatural transitions",
    "asymmetric shapes",
    "mismatched light",
    "inconsistent reflections",
    "implausible details",
    "checkerboard",
    "grid-like artifacts",
    "repeating micro-patterns",
    "abrupt texture boundaries",
    "inconsistent proportions",
];

/// Phrases describing expected certificate characteristics.
pub const CERT_POSITIVE_INDICATORS: &[&str] = &[
    "typical layout",
    "expected phrases",
    "format consistency",
    "certificate id present",
    "branding present",
    "logical consistency",
];

/// Phrases describing certificate manipulation traces.
pub const CERT_NEGATIVE_INDICATORS: &[&str] = &[
    "spelling anomaly",
    "mismatched styles",
    "manual editing",
    "inconsistent font",
    "layout incoherence",
];

/// Result of normalizing one forensic report.
#[derive(Debug, Clone)]
pub struct NormalizedReport {
    /// Matched indicators, in vocabulary order
    pub tags: Vec<EvidenceTag>,

    /// Structured payload, when the report parsed as a JSON object
    pub structured: Option<serde_json::Value>,

    /// Passthrough note when nothing could be normalized
    pub note: Option<String>,
}

impl NormalizedReport {
    fn empty_with_note(note: impl Into<String>) -> Self {
        Self {
            tags: Vec::new(),
            structured: None,
            note: Some(note.into()),
        }
    }
}

/// Normalize free-text model commentary into evidence tags.
///
/// The vocabulary scanned depends on the media kind: image, PDF, and
/// video artifacts use the image/document indicator class; certificates
/// use the positive/negative certificate classes. Matching is a
/// case-insensitive substring test against the raw report.
pub fn normalize_report(
    report: &str,
    kind: MediaKind,
    weights: &FusionWeights,
) -> NormalizedReport {
    if report.trim().is_empty() {
        return NormalizedReport::empty_with_note("Model returned no commentary.");
    }

    let structured = parse_structured(report);
    let lower = report.to_lowercase();
    let mut tags = Vec::new();

    match kind {
        MediaKind::Image | MediaKind::Pdf | MediaKind::Video => {
            for phrase in IMAGE_INDICATORS {
                if lower.contains(phrase) {
                    tags.push(EvidenceTag::new(
                        format!("Forensic indicator: {}", phrase),
                        weights.image_indicator,
                    ));
                }
            }
        }
        MediaKind::Certificate => {
            for phrase in CERT_POSITIVE_INDICATORS {
                if lower.contains(phrase) {
                    tags.push(EvidenceTag::new(
                        format!("Report indicator: {}", phrase),
                        weights.cert_positive_indicator,
                    ));
                }
            }
            for phrase in CERT_NEGATIVE_INDICATORS {
                if lower.contains(phrase) {
                    tags.push(EvidenceTag::new(
                        format!("Visual anomaly: {}", phrase),
                        weights.cert_negative_indicator,
                    ));
                }
            }
        }
    }

    debug!(
        kind = %kind,
        matched = tags.len(),
        structured = structured.is_some(),
        "normalized forensic report"
    );

    let note = if tags.is_empty() {
        Some("No recognized indicators; raw commentary retained.".to_string())
    } else {
        None
    };

    NormalizedReport {
        tags,
        structured,
        note,
    }
}

/// Attempt to parse the report as a JSON object, tolerating fenced-code
/// wrapping. Anything that is not an object is treated as prose.
fn parse_structured(report: &str) -> Option<serde_json::Value> {
    let stripped = strip_code_fences(report);
    match serde_json::from_str::<serde_json::Value>(stripped) {
        Ok(value) if value.is_object() => Some(value),
        _ => None,
    }
}

/// Strip a leading/trailing fenced-code block marker, with or without a
/// language hint, leaving the body untouched.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language hint line ("json", "text", ...), if any
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> FusionWeights {
        FusionWeights::default()
    }

    #[test]
    fn empty_report_yields_empty_tags_and_note() {
        let normalized = normalize_report("   ", MediaKind::Image, &weights());
        assert!(normalized.tags.is_empty());
        assert!(normalized.note.is_some());
    }

    #[test]
    fn image_indicators_each_contribute_15() {
        let report = "The surface shows over-smoothing and there are \
            warped edges near the subject's hands.";
        let normalized = normalize_report(report, MediaKind::Image, &weights());
        assert_eq!(normalized.tags.len(), 2);
        assert!(normalized.tags.iter().all(|t| t.weight == 15));
        assert!(normalized.note.is_none());
    }

    #[test]
    fn certificate_polarity_classes_are_signed() {
        let report = "Typical layout and branding present, but a spelling \
            anomaly appears in the course title.";
        let normalized = normalize_report(report, MediaKind::Certificate, &weights());
        let positives: Vec<_> = normalized.tags.iter().filter(|t| t.weight > 0).collect();
        let negatives: Vec<_> = normalized.tags.iter().filter(|t| t.weight < 0).collect();
        assert_eq!(positives.len(), 2);
        assert_eq!(positives[0].weight, 5);
        assert_eq!(negatives.len(), 1);
        assert_eq!(negatives[0].weight, -15);
    }

    #[test]
    fn certificate_vocabulary_not_applied_to_images() {
        let report = "Typical layout with branding present, long enough.";
        let normalized = normalize_report(report, MediaKind::Image, &weights());
        assert!(normalized.tags.is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let report = "Noticeable CHECKERBOARD artifacts across the sky region.";
        let normalized = normalize_report(report, MediaKind::Image, &weights());
        assert_eq!(normalized.tags.len(), 1);
    }

    #[test]
    fn fenced_json_parses_as_structured() {
        let report = "```json\n{\"observations\": \"warped edges on the left\"}\n```";
        let normalized = normalize_report(report, MediaKind::Image, &weights());
        assert!(normalized.structured.is_some());
        // The raw scan still sees the phrase inside the JSON body
        assert_eq!(normalized.tags.len(), 1);
    }

    #[test]
    fn malformed_json_degrades_to_prose_scan() {
        let report = "```json\n{broken json but mentions plastic-like texture\n```";
        let normalized = normalize_report(report, MediaKind::Image, &weights());
        assert!(normalized.structured.is_none());
        assert_eq!(normalized.tags.len(), 1);
    }

    #[test]
    fn non_object_json_is_treated_as_prose() {
        let normalized = normalize_report("[1, 2, 3]", MediaKind::Image, &weights());
        assert!(normalized.structured.is_none());
        assert!(normalized.tags.is_empty());
        assert!(normalized.note.is_some());
    }

    #[test]
    fn tags_follow_vocabulary_order() {
        let report = "abrupt texture boundaries first in prose, over-smoothing second";
        let normalized = normalize_report(report, MediaKind::Image, &weights());
        // Vocabulary order, not prose order: over-smoothing is listed first
        assert!(normalized.tags[0].label.contains("over-smoothing"));
        assert!(normalized.tags[1].label.contains("abrupt texture boundaries"));
    }

    #[test]
    fn strip_code_fences_handles_plain_text() {
        assert_eq!(strip_code_fences("no fences here"), "no fences here");
        assert_eq!(strip_code_fences("```\nbody\n```"), "body");
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
    }
}
