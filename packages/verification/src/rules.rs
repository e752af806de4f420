//! Rule engine: deterministic keyword scoring of extracted text.
//!
//! Pure function of the (text, profile) pair; identical inputs always
//! yield an identical verdict. No network, no model calls.

use tracing::debug;

use crate::profiles::PlatformProfile;
use crate::types::verdict::{RuleStatus, RuleVerdict};

/// Minimum extracted-text length worth analyzing.
pub const MIN_TEXT_LEN: usize = 50;

/// Evidence string recorded when text is below [`MIN_TEXT_LEN`].
pub const INSUFFICIENT_TEXT_REASON: &str = "Insufficient text content for analysis.";

/// Score extracted text against a matched platform profile.
///
/// Derivation, in priority order:
///
/// 1. text shorter than [`MIN_TEXT_LEN`] → `Inconclusive`
/// 2. no profile (unknown provider) → `Unsupported`
/// 3. any negative keyword present → `Inconsistent`
/// 4. all required keywords present and the provider identifier
///    found → `Consistent`
/// 5. some required keywords present → `PartialMatch`
/// 6. otherwise → `Inconsistent`
///
/// The evidence list records every found keyword, every missing
/// keyword, every negative keyword hit, and the identifier check
/// outcome, in that order.
pub fn score_text(text: &str, profile: Option<&PlatformProfile>) -> RuleVerdict {
    if text.trim().chars().count() < MIN_TEXT_LEN {
        return RuleVerdict::new(RuleStatus::Inconclusive)
            .with_evidence(vec![INSUFFICIENT_TEXT_REASON.to_string()]);
    }

    let Some(profile) = profile else {
        return RuleVerdict::new(RuleStatus::Unsupported).with_evidence(vec![
            "Unknown provider, skipping platform keyword checks.".to_string(),
        ]);
    };

    let lower = text.to_lowercase();

    let (found, missing): (Vec<&String>, Vec<&String>) = profile
        .required_keywords
        .iter()
        .partition(|kw| lower.contains(&kw.to_lowercase()));

    let negatives: Vec<&String> = profile
        .negative_keywords
        .iter()
        .filter(|kw| lower.contains(&kw.to_lowercase()))
        .collect();

    let identifier_found = profile.id_pattern.is_match(text);

    let mut evidence = Vec::new();
    for kw in &found {
        evidence.push(format!("Found {} keyword: {}", profile.name, kw));
    }
    for kw in &missing {
        evidence.push(format!("Missing {} keyword: {}", profile.name, kw));
    }
    for kw in &negatives {
        evidence.push(format!("Negative keyword present: {}", kw));
    }
    evidence.push(if identifier_found {
        format!("{} certificate identifier detected.", profile.name)
    } else {
        format!("No {} certificate identifier found.", profile.name)
    });

    let status = if !negatives.is_empty() {
        RuleStatus::Inconsistent
    } else if missing.is_empty() && identifier_found {
        RuleStatus::Consistent
    } else if !found.is_empty() {
        RuleStatus::PartialMatch
    } else {
        RuleStatus::Inconsistent
    };

    debug!(
        provider = %profile.name,
        status = %status,
        found = found.len(),
        missing = missing.len(),
        negatives = negatives.len(),
        identifier_found,
        "rule engine verdict"
    );

    RuleVerdict::new(status).with_evidence(evidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::ProfileRegistry;

    const UDEMY_TEXT: &str = "Certificate of Completion \
        This certifies that Jane Doe completed the course on Udemy. \
        Instructor: John Smith. Certificate no: UC-011aea85-6526-4e68";

    fn udemy() -> crate::profiles::PlatformProfile {
        ProfileRegistry::builtin().get("Udemy").unwrap().clone()
    }

    #[test]
    fn short_text_is_inconclusive() {
        let verdict = score_text("too short", Some(&udemy()));
        assert_eq!(verdict.status, RuleStatus::Inconclusive);
        assert_eq!(verdict.evidence, vec![INSUFFICIENT_TEXT_REASON]);
    }

    #[test]
    fn unknown_provider_is_unsupported() {
        let text = "a".repeat(100);
        let verdict = score_text(&text, None);
        assert_eq!(verdict.status, RuleStatus::Unsupported);
    }

    #[test]
    fn all_keywords_and_identifier_is_consistent() {
        let verdict = score_text(UDEMY_TEXT, Some(&udemy()));
        assert_eq!(verdict.status, RuleStatus::Consistent);
        assert!(verdict
            .evidence
            .iter()
            .any(|e| e.contains("Certificate of Completion")));
        assert!(verdict
            .evidence
            .last()
            .unwrap()
            .contains("identifier detected"));
    }

    #[test]
    fn partial_keywords_is_partial_match() {
        let text = "This page mentions Udemy and nothing else about completion, \
            padded out to clear the minimum length threshold.";
        let verdict = score_text(text, Some(&udemy()));
        assert_eq!(verdict.status, RuleStatus::PartialMatch);
    }

    #[test]
    fn no_keywords_is_inconsistent() {
        let text = "Totally unrelated page content that goes on long enough \
            to pass the minimum text length requirement easily.";
        let verdict = score_text(text, Some(&udemy()));
        assert_eq!(verdict.status, RuleStatus::Inconsistent);
    }

    #[test]
    fn negative_keyword_forces_inconsistent() {
        let text = format!("{} This is just a preview of the certificate.", UDEMY_TEXT);
        let verdict = score_text(&text, Some(&udemy()));
        assert_eq!(verdict.status, RuleStatus::Inconsistent);
        assert!(verdict
            .evidence
            .iter()
            .any(|e| e.contains("Negative keyword present: preview")));
    }

    #[test]
    fn keyword_matching_is_case_insensitive() {
        let text = "CERTIFICATE OF COMPLETION from UDEMY, INSTRUCTOR listed, \
            certificate UC-abcdef123456 attached.";
        let verdict = score_text(text, Some(&udemy()));
        assert_eq!(verdict.status, RuleStatus::Consistent);
    }

    #[test]
    fn evidence_order_is_found_missing_negative_identifier() {
        let text = "Udemy preview page, long enough for the threshold check \
            but missing everything else a certificate carries.";
        let verdict = score_text(text, Some(&udemy()));
        let evidence = &verdict.evidence;
        let found_idx = evidence.iter().position(|e| e.starts_with("Found")).unwrap();
        let missing_idx = evidence
            .iter()
            .position(|e| e.starts_with("Missing"))
            .unwrap();
        let negative_idx = evidence
            .iter()
            .position(|e| e.starts_with("Negative"))
            .unwrap();
        assert!(found_idx < missing_idx);
        assert!(missing_idx < negative_idx);
        assert!(evidence.last().unwrap().contains("identifier"));
    }

    #[test]
    fn identical_inputs_yield_identical_verdicts() {
        let a = score_text(UDEMY_TEXT, Some(&udemy()));
        let b = score_text(UDEMY_TEXT, Some(&udemy()));
        assert_eq!(a.status, b.status);
        assert_eq!(a.evidence, b.evidence);
    }
}
