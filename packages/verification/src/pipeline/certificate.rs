//! Certificate verification flow.
//!
//! State machine: `Pending → Validated | Rejected`, `Validated →
//! Extracted | ExtractionEmpty`, `Extracted → RuleScored → (Enriched |
//! EnrichmentSkipped) → Decided`. The two short-circuit states still
//! return a complete, well-formed report; evidence and reasons only
//! ever grow.

use tracing::{debug, info};

use crate::fusion::fuse;
use crate::pipeline::{
    prompts, EnrichmentOutcome, SkipReason, Verifier, EXTRACTION_EMPTY_REASON,
    SERVICE_BUSY_MESSAGE,
};
use crate::rules;
use crate::traits::extractor::{ContentExtractor, ContentSource};
use crate::traits::forensic::ForensicModel;
use crate::types::decision::{
    CertificateReport, DecisionResult, DecisionStatus, StructuredAnalysis,
};
use crate::types::evidence::EvidenceTag;
use crate::types::request::MediaKind;
use crate::validator::validate_url;
use crate::forensics::normalize_report;

impl<E, M> Verifier<E, M>
where
    E: ContentExtractor,
    M: ForensicModel,
{
    /// Verify a certificate URL end to end.
    ///
    /// Always returns a well-formed report; rejection and extraction
    /// failure are `NOT_VERIFIED` outcomes, not errors.
    pub async fn verify_certificate(&self, url: &str) -> CertificateReport {
        let validation = validate_url(self.registry(), url);
        info!(
            url,
            provider = %validation.provider,
            matched = validation.matched,
            "certificate verification started"
        );

        // Rejected: unsupported or malformed URL. No extraction.
        if !validation.matched {
            return CertificateReport {
                valid: false,
                provider: validation.provider.clone(),
                details: validation.reason.clone(),
                structured_analysis: StructuredAnalysis {
                    platform: validation.provider,
                    rule_result: None,
                    ai_analysis: None,
                },
                decision: DecisionResult::not_verified(vec![validation.reason]),
            };
        }

        let weights = self.weights().clone();
        let mut evidence = vec![
            EvidenceTag::new("Valid platform URL pattern", weights.url_format_valid),
            EvidenceTag::new(
                format!("Recognized provider: {}", validation.provider),
                weights.recognized_provider,
            ),
        ];

        // Validated → Extracted | ExtractionEmpty
        let content = self
            .extract_guarded(&ContentSource::Url(url.trim().to_string()))
            .await;
        if content.is_empty() {
            info!(url, "extraction yielded no content; short-circuiting");
            return CertificateReport {
                valid: false,
                provider: validation.provider.clone(),
                details: EXTRACTION_EMPTY_REASON.to_string(),
                structured_analysis: StructuredAnalysis {
                    platform: validation.provider,
                    rule_result: None,
                    ai_analysis: None,
                },
                decision: DecisionResult::not_verified(vec![
                    EXTRACTION_EMPTY_REASON.to_string()
                ]),
            };
        }
        if content.truncated {
            debug!(url, "extracted content truncated to budget");
        }

        // RuleScored
        let profile = self.registry().get(&validation.provider);
        let verdict = rules::score_text(&content.text, profile);
        evidence.push(EvidenceTag::new(
            format!("Rule verdict: {}", verdict.status),
            weights.rule_bonus(verdict.status),
        ));

        // Enriched | EnrichmentSkipped (fail-open)
        let prompt = prompts::certificate_forensic_prompt(&validation.provider, &content.text);
        let mut ai_analysis = None;
        let mut service_busy = false;
        match self.enrich(&prompt, None).await {
            EnrichmentOutcome::Report(report) => {
                let normalized = normalize_report(&report, MediaKind::Certificate, &weights);
                evidence.extend(normalized.tags);
                ai_analysis = Some(report);
            }
            EnrichmentOutcome::Skipped(SkipReason::QuotaExhausted) => {
                service_busy = true;
            }
            EnrichmentOutcome::Skipped(reason) => {
                debug!(?reason, "certificate enrichment skipped");
            }
        }

        // Decided
        let decision = fuse(&evidence, &weights);
        let valid = decision.status == DecisionStatus::Verified;
        let details = if service_busy {
            SERVICE_BUSY_MESSAGE.to_string()
        } else if valid {
            format!("Certificate verified for {}.", validation.provider)
        } else {
            format!(
                "Certificate could not be verified ({}, confidence {:.2}).",
                decision.status, decision.confidence
            )
        };

        info!(
            url,
            provider = %validation.provider,
            status = %decision.status,
            confidence = decision.confidence,
            "certificate verification decided"
        );

        CertificateReport {
            valid,
            provider: validation.provider.clone(),
            details,
            structured_analysis: StructuredAnalysis {
                platform: validation.provider,
                rule_result: Some(verdict),
                ai_analysis,
            },
            decision,
        }
    }
}
