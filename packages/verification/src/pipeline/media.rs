//! Media analysis and generalized file-verification flows.

use tracing::{debug, info};

use crate::forensics::normalize_report;
use crate::fusion::{fuse, FusionWeights};
use crate::pipeline::{
    prompts, EnrichmentOutcome, SkipReason, Verifier, ANALYSIS_FAILED_TITLE,
    SERVICE_BUSY_MESSAGE, SERVICE_BUSY_TITLE,
};
use crate::rules;
use crate::traits::extractor::{ContentExtractor, ContentSource};
use crate::traits::forensic::{ForensicModel, MediaPayload};
use crate::types::decision::{
    DecisionStatus, FileVerification, MediaOutcome, MediaReport,
};
use crate::types::evidence::EvidenceTag;
use crate::types::request::{MediaKind, StructuralSignals};

/// Map structural signals to their evidence tags for one media kind.
fn structural_evidence(
    signals: &StructuralSignals,
    kind: MediaKind,
    weights: &FusionWeights,
) -> Vec<EvidenceTag> {
    let mut tags = Vec::new();
    match kind {
        MediaKind::Image | MediaKind::Pdf => {
            if signals.qr_detected {
                tags.push(EvidenceTag::new("QR code detected", weights.qr_detected));
            }
            if signals.ocr_text.chars().count() > weights.ocr_min_chars {
                tags.push(EvidenceTag::new("Readable text extracted", weights.ocr_text));
            }
            if signals.metadata_present {
                tags.push(EvidenceTag::new("Metadata present", weights.metadata_present));
            }
        }
        MediaKind::Video => {
            // No frame-extraction collaborator exists yet; this path is
            // reachable only through directly supplied signals.
            if signals.video_duration_secs > weights.video_min_secs {
                tags.push(EvidenceTag::new(
                    "Sufficient video duration",
                    weights.video_duration,
                ));
            }
            if signals.sample_frames >= weights.video_min_frames {
                tags.push(EvidenceTag::new(
                    "Multiple frames extracted",
                    weights.video_frames,
                ));
            }
        }
        MediaKind::Certificate => {}
    }
    tags
}

impl<E, M> Verifier<E, M>
where
    E: ContentExtractor,
    M: ForensicModel,
{
    /// Analyze an uploaded image, PDF, or video for authenticity.
    ///
    /// The forensic model is the primary signal here. A quota failure
    /// becomes the stable "service busy" outcome; another model failure
    /// becomes a structured failure payload; a disabled or empty model
    /// degrades to a verdict over structural signals alone. All of
    /// these are successful response shapes.
    pub async fn analyze_media(
        &self,
        data: &[u8],
        mime: &str,
        kind: MediaKind,
        signals: &StructuralSignals,
    ) -> MediaOutcome {
        info!(kind = %kind, mime, bytes = data.len(), "media analysis started");
        let weights = self.weights().clone();
        let mut evidence = structural_evidence(signals, kind, &weights);

        let payload = MediaPayload::new(data.to_vec(), mime);
        match self.enrich(prompts::image_forensic_prompt(), Some(&payload)).await {
            EnrichmentOutcome::Report(report) => {
                let normalized = normalize_report(&report, kind, &weights);
                evidence.extend(normalized.tags);
                let decision = fuse(&evidence, &weights);
                MediaOutcome::Report(MediaReport {
                    is_ai: decision.status == DecisionStatus::Suspicious,
                    confidence: decision.confidence,
                    reasoning: report,
                    decision,
                })
            }
            EnrichmentOutcome::Skipped(SkipReason::QuotaExhausted) => MediaOutcome::ServiceBusy {
                title: SERVICE_BUSY_TITLE.to_string(),
                message: SERVICE_BUSY_MESSAGE.to_string(),
            },
            EnrichmentOutcome::Skipped(SkipReason::ModelError(message)) => MediaOutcome::Failed {
                title: ANALYSIS_FAILED_TITLE.to_string(),
                message,
            },
            EnrichmentOutcome::Skipped(reason) => {
                debug!(?reason, "media enrichment unavailable; structural verdict only");
                let decision = fuse(&evidence, &weights);
                MediaOutcome::Report(MediaReport {
                    is_ai: decision.status == DecisionStatus::Suspicious,
                    confidence: decision.confidence,
                    reasoning: "Forensic commentary unavailable; verdict is based on \
                                structural signals only."
                        .to_string(),
                    decision,
                })
            }
        }
    }

    /// Generalized file verification: treat an uploaded document as a
    /// certificate, detect the provider from its text, and run the
    /// full rule + enrichment + fusion pipeline.
    pub async fn verify_file(&self, data: &[u8], mime: &str) -> FileVerification {
        info!(mime, bytes = data.len(), "file verification started");
        let weights = self.weights().clone();

        let content = self
            .extract_guarded(&ContentSource::Bytes {
                data: data.to_vec(),
                mime: mime.to_string(),
            })
            .await;

        let profile = self.registry().detect_from_text(&content.text);
        let platform = profile
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let verdict = rules::score_text(&content.text, profile);

        let mut evidence = Vec::new();
        if profile.is_some() {
            evidence.push(EvidenceTag::new(
                format!("Recognized provider: {}", platform),
                weights.recognized_provider,
            ));
        }
        evidence.push(EvidenceTag::new(
            format!("Rule verdict: {}", verdict.status),
            weights.rule_bonus(verdict.status),
        ));
        if content.text.chars().count() > weights.ocr_min_chars {
            evidence.push(EvidenceTag::new("Readable text extracted", weights.ocr_text));
        }

        let prompt = prompts::certificate_forensic_prompt(&platform, &content.text);
        let payload = MediaPayload::new(data.to_vec(), mime);
        let mut ai_analysis = None;
        let mut service_busy = false;
        match self.enrich(&prompt, Some(&payload)).await {
            EnrichmentOutcome::Report(report) => {
                let normalized = normalize_report(&report, MediaKind::Certificate, &weights);
                evidence.extend(normalized.tags);
                ai_analysis = Some(report);
            }
            EnrichmentOutcome::Skipped(SkipReason::QuotaExhausted) => {
                service_busy = true;
            }
            EnrichmentOutcome::Skipped(reason) => {
                debug!(?reason, "file enrichment skipped");
            }
        }

        let decision = fuse(&evidence, &weights);
        let message = if service_busy {
            SERVICE_BUSY_MESSAGE.to_string()
        } else {
            match decision.status {
                DecisionStatus::Verified => {
                    format!("Document is consistent with a {} certificate.", platform)
                }
                DecisionStatus::Suspicious => {
                    "Document shows mixed evidence and warrants manual review.".to_string()
                }
                DecisionStatus::NotVerified => {
                    "Document could not be verified from the available evidence.".to_string()
                }
            }
        };

        FileVerification {
            platform,
            rule_based_result: verdict,
            ai_analysis,
            message,
            decision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_evidence_for_image_signals() {
        let weights = FusionWeights::default();
        let signals = StructuralSignals::new()
            .with_qr_detected(true)
            .with_ocr_text("x".repeat(150))
            .with_metadata_present(true);
        let tags = structural_evidence(&signals, MediaKind::Image, &weights);
        let total: i32 = tags.iter().map(|t| t.weight).sum();
        assert_eq!(total, 40 + 30 + 10);
    }

    #[test]
    fn short_ocr_text_earns_no_bonus() {
        let weights = FusionWeights::default();
        let signals = StructuralSignals::new().with_ocr_text("short");
        let tags = structural_evidence(&signals, MediaKind::Pdf, &weights);
        assert!(tags.is_empty());
    }

    #[test]
    fn video_signals_gate_on_duration_and_frames() {
        let weights = FusionWeights::default();
        let tags = structural_evidence(
            &StructuralSignals::new().with_video(6.0, 3),
            MediaKind::Video,
            &weights,
        );
        let total: i32 = tags.iter().map(|t| t.weight).sum();
        assert_eq!(total, 40 + 30);

        let tags = structural_evidence(
            &StructuralSignals::new().with_video(5.0, 2),
            MediaKind::Video,
            &weights,
        );
        assert!(tags.is_empty());
    }

    #[test]
    fn video_signals_do_not_leak_into_image_kind() {
        let weights = FusionWeights::default();
        let tags = structural_evidence(
            &StructuralSignals::new().with_video(10.0, 5),
            MediaKind::Image,
            &weights,
        );
        assert!(tags.is_empty());
    }
}
