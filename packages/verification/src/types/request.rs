//! Request types and extraction results.

use serde::{Deserialize, Serialize};

/// The kind of artifact being verified.
///
/// Only which fusion signals apply differs between kinds; the
/// score-to-verdict mapping is identical for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Pdf,
    Certificate,
    Video,
}

impl MediaKind {
    /// Stable lowercase name, matching the wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Pdf => "pdf",
            MediaKind::Certificate => "certificate",
            MediaKind::Video => "video",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What is being verified: a URL to fetch, or uploaded file bytes.
#[derive(Debug, Clone)]
pub enum Subject {
    Url(String),
    FileBytes { data: Vec<u8>, mime: String },
}

/// A single verification request.
///
/// Created per incoming call, immutable, discarded after the response.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub subject: Subject,
    pub media_type: MediaKind,

    /// Media-specific structural inputs supplied by upstream
    /// collaborators (QR scanner, OCR, metadata reader, frame sampler).
    pub signals: StructuralSignals,
}

impl VerificationRequest {
    /// Build a certificate-URL verification request.
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            subject: Subject::Url(url.into()),
            media_type: MediaKind::Certificate,
            signals: StructuralSignals::default(),
        }
    }

    /// Build a file-upload verification request.
    pub fn for_file(data: Vec<u8>, mime: impl Into<String>, media_type: MediaKind) -> Self {
        Self {
            subject: Subject::FileBytes {
                data,
                mime: mime.into(),
            },
            media_type,
            signals: StructuralSignals::default(),
        }
    }

    /// Attach structural signals.
    pub fn with_signals(mut self, signals: StructuralSignals) -> Self {
        self.signals = signals;
        self
    }
}

/// Text produced by a content extractor.
///
/// The empty string is the canonical "extraction failed or yielded
/// nothing" sentinel. It is deliberately indistinguishable from
/// "legitimately empty": downstream stages treat empty as inconclusive,
/// never as a valid negative result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub text: String,
    pub truncated: bool,
}

impl ExtractedContent {
    /// The extraction-failed sentinel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap raw extractor output, truncating to the character budget.
    pub fn from_raw(raw: String, max_chars: usize) -> Self {
        if raw.chars().count() > max_chars {
            Self {
                text: raw.chars().take(max_chars).collect(),
                truncated: true,
            }
        } else {
            Self {
                text: raw,
                truncated: false,
            }
        }
    }

    /// Whether this is the failed/empty sentinel.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Structural signals measured from the artifact itself.
///
/// These come from collaborators outside the core (QR detection, OCR,
/// metadata readers, video frame samplers). The video fields have no
/// extraction collaborator wired anywhere yet; the fusion path for them
/// is defined and tested but currently unreachable from the boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuralSignals {
    pub qr_detected: bool,
    pub ocr_text: String,
    pub metadata_present: bool,
    pub video_duration_secs: f64,
    pub sample_frames: u32,
}

impl StructuralSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_qr_detected(mut self, detected: bool) -> Self {
        self.qr_detected = detected;
        self
    }

    pub fn with_ocr_text(mut self, text: impl Into<String>) -> Self {
        self.ocr_text = text.into();
        self
    }

    pub fn with_metadata_present(mut self, present: bool) -> Self {
        self.metadata_present = present;
        self
    }

    pub fn with_video(mut self, duration_secs: f64, sample_frames: u32) -> Self {
        self.video_duration_secs = duration_secs;
        self.sample_frames = sample_frames;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_sets_flag_and_respects_budget() {
        let content = ExtractedContent::from_raw("abcdef".to_string(), 4);
        assert!(content.truncated);
        assert_eq!(content.text, "abcd");

        let content = ExtractedContent::from_raw("abc".to_string(), 4);
        assert!(!content.truncated);
        assert_eq!(content.text, "abc");
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let content = ExtractedContent::from_raw("   \n\t ".to_string(), 100);
        assert!(content.is_empty());
    }
}
