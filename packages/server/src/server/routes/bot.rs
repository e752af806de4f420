//! Bot-facing verification endpoints.
//!
//! Upstream model failures are reported as data in a 200 response, not
//! as transport errors; only malformed requests (no file, empty URL)
//! get a 4xx.

use axum::{
    extract::{Extension, Multipart},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use verification::{
    CertificateReport, FileVerification, MediaKind, MediaOutcome, MediaReport, StructuralSignals,
};

use crate::server::app::AxumAppState;

/// Response of `/api/bot/analyze-image`: a media report, a generalized
/// file verification (PDF uploads), or an error-as-data payload.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnalyzeImageResponse {
    Media(MediaReport),
    File(FileVerification),
    Error {
        error: bool,
        title: String,
        message: String,
    },
}

impl AnalyzeImageResponse {
    fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            error: true,
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VerifyCertificateRequest {
    pub url: String,
}

struct Upload {
    bytes: Vec<u8>,
    filename: Option<String>,
    declared_mime: Option<String>,
}

async fn read_upload(multipart: &mut Multipart) -> Option<Upload> {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let declared_mime = field.content_type().map(str::to_string);
        match field.bytes().await {
            Ok(bytes) => {
                return Some(Upload {
                    bytes: bytes.to_vec(),
                    filename,
                    declared_mime,
                })
            }
            Err(err) => {
                warn!(error = %err, "failed to read upload field");
                return None;
            }
        }
    }
    None
}

fn kind_for_mime(mime: &str) -> MediaKind {
    if mime == "application/pdf" {
        MediaKind::Pdf
    } else if mime.starts_with("video/") {
        MediaKind::Video
    } else {
        MediaKind::Image
    }
}

/// `POST /api/bot/analyze-image` — multipart upload analysis.
///
/// PDFs go through the generalized file-verification flow (keyword rules
/// over extracted text); images and video go through forensic media
/// analysis.
pub async fn analyze_image_handler(
    Extension(state): Extension<AxumAppState>,
    mut multipart: Multipart,
) -> (StatusCode, Json<AnalyzeImageResponse>) {
    let Some(upload) = read_upload(&mut multipart).await else {
        return (
            StatusCode::BAD_REQUEST,
            Json(AnalyzeImageResponse::error(
                "No File",
                "No file was uploaded.",
            )),
        );
    };

    if upload.bytes.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AnalyzeImageResponse::error(
                "Empty File",
                "The uploaded file is empty.",
            )),
        );
    }

    let mime = state.sniffer.resolve(
        upload.declared_mime.as_deref(),
        upload.filename.as_deref(),
        &upload.bytes,
    );
    let kind = kind_for_mime(&mime);
    info!(mime, kind = %kind, bytes = upload.bytes.len(), "upload received");

    if kind == MediaKind::Pdf {
        let verification = state.verifier.verify_file(&upload.bytes, &mime).await;
        return (StatusCode::OK, Json(AnalyzeImageResponse::File(verification)));
    }

    // Structural signals (QR decode, OCR, frame sampling) come from
    // dedicated collaborators when wired; the bare server submits none
    // and the forensic model carries the analysis.
    let signals = StructuralSignals::default();
    let outcome = state
        .verifier
        .analyze_media(&upload.bytes, &mime, kind, &signals)
        .await;

    let response = match outcome {
        MediaOutcome::Report(report) => AnalyzeImageResponse::Media(report),
        MediaOutcome::ServiceBusy { title, message } => AnalyzeImageResponse::error(title, message),
        MediaOutcome::Failed { title, message } => AnalyzeImageResponse::error(title, message),
    };
    (StatusCode::OK, Json(response))
}

/// `POST /api/bot/verify-certificate` — URL-based certificate check.
pub async fn verify_certificate_handler(
    Extension(state): Extension<AxumAppState>,
    Json(request): Json<VerifyCertificateRequest>,
) -> Result<Json<CertificateReport>, (StatusCode, Json<serde_json::Value>)> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": true,
                "title": "Missing URL",
                "message": "A certificate URL is required."
            })),
        ));
    }

    let report = state.verifier.verify_certificate(url).await;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use verification::{DecisionResult, DecisionStatus};

    #[test]
    fn media_report_serializes_flat() {
        let response = AnalyzeImageResponse::Media(MediaReport {
            is_ai: false,
            confidence: 0.3,
            reasoning: "No forensic indicators observed.".to_string(),
            decision: DecisionResult::new(DecisionStatus::NotVerified, 0.3, vec![]),
        });
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["is_ai"], false);
        assert_eq!(value["confidence"], 0.3);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn error_shape_carries_flag_title_message() {
        let response = AnalyzeImageResponse::error("Service Currently Busy", "Try again shortly.");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["error"], true);
        assert_eq!(value["title"], "Service Currently Busy");
        assert_eq!(value["message"], "Try again shortly.");
    }

    #[test]
    fn pdf_and_video_mimes_pick_their_kind() {
        assert_eq!(kind_for_mime("application/pdf"), MediaKind::Pdf);
        assert_eq!(kind_for_mime("video/mp4"), MediaKind::Video);
        assert_eq!(kind_for_mime("image/png"), MediaKind::Image);
        assert_eq!(kind_for_mime("application/octet-stream"), MediaKind::Image);
    }
}
