//! Gemini-backed forensic model adapter.
//!
//! Bridges the provider-neutral [`ForensicModel`] contract onto the
//! Gemini `generateContent` API, translating provider errors into the
//! pipeline's forensic error vocabulary so quota exhaustion stays
//! distinguishable from other failures.

use async_trait::async_trait;

use gemini_client::{GeminiClient, GeminiError, Part};
use verification::{ForensicError, ForensicModel, MediaPayload};

pub struct GeminiForensicModel {
    client: GeminiClient,
    model: String,
}

impl GeminiForensicModel {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

fn map_error(err: GeminiError) -> ForensicError {
    if err.is_quota_exhausted() {
        return ForensicError::QuotaExhausted;
    }
    match err {
        GeminiError::EmptyResponse => ForensicError::EmptyResponse,
        GeminiError::Network(msg) => ForensicError::Unavailable(msg),
        other => ForensicError::Api(other.to_string()),
    }
}

#[async_trait]
impl ForensicModel for GeminiForensicModel {
    async fn generate_forensic_text(
        &self,
        prompt: &str,
        media: Option<&MediaPayload>,
    ) -> Result<String, ForensicError> {
        let mut parts = vec![Part::text(prompt)];
        if let Some(media) = media {
            parts.push(Part::inline_data(&media.mime, &media.data));
        }

        self.client
            .generate_content(&self.model, parts)
            .await
            .map_err(map_error)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_maps_to_quota_exhausted() {
        let err = map_error(GeminiError::Api {
            status: 429,
            message: "too many requests".to_string(),
        });
        assert!(err.is_quota_exhausted());

        let err = map_error(GeminiError::Api {
            status: 403,
            message: "RESOURCE_EXHAUSTED: daily quota".to_string(),
        });
        assert!(err.is_quota_exhausted());
    }

    #[test]
    fn other_failures_keep_their_class() {
        assert!(matches!(
            map_error(GeminiError::EmptyResponse),
            ForensicError::EmptyResponse
        ));
        assert!(matches!(
            map_error(GeminiError::Network("reset".to_string())),
            ForensicError::Unavailable(_)
        ));
        assert!(matches!(
            map_error(GeminiError::Api {
                status: 500,
                message: "internal".to_string()
            }),
            ForensicError::Api(_)
        ));
    }
}
