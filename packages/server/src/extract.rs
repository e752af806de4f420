//! Content extraction collaborators.
//!
//! `HttpPageExtractor` fetches and flattens certificate pages. It
//! honors the extractor contract: every internal failure — transport,
//! status, parsing — is swallowed and mapped to the empty string. The
//! pipeline's guard adds the timeout and concurrency bound on top.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use scraper::{Html, Selector};
use tracing::{debug, warn};

use verification::{ContentExtractor, ContentSource, MagicNumberSniffer, MimeSniffer};

/// Selectors whose text content makes up the flattened page text.
const CONTENT_SELECTORS: &str =
    "title, h1, h2, h3, h4, p, li, td, th, a, span, strong, em, b, label";

/// Fetches a page over HTTP and extracts its visible text.
pub struct HttpPageExtractor {
    client: reqwest::Client,
}

impl HttpPageExtractor {
    pub fn new() -> Self {
        // Certificate pages tend to block obvious bots; present the
        // header set of an ordinary browser session.
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            ),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.google.com/"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_default();

        Self { client }
    }

    async fn fetch_page_text(&self, url: &str) -> String {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(url, error = %err, "page fetch failed");
                return String::new();
            }
        };

        if !response.status().is_success() {
            debug!(url, status = response.status().as_u16(), "non-success page status");
            return String::new();
        }

        match response.text().await {
            Ok(html) => flatten_html(&html),
            Err(err) => {
                warn!(url, error = %err, "page body read failed");
                String::new()
            }
        }
    }
}

impl Default for HttpPageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentExtractor for HttpPageExtractor {
    async fn extract_text(&self, source: &ContentSource) -> String {
        match source {
            ContentSource::Url(url) => self.fetch_page_text(url).await,
            // Document byte extraction (PDF text) is a separate
            // collaborator; without one configured the contract answer
            // is the empty sentinel.
            ContentSource::Bytes { mime, .. } => {
                debug!(mime, "no byte-level extractor configured");
                String::new()
            }
        }
    }

    fn name(&self) -> &str {
        "http-page-extractor"
    }
}

/// Flatten rendered HTML into whitespace-normalized visible text.
fn flatten_html(html: &str) -> String {
    let document = Html::parse_document(html);
    let selector = match Selector::parse(CONTENT_SELECTORS) {
        Ok(selector) => selector,
        Err(_) => return String::new(),
    };

    let mut chunks: Vec<String> = Vec::new();
    for element in document.select(&selector) {
        let text: String = element.text().collect::<Vec<_>>().join(" ");
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !text.is_empty() {
            chunks.push(text);
        }
    }
    chunks.join("\n")
}

/// MIME detection for uploads: declared multipart type first, then the
/// filename extension, then magic numbers.
#[derive(Debug, Clone, Default)]
pub struct UploadSniffer {
    magic: MagicNumberSniffer,
}

impl UploadSniffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the best-effort MIME type for an upload.
    pub fn resolve(
        &self,
        declared: Option<&str>,
        filename: Option<&str>,
        bytes: &[u8],
    ) -> String {
        if let Some(declared) = declared {
            if !declared.is_empty() && declared != "application/octet-stream" {
                return declared.to_string();
            }
        }
        if let Some(filename) = filename {
            if let Some(guessed) = mime_guess::from_path(filename).first_raw() {
                return guessed.to_string();
            }
        }
        self.magic.sniff_mime(bytes)
    }
}

impl MimeSniffer for UploadSniffer {
    fn sniff_mime(&self, bytes: &[u8]) -> String {
        self.magic.sniff_mime(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_html_keeps_visible_text_only() {
        let html = r#"
            <html>
              <head>
                <title>Certificate of Completion</title>
                <script>var tracking = "noise";</script>
              </head>
              <body>
                <h1>Udemy</h1>
                <p>Instructor:   John   Smith</p>
              </body>
            </html>"#;
        let text = flatten_html(html);
        assert!(text.contains("Certificate of Completion"));
        assert!(text.contains("Instructor: John Smith"));
        assert!(!text.contains("tracking"));
    }

    #[test]
    fn sniffer_prefers_declared_type() {
        let sniffer = UploadSniffer::new();
        assert_eq!(
            sniffer.resolve(Some("application/pdf"), Some("x.png"), b"junk"),
            "application/pdf"
        );
    }

    #[test]
    fn sniffer_falls_back_to_filename_then_magic() {
        let sniffer = UploadSniffer::new();
        assert_eq!(
            sniffer.resolve(None, Some("upload.pdf"), b"junk"),
            "application/pdf"
        );
        assert_eq!(
            sniffer.resolve(None, None, &[0xFF, 0xD8, 0xFF, 0xE0]),
            "image/jpeg"
        );
    }
}
