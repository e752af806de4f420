//! TrustLens server core.
//!
//! Boundary collaborators around the `verification` library: the HTTP
//! page extractor, the Gemini forensic model adapter, configuration,
//! and the axum application.

pub mod config;
pub mod extract;
pub mod forensic;
pub mod server;

pub use config::Config;
pub use extract::{HttpPageExtractor, UploadSniffer};
pub use forensic::GeminiForensicModel;

/// The concrete verifier wiring used by the server.
pub type AppVerifier = verification::Verifier<HttpPageExtractor, GeminiForensicModel>;
