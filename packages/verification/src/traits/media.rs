//! File-type sniffing contract.

/// Sniffs a MIME type from raw upload bytes.
///
/// Treated as an opaque collaborator: the pipeline only needs a
/// best-effort type string to route uploads (image vs. PDF) and to
/// label media payloads for the forensic model. `application/octet-stream`
/// is the conventional "unknown" answer.
pub trait MimeSniffer: Send + Sync {
    fn sniff_mime(&self, bytes: &[u8]) -> String;
}

/// Minimal magic-number sniffer covering the formats the boundary
/// accepts. Real deployments can substitute richer detection without
/// touching the pipeline.
#[derive(Debug, Clone, Default)]
pub struct MagicNumberSniffer;

impl MimeSniffer for MagicNumberSniffer {
    fn sniff_mime(&self, bytes: &[u8]) -> String {
        let mime = if bytes.starts_with(b"%PDF-") {
            "application/pdf"
        } else if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
            "image/png"
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            "image/jpeg"
        } else if bytes.len() > 11 && &bytes[8..12] == b"WEBP" {
            "image/webp"
        } else if bytes.starts_with(b"GIF8") {
            "image/gif"
        } else {
            "application/octet-stream"
        };
        mime.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_common_formats() {
        let sniffer = MagicNumberSniffer;
        assert_eq!(sniffer.sniff_mime(b"%PDF-1.7 rest"), "application/pdf");
        assert_eq!(
            sniffer.sniff_mime(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A]),
            "image/png"
        );
        assert_eq!(
            sniffer.sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]),
            "image/jpeg"
        );
        assert_eq!(
            sniffer.sniff_mime(b"random bytes"),
            "application/octet-stream"
        );
    }
}
