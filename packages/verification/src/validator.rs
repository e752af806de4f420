//! URL/format validation against the platform profile registry.
//!
//! Pure string work; never performs network I/O. A literal domain check
//! runs before the structural pattern so that a recognized domain with
//! a malformed path is reported distinctly from an unsupported domain.

use crate::profiles::ProfileRegistry;

/// Reason reported for URLs whose domain matches no profile.
pub const UNSUPPORTED_URL_REASON: &str = "URL not recognized or supported.";

/// Reason reported for URLs matching a profile's official pattern.
pub const MATCHED_URL_REASON: &str = "URL matches official pattern.";

/// Outcome of validating one URL against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlValidation {
    /// Whether the URL matched a profile's official pattern
    pub matched: bool,

    /// Matched or recognized provider name, or "Unknown"
    pub provider: String,

    /// Human-readable explanation of the outcome
    pub reason: String,
}

impl UrlValidation {
    /// Whether the domain belongs to a known provider, regardless of
    /// whether the structural pattern matched.
    pub fn provider_recognized(&self) -> bool {
        self.provider != "Unknown"
    }
}

/// Validate a URL against the registry.
///
/// First matching profile wins; registry order is the tie-break for
/// ambiguous URLs. Outcomes, in order of precedence:
///
/// 1. structural pattern match → `(true, provider, official-pattern)`
/// 2. domain recognized, pattern failed → `(false, provider, expected format)`
/// 3. otherwise → `(false, "Unknown", unsupported)`
pub fn validate_url(registry: &ProfileRegistry, url: &str) -> UrlValidation {
    let url = url.trim();

    for profile in registry.iter() {
        if url.contains(&profile.domain) && profile.url_pattern.is_match(url) {
            return UrlValidation {
                matched: true,
                provider: profile.name.clone(),
                reason: MATCHED_URL_REASON.to_string(),
            };
        }
    }

    // Domain recognized but the certificate path shape is wrong
    for profile in registry.iter() {
        if url.contains(&profile.domain) {
            return UrlValidation {
                matched: false,
                provider: profile.name.clone(),
                reason: format!(
                    "Invalid {} URL format. {}",
                    profile.name, profile.expected_format
                ),
            };
        }
    }

    UrlValidation {
        matched: false,
        provider: "Unknown".to_string(),
        reason: UNSUPPORTED_URL_REASON.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ProfileRegistry {
        ProfileRegistry::builtin()
    }

    #[test]
    fn valid_udemy_url_matches() {
        let v = validate_url(&registry(), "https://www.udemy.com/certificate/UC-123456");
        assert!(v.matched);
        assert_eq!(v.provider, "Udemy");
        assert_eq!(v.reason, MATCHED_URL_REASON);
    }

    #[test]
    fn valid_coursera_url_matches() {
        let v = validate_url(
            &registry(),
            "https://www.coursera.org/account/accomplishments/verify/123456",
        );
        assert!(v.matched);
        assert_eq!(v.provider, "Coursera");
    }

    #[test]
    fn unknown_domain_reports_unsupported() {
        let v = validate_url(&registry(), "https://example.com/certificate");
        assert!(!v.matched);
        assert_eq!(v.provider, "Unknown");
        assert_eq!(v.reason, UNSUPPORTED_URL_REASON);
        assert!(!v.provider_recognized());
    }

    #[test]
    fn recognized_domain_with_bad_path_reports_expected_format() {
        let v = validate_url(&registry(), "https://www.udemy.com/course/rust-basics");
        assert!(!v.matched);
        assert_eq!(v.provider, "Udemy");
        assert!(v.reason.contains("udemy.com/certificate/UC-"));
        assert!(v.provider_recognized());
    }

    #[test]
    fn leading_and_trailing_whitespace_is_ignored() {
        let v = validate_url(
            &registry(),
            "  https://www.udemy.com/certificate/UC-123456  ",
        );
        assert!(v.matched);
    }

    #[test]
    fn substring_of_domain_elsewhere_does_not_match_pattern() {
        // Domain appears in the query string, but the anchored pattern
        // rejects the overall URL shape.
        let v = validate_url(
            &registry(),
            "https://evil.test/redirect?to=udemy.com/certificate/UC-123456",
        );
        assert!(!v.matched);
        assert_eq!(v.provider, "Udemy");
        assert!(v.reason.contains("Invalid Udemy URL format"));
    }
}
