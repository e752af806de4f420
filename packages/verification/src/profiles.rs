//! Platform profile registry.
//!
//! A profile is the set of matching rules for one supported certificate
//! issuer: the URL shape, the keywords a genuine certificate page must
//! carry, the keywords it must not, and the provider-specific
//! certificate identifier heuristic.
//!
//! Profiles are immutable and defined once at process start. The
//! registry is looked up by iteration order (ties between ambiguous
//! URLs break in registry order) and by name; it is never mutated after
//! construction.

use regex::Regex;

/// Matching rules for one certificate provider.
#[derive(Debug, Clone)]
pub struct PlatformProfile {
    /// Provider display name (e.g., "Udemy")
    pub name: String,

    /// Literal domain checked before the structural pattern
    pub domain: String,

    /// Anchored URL pattern for an official certificate link
    pub url_pattern: Regex,

    /// Provider-specific certificate identifier token pattern,
    /// matched against extracted page text
    pub id_pattern: Regex,

    /// Keywords a genuine certificate page is expected to contain
    pub required_keywords: Vec<String>,

    /// Keywords whose presence marks the page as a non-certificate
    pub negative_keywords: Vec<String>,

    /// User-facing hint reported when the domain is recognized but the
    /// URL shape is wrong
    pub expected_format: String,
}

impl PlatformProfile {
    /// Create a profile. Panics on invalid patterns, which is
    /// acceptable for the compile-time-constant built-in registry;
    /// use [`PlatformProfile::try_new`] for externally supplied rules.
    pub fn new(
        name: impl Into<String>,
        domain: impl Into<String>,
        url_pattern: &str,
        id_pattern: &str,
    ) -> Self {
        Self::try_new(name, domain, url_pattern, id_pattern)
            .expect("built-in profile pattern must compile")
    }

    /// Create a profile, propagating pattern compilation errors.
    pub fn try_new(
        name: impl Into<String>,
        domain: impl Into<String>,
        url_pattern: &str,
        id_pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            domain: domain.into(),
            url_pattern: Regex::new(url_pattern)?,
            id_pattern: Regex::new(id_pattern)?,
            required_keywords: Vec::new(),
            negative_keywords: Vec::new(),
            expected_format: String::new(),
        })
    }

    /// Set the required keywords.
    pub fn with_required_keywords(
        mut self,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.required_keywords = keywords.into_iter().map(|k| k.into()).collect();
        self
    }

    /// Set the negative keywords.
    pub fn with_negative_keywords(
        mut self,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.negative_keywords = keywords.into_iter().map(|k| k.into()).collect();
        self
    }

    /// Set the expected-format hint.
    pub fn with_expected_format(mut self, format: impl Into<String>) -> Self {
        self.expected_format = format.into();
        self
    }
}

/// Ordered, immutable collection of platform profiles.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<PlatformProfile>,
}

impl ProfileRegistry {
    /// Registry with the built-in Udemy and Coursera profiles.
    pub fn builtin() -> Self {
        let udemy = PlatformProfile::new(
            "Udemy",
            "udemy.com",
            r"^https?://(www\.)?udemy\.com/certificate/UC-[a-zA-Z0-9-]+/?",
            r"UC-[a-zA-Z0-9][a-zA-Z0-9-]{5,}",
        )
        .with_required_keywords(["Certificate of Completion", "Udemy", "Instructor"])
        .with_negative_keywords(["preview", "draft", "example"])
        .with_expected_format("Expected 'udemy.com/certificate/UC-...'");

        let coursera = PlatformProfile::new(
            "Coursera",
            "coursera.org",
            r"^https?://(www\.)?coursera\.org/account/accomplishments/(verify|certificate)/[a-zA-Z0-9]+/?",
            r"\b[A-Z0-9]{10,16}\b",
        )
        .with_required_keywords(["Coursera", "has successfully completed", "Verify at"])
        .with_expected_format("Expected 'coursera.org/account/accomplishments/...'");

        Self {
            profiles: vec![udemy, coursera],
        }
    }

    /// Empty registry, for callers that supply their own profiles.
    pub fn empty() -> Self {
        Self {
            profiles: Vec::new(),
        }
    }

    /// Append a profile. Registry order is the lookup tie-break.
    pub fn with_profile(mut self, profile: PlatformProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    /// Iterate profiles in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &PlatformProfile> {
        self.profiles.iter()
    }

    /// Look up a profile by provider name.
    pub fn get(&self, name: &str) -> Option<&PlatformProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Best-effort provider detection from document text: the first
    /// profile whose name appears in the text (case-insensitive).
    /// Used by the generalized file-verification flow, where no URL is
    /// available to match against.
    pub fn detect_from_text(&self, text: &str) -> Option<&PlatformProfile> {
        let lower = text.to_lowercase();
        self.profiles
            .iter()
            .find(|p| lower.contains(&p.name.to_lowercase()))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
