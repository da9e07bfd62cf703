// Copyright 2025 Cowboy AI, LLC.

//! Slug normalization.
//!
//! Every slug in the crate is produced by [`slugify`]: lowercase the text, replace
//! each maximal run of characters outside `[a-z0-9]` with a single `-`, then trim
//! `-` from both ends. The function is total and idempotent. It is many-to-one, so
//! a slug can only be mapped back to a display name through a catalog lookup.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{RouteError, RouteResult};

/// Normalize free text into a URL-safe slug.
///
/// ```rust
/// use urlspace::slugify;
///
/// assert_eq!(slugify("Greater Noida"), "greater-noida");
/// assert_eq!(slugify("  CCTV -- Repair!! "), "cctv-repair");
/// assert_eq!(slugify(""), "");
/// ```
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    out
}

/// True when `text` is already a non-empty slug (a fixed point of [`slugify`]).
pub fn is_slug(text: &str) -> bool {
    !text.is_empty()
        && !text.starts_with('-')
        && !text.ends_with('-')
        && !text.contains("--")
        && text
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// A validated, non-empty slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Accept a string that is already in slug form.
    pub fn new(slug: impl Into<String>) -> RouteResult<Self> {
        let slug = slug.into();
        if !is_slug(&slug) {
            return Err(RouteError::InvalidSlug(slug));
        }
        Ok(Self(slug))
    }

    /// Slugify display text; fails only when nothing alphanumeric remains.
    pub fn from_text(text: &str) -> RouteResult<Self> {
        let slug = slugify(text);
        if slug.is_empty() {
            return Err(RouteError::InvalidSlug(text.to_string()));
        }
        Ok(Self(slug))
    }

    /// Slug of a catalog name. Catalog names are validated to produce non-empty slugs.
    pub(crate) fn derived(name: &str) -> Self {
        Self(slugify(name))
    }

    /// View the underlying string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of bytes in the slug.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the slug has no characters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Slug {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Slug {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slug::new(s)
    }
}

impl TryFrom<String> for Slug {
    type Error = RouteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Slug::new(value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("CCTV Installation", "cctv-installation")]
    #[test_case("Sector 62", "sector-62")]
    #[test_case("DLF Phase 3", "dlf-phase-3")]
    #[test_case("Lajpat Nagar-II", "lajpat-nagar-ii")]
    #[test_case("  --Hi   There--  ", "hi-there")]
    #[test_case("IP / Network Cameras", "ip-network-cameras")]
    #[test_case("Café Security", "caf-security")]
    #[test_case("!!!", "")]
    #[test_case("", "")]
    fn slugify_cases(input: &str, expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[test]
    fn slugify_is_idempotent_on_samples() {
        for s in ["Greater Noida", "a--b", "-x-", "Ω mega", "Sector 1"] {
            let once = slugify(s);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn slug_validation() {
        assert!(Slug::new("greater-noida").is_ok());
        assert!(Slug::new("Greater-Noida").is_err());
        assert!(Slug::new("-noida").is_err());
        assert!(Slug::new("a--b").is_err());
        assert!(Slug::new("").is_err());
        assert_eq!(Slug::from_text("Greater Noida").unwrap().as_str(), "greater-noida");
        assert!(Slug::from_text("???").is_err());
    }

    #[test]
    fn slug_serde_rejects_malformed() {
        let ok: Slug = serde_json::from_str("\"sector-18\"").unwrap();
        assert_eq!(ok.as_str(), "sector-18");
        assert!(serde_json::from_str::<Slug>("\"Sector 18\"").is_err());
    }
}
