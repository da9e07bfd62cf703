// Copyright 2025 Cowboy AI, LLC.

//! Site configuration.
//!
//! Loaded from a TOML file; every field has a default so an empty file (or no
//! file at all) describes the historical setup: 20 000 URLs per sitemap shard,
//! longest-match legacy decoding, every path family enabled.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, TermFamily};
use crate::errors::{RouteError, RouteResult};
use crate::legacy::DecodePolicy;

/// Maximum URLs per sitemap file allowed by the sitemap protocol.
pub const SITEMAP_PROTOCOL_LIMIT: usize = 50_000;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host prefixed to every path (no trailing slash)
    pub base_url: String,
    /// Catalog file; the embedded catalog is used when absent
    pub catalog_path: Option<PathBuf>,
    /// Sitemap output settings
    pub sitemap: SitemapConfig,
    /// Legacy decoding settings
    pub decoder: DecoderConfig,
    /// Which path families are generated
    pub families: FamilyConfig,
    /// Entries per page of the browsable URL listing
    pub listing_page_size: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.example.com".to_string(),
            catalog_path: None,
            sitemap: SitemapConfig::default(),
            decoder: DecoderConfig::default(),
            families: FamilyConfig::default(),
            listing_page_size: 1_000,
        }
    }
}

/// Sitemap output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// URLs per sitemap file
    pub shard_size: usize,
    /// `lastmod` written for every URL; the build time when absent
    pub last_modified: Option<DateTime<Utc>>,
    /// File name stem of the shards (`{stem}-1.xml`, ...)
    pub file_stem: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            shard_size: 20_000,
            last_modified: None,
            file_stem: "sitemap".to_string(),
        }
    }
}

/// Legacy decoding settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Tie-break policy
    pub policy: DecodePolicy,
}

/// Enabled path families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyConfig {
    /// Fixed pages emitted before the generated families
    pub static_pages: Vec<String>,
    /// `/services/...`
    pub services: bool,
    /// `/brands/...`
    pub brands: bool,
    /// `/industries/...`
    pub industries: bool,
    /// `/repairs/...`
    pub repairs: bool,
}

impl Default for FamilyConfig {
    fn default() -> Self {
        Self {
            static_pages: ["/", "/services", "/brands", "/industries", "/repairs", "/about", "/contact", "/sitemap"]
                .into_iter()
                .map(String::from)
                .collect(),
            services: true,
            brands: true,
            industries: true,
            repairs: true,
        }
    }
}

impl FamilyConfig {
    /// Whether a term family is generated.
    pub fn term_enabled(&self, family: TermFamily) -> bool {
        match family {
            TermFamily::Brands => self.brands,
            TermFamily::Industries => self.industries,
            TermFamily::Repairs => self.repairs,
        }
    }
}

impl SiteConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> RouteResult<Self> {
        let config: SiteConfig = toml::from_str(input)?;
        config.validated()
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> RouteResult<Self> {
        let path = path.as_ref();
        let input = fs::read_to_string(path)
            .map_err(|e| RouteError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&input)
    }

    /// Normalize the base URL and check numeric limits.
    pub fn validated(mut self) -> RouteResult<Self> {
        let trimmed = self.base_url.trim_end_matches('/');
        if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
            return Err(RouteError::Config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        self.base_url = trimmed.to_string();
        if self.sitemap.shard_size == 0 || self.sitemap.shard_size > SITEMAP_PROTOCOL_LIMIT {
            return Err(RouteError::Config(format!(
                "sitemap.shard_size must be between 1 and {SITEMAP_PROTOCOL_LIMIT}, got {}",
                self.sitemap.shard_size
            )));
        }
        if self.listing_page_size == 0 {
            return Err(RouteError::Config("listing_page_size must be positive".to_string()));
        }
        if let Some(bad) = self.families.static_pages.iter().find(|p| !p.starts_with('/')) {
            return Err(RouteError::Config(format!("static page '{bad}' must start with '/'")));
        }
        Ok(self)
    }

    /// Load the configured catalog, or the embedded one.
    pub fn load_catalog(&self) -> RouteResult<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path),
            None => Catalog::embedded(),
        }
    }

    /// Absolute URL of a site path.
    pub fn absolute_url(&self, path: &str) -> String {
        if path == "/" {
            format!("{}/", self.base_url)
        } else {
            format!("{}{}", self.base_url, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.sitemap.shard_size, 20_000);
        assert_eq!(config.decoder.policy, DecodePolicy::LongestMatch);
    }

    #[test]
    fn overrides_are_applied() {
        let config = SiteConfig::from_toml_str(
            r#"
            base_url = "https://cctv.example.in/"

            [sitemap]
            shard_size = 500
            last_modified = "2024-05-01T00:00:00Z"

            [decoder]
            policy = "strict"

            [families]
            repairs = false
            static_pages = ["/"]
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://cctv.example.in");
        assert_eq!(config.sitemap.shard_size, 500);
        assert!(config.sitemap.last_modified.is_some());
        assert_eq!(config.decoder.policy, DecodePolicy::Strict);
        assert!(!config.families.term_enabled(TermFamily::Repairs));
        assert!(config.families.term_enabled(TermFamily::Brands));
        assert_eq!(config.absolute_url("/"), "https://cctv.example.in/");
        assert_eq!(
            config.absolute_url("/services/delhi"),
            "https://cctv.example.in/services/delhi"
        );
    }

    #[test]
    fn decoder_policy_names_are_snake_case() {
        let config = SiteConfig::from_toml_str("[decoder]\npolicy = \"longest_match\"").unwrap();
        assert_eq!(config.decoder.policy, DecodePolicy::LongestMatch);
        assert!(SiteConfig::from_toml_str("[decoder]\npolicy = \"longest-match\"").is_err());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(SiteConfig::from_toml_str("base_url = \"example.com\"").is_err());
        assert!(SiteConfig::from_toml_str("[sitemap]\nshard_size = 0").is_err());
        assert!(SiteConfig::from_toml_str("[sitemap]\nshard_size = 60000").is_err());
        assert!(SiteConfig::from_toml_str("[families]\nstatic_pages = [\"about\"]").is_err());
        assert!(SiteConfig::from_toml_str("base_url = 3").is_err());
    }
}
