// Copyright 2025 Cowboy AI, LLC.

//! Sitemap protocol output.
//!
//! Entries are sharded into `{stem}-{n}.xml` files of at most `shard_size`
//! URLs each, plus a `{stem}.xml` index pointing at every shard.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::SiteConfig;
use crate::enumerate::{ChangeFrequency, UrlEntry};
use crate::errors::{RouteError, RouteResult};

/// Namespace of the sitemap protocol.
pub const SITEMAP_XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// One `<url>` of a sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Absolute URL
    pub url: String,
    /// `lastmod`
    pub last_modified: DateTime<Utc>,
    /// `changefreq`
    pub change_frequency: ChangeFrequency,
    /// `priority`
    pub priority: f32,
}

impl SitemapEntry {
    /// Absolute entry for an enumerated URL.
    pub fn from_url(entry: &UrlEntry, config: &SiteConfig, last_modified: DateTime<Utc>) -> Self {
        Self {
            url: config.absolute_url(&entry.path),
            last_modified,
            change_frequency: entry.change_frequency,
            priority: entry.priority,
        }
    }
}

#[derive(Serialize)]
#[serde(rename = "urlset")]
struct UrlSet<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "url")]
    urls: Vec<UrlElement<'a>>,
}

#[derive(Serialize)]
struct UrlElement<'a> {
    loc: &'a str,
    lastmod: String,
    changefreq: &'static str,
    priority: String,
}

#[derive(Serialize)]
#[serde(rename = "sitemapindex")]
struct SitemapIndex<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "sitemap")]
    sitemaps: Vec<IndexElement<'a>>,
}

#[derive(Serialize)]
struct IndexElement<'a> {
    loc: &'a str,
    lastmod: String,
}

fn w3c_datetime(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn to_xml<T: Serialize>(value: &T) -> RouteResult<String> {
    let body = quick_xml::se::to_string(value).map_err(|e| RouteError::Serialization(e.to_string()))?;
    Ok(format!("{XML_DECLARATION}\n{body}\n"))
}

/// Number of shard files needed for `total` URLs.
pub fn shard_count(total: usize, shard_size: usize) -> usize {
    if shard_size == 0 {
        return 0;
    }
    total.div_ceil(shard_size)
}

/// Render one `<urlset>` document.
pub fn render_urlset(entries: &[SitemapEntry]) -> RouteResult<String> {
    let set = UrlSet {
        xmlns: SITEMAP_XMLNS,
        urls: entries
            .iter()
            .map(|e| UrlElement {
                loc: &e.url,
                lastmod: w3c_datetime(&e.last_modified),
                changefreq: e.change_frequency.as_str(),
                priority: format!("{:.1}", e.priority),
            })
            .collect(),
    };
    to_xml(&set)
}

/// Render a `<sitemapindex>` over absolute shard URLs.
pub fn render_index(shard_urls: &[String], last_modified: DateTime<Utc>) -> RouteResult<String> {
    let lastmod = w3c_datetime(&last_modified);
    let index = SitemapIndex {
        xmlns: SITEMAP_XMLNS,
        sitemaps: shard_urls
            .iter()
            .map(|loc| IndexElement {
                loc,
                lastmod: lastmod.clone(),
            })
            .collect(),
    };
    to_xml(&index)
}

/// Files produced by [`write_sitemaps`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapFiles {
    /// The index file
    pub index: PathBuf,
    /// Shard files in order
    pub shards: Vec<PathBuf>,
    /// URLs written over all shards
    pub url_count: usize,
}

/// Write sharded sitemaps and their index into `dir`.
///
/// `lastmod` is the configured timestamp, or `now` when none is configured.
pub fn write_sitemaps(
    dir: impl AsRef<Path>,
    entries: impl IntoIterator<Item = UrlEntry>,
    config: &SiteConfig,
    now: DateTime<Utc>,
) -> RouteResult<SitemapFiles> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| RouteError::Io(format!("{}: {e}", dir.display())))?;
    let last_modified = config.sitemap.last_modified.unwrap_or(now);
    let shard_size = config.sitemap.shard_size.max(1);
    let stem = &config.sitemap.file_stem;

    let mut shards = Vec::new();
    let mut shard_urls = Vec::new();
    let mut url_count = 0;
    let mut buffer: Vec<SitemapEntry> = Vec::with_capacity(shard_size);

    let mut flush = |buffer: &mut Vec<SitemapEntry>| -> RouteResult<()> {
        let n = shards.len() + 1;
        let name = format!("{stem}-{n}.xml");
        let path = dir.join(&name);
        write_file(&path, &render_urlset(buffer)?)?;
        debug!(file = %path.display(), urls = buffer.len(), "sitemap shard written");
        url_count += buffer.len();
        shard_urls.push(config.absolute_url(&format!("/{name}")));
        shards.push(path);
        buffer.clear();
        Ok(())
    };

    for entry in entries {
        buffer.push(SitemapEntry::from_url(&entry, config, last_modified));
        if buffer.len() == shard_size {
            flush(&mut buffer)?;
        }
    }
    if !buffer.is_empty() {
        flush(&mut buffer)?;
    }

    let index = dir.join(format!("{stem}.xml"));
    write_file(&index, &render_index(&shard_urls, last_modified)?)?;
    info!(
        dir = %dir.display(),
        shards = shards.len(),
        urls = url_count,
        "sitemaps written"
    );
    Ok(SitemapFiles {
        index,
        shards,
        url_count,
    })
}

fn write_file(path: &Path, contents: &str) -> RouteResult<()> {
    fs::write(path, contents).map_err(|e| RouteError::Io(format!("{}: {e}", path.display())))
}
