// Copyright 2025 Cowboy AI, LLC.

//! # urlspace
//!
//! URL-space generation and slug resolution for a local-service site.
//!
//! A read-only [`Catalog`] of cities, their localities, services and the flat
//! brand/industry/repair taxonomies defines every page the site can serve:
//! - **Slugs**: one normalization function, [`slugify`], used everywhere
//! - **Canonical paths**: hierarchical `/services/{city}/{locality}/{service}`
//!   and `/{family}/{term}/{city}/{locality}` shapes
//! - **Legacy slugs**: flat `{service}-in-{locality}-{city}` strings decoded
//!   back into identifier tuples by matching against the catalog
//! - **Enumeration**: the lazy cross-product feeding sitemaps and listings
//! - **Resolution**: 301 redirects from retired shapes, 404/410 otherwise
//!
//! ```
//! use urlspace::{slugify, Catalog, LegacyDecoder};
//!
//! assert_eq!(slugify("Greater Noida"), "greater-noida");
//!
//! let catalog = Catalog::builder()
//!     .city("Greater Noida", ["Sector 1"])
//!     .service("CCTV Repair")
//!     .build()
//!     .unwrap();
//! let decoded = LegacyDecoder::new(&catalog)
//!     .decode("cctv-repair-in-sector-1-greater-noida")
//!     .unwrap();
//! assert_eq!(
//!     decoded.canonical_path().to_string(),
//!     "/services/greater-noida/sector-1/cctv-repair"
//! );
//! ```
//!
//! ## Design Principles
//!
//! 1. **Immutable snapshot**: the catalog is validated once and shared by reference
//! 2. **Canonical first**: every other shape redirects to the hierarchical path
//! 3. **Checked tuples**: a locality can only be paired with its own city
//! 4. **Total decoding**: arbitrary input yields `None`, never a panic

#![warn(missing_docs)]

pub mod canonical;
pub mod catalog;
pub mod config;
pub mod content;
pub mod enumerate;
mod errors;
pub mod legacy;
pub mod resolver;
pub mod sitemap;
mod slug;
mod tuple;

pub use canonical::{build_canonical_path, CanonicalPath, PathLevel, ResolvedRoute};
pub use catalog::{
    Brand, Catalog, CatalogEntry, CatalogFile, CatalogLint, CatalogStats, City, Industry, Locality, Named,
    Namespace, RepairIssue, Service, Term, TermFamily,
};
pub use config::SiteConfig;
pub use content::{ContentProvider, PageHeadline, StaticContent};
pub use enumerate::{ChangeFrequency, FamilyCounts, RouteFamily, UrlEntry, UrlEnumerator, UrlPage};
pub use errors::{RouteError, RouteResult};
pub use legacy::{encode, DecodePolicy, DecodedTuple, LegacyDecoder, LegacyShape};
pub use resolver::{Page, RedirectResolver, RequestRouter, Resolution, RouteResponse};
pub use sitemap::{write_sitemaps, SitemapEntry, SitemapFiles};
pub use slug::{is_slug, slugify, Slug};
pub use tuple::{IdentifierTuple, LocalityScope};
