// Copyright 2025 Cowboy AI, LLC.

//! Inbound request handling.
//!
//! [`RedirectResolver`] is the middleware decision: recognize a deprecated path
//! shape and answer with a 301 to its canonical form, or pass the request
//! through. [`RequestRouter`] is the page-level decision built on top of it.

use std::cmp::Reverse;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::canonical::{CanonicalPath, ResolvedRoute, SERVICES_SEGMENT};
use crate::catalog::{Catalog, City, Namespace};
use crate::config::SiteConfig;
use crate::legacy::{DecodePolicy, LegacyDecoder, IN_INFIX};
use crate::slug::is_slug;
use crate::tuple::{IdentifierTuple, LocalityScope};

/// Segment opening the retired `/service/{location}/{service}` layout.
pub const LEGACY_SERVICE_SEGMENT: &str = "service";

/// HTTP status of a permanent redirect.
pub const MOVED_PERMANENTLY: u16 = 301;

/// Outcome of the redirect middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Resolution {
    /// Answer with `Location: location`
    Redirect {
        /// Canonical path to redirect to
        location: String,
        /// HTTP status
        status: u16,
    },
    /// Let normal routing handle the request
    Passthrough,
}

impl Resolution {
    fn redirect(path: CanonicalPath) -> Self {
        Resolution::Redirect {
            location: path.to_string(),
            status: MOVED_PERMANENTLY,
        }
    }
}

/// Strip query string, fragment and trailing slash.
pub fn normalize_request_path(raw: &str) -> &str {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let path = &raw[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Redirect middleware bound to one catalog.
pub struct RedirectResolver<'c> {
    catalog: &'c Catalog,
    decoder: LegacyDecoder<'c>,
    cities_longest_first: Vec<(&'c str, &'c City)>,
}

impl<'c> RedirectResolver<'c> {
    /// Resolver with the default decoding policy.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self::with_policy(catalog, DecodePolicy::default())
    }

    /// Resolver with an explicit decoding policy.
    pub fn with_policy(catalog: &'c Catalog, policy: DecodePolicy) -> Self {
        let mut cities_longest_first: Vec<(&'c str, &'c City)> = catalog
            .slugs(Namespace::City)
            .into_iter()
            .zip(catalog.cities())
            .collect();
        cities_longest_first.sort_by_key(|(slug, _)| Reverse(slug.len()));
        Self {
            catalog,
            decoder: LegacyDecoder::with_policy(catalog, policy),
            cities_longest_first,
        }
    }

    /// The decoder used for flat slugs.
    pub fn decoder(&self) -> &LegacyDecoder<'c> {
        &self.decoder
    }

    /// Decide what to do with one inbound request path.
    pub fn resolve(&self, raw: &str) -> Resolution {
        let path = normalize_request_path(raw);
        let segs = segments(path);

        if let Some(tuple) = self.segmented(&segs) {
            let target = CanonicalPath::for_tuple(&tuple);
            debug!(path, target = %target, "segmented legacy path");
            return Resolution::redirect(target);
        }
        if let Some(last) = segs.last() {
            if let Some(decoded) = self.decoder.decode(last) {
                let target = decoded.canonical_path();
                debug!(path, shape = %decoded.shape, target = %target, "flat legacy slug");
                return Resolution::redirect(target);
            }
        }
        debug!(path, "passthrough");
        Resolution::Passthrough
    }

    /// Whether the path has the layout of a retired URL scheme, decodable or not.
    pub fn is_legacy_shape(&self, raw: &str) -> bool {
        let segs = segments(normalize_request_path(raw));
        match segs.as_slice() {
            [LEGACY_SERVICE_SEGMENT, _, _] => true,
            [SERVICES_SEGMENT, first, _] => self.catalog.find_city(first).is_none(),
            [single] => is_slug(single) && single.contains(IN_INFIX),
            _ => false,
        }
    }

    fn segmented(&self, segs: &[&str]) -> Option<IdentifierTuple<'c>> {
        let (location, service) = match segs {
            [LEGACY_SERVICE_SEGMENT, location, service] => (*location, *service),
            [SERVICES_SEGMENT, service, location] if self.catalog.find_city(service).is_none() => {
                (*location, *service)
            }
            _ => return None,
        };
        let service = self.catalog.find_service(service)?;
        let scope = self.location(location)?;
        Some(IdentifierTuple::in_scope(scope, service))
    }

    /// `{locality}-{city}` with the longest city first, else a bare locality.
    fn location(&self, location: &str) -> Option<LocalityScope<'c>> {
        for &(city_slug, city) in &self.cities_longest_first {
            let Some(locality) = location
                .strip_suffix(city_slug)
                .and_then(|rest| rest.strip_suffix('-'))
            else {
                continue;
            };
            if let Some(found) = self.catalog.find_locality(city, locality) {
                return LocalityScope::new(city, found).ok();
            }
        }
        let (city, locality) = self.catalog.localities_named(location).into_iter().next()?;
        LocalityScope::new(city, locality).ok()
    }
}

/// What a page request renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page<'c> {
    /// A configured fixed page
    Static(&'c str),
    /// A canonical catalog page
    Route(ResolvedRoute<'c>),
}

/// Page-level answer to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteResponse<'c> {
    /// Render a page (200)
    Page(Page<'c>),
    /// Permanent redirect (301)
    Redirect {
        /// Canonical path
        location: String,
    },
    /// Retired legacy URL (410)
    Gone,
    /// Unknown path (404)
    NotFound,
}

impl RouteResponse<'_> {
    /// HTTP status code.
    pub fn status(&self) -> u16 {
        match self {
            RouteResponse::Page(_) => 200,
            RouteResponse::Redirect { .. } => MOVED_PERMANENTLY,
            RouteResponse::Gone => 410,
            RouteResponse::NotFound => 404,
        }
    }
}

impl fmt::Display for RouteResponse<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteResponse::Page(Page::Static(path)) => write!(f, "200 static page {path}"),
            RouteResponse::Page(Page::Route(route)) => write!(f, "200 {}", route.canonical_path()),
            RouteResponse::Redirect { location } => write!(f, "301 -> {location}"),
            RouteResponse::Gone => f.write_str("410 gone"),
            RouteResponse::NotFound => f.write_str("404 not found"),
        }
    }
}

/// Full request routing: pages, redirects, retired and unknown URLs.
pub struct RequestRouter<'c> {
    catalog: &'c Catalog,
    static_pages: &'c [String],
    resolver: RedirectResolver<'c>,
}

impl<'c> RequestRouter<'c> {
    /// Router using the configured static pages and decoding policy.
    pub fn new(catalog: &'c Catalog, config: &'c SiteConfig) -> Self {
        Self {
            catalog,
            static_pages: &config.families.static_pages,
            resolver: RedirectResolver::with_policy(catalog, config.decoder.policy),
        }
    }

    /// The redirect middleware.
    pub fn resolver(&self) -> &RedirectResolver<'c> {
        &self.resolver
    }

    /// Answer one request path.
    pub fn respond(&self, raw: &str) -> RouteResponse<'c> {
        let path = normalize_request_path(raw);
        if let Some(page) = self.static_pages.iter().find(|p| p.as_str() == path) {
            return RouteResponse::Page(Page::Static(page.as_str()));
        }
        if let Some(route) = CanonicalPath::parse(path).ok().and_then(|p| p.resolve(self.catalog)) {
            return RouteResponse::Page(Page::Route(route));
        }
        let response = match self.resolver.resolve(path) {
            Resolution::Redirect { location, .. } => RouteResponse::Redirect { location },
            Resolution::Passthrough if self.resolver.is_legacy_shape(path) => RouteResponse::Gone,
            Resolution::Passthrough => RouteResponse::NotFound,
        };
        debug!(path, status = response.status(), "routed");
        response
    }
}
