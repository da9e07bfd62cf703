// Copyright 2025 Cowboy AI, LLC.

//! URL enumeration over the catalog cross-product.
//!
//! The walk is lazy and restartable: every call to [`UrlEnumerator::iter`]
//! starts over and yields the same sequence for the same catalog. The nesting
//! is fixed (cities, then their localities, then services), which is what page
//! boundaries of the browsable listing rely on. Paths are de-duplicated by exact
//! string equality as they are produced.

use std::collections::HashSet;
use std::iter;

use serde::{Deserialize, Serialize};

use crate::canonical::{CanonicalPath, PathLevel};
use crate::catalog::{Catalog, TermFamily};
use crate::config::FamilyConfig;

/// Sitemap `changefreq` values used by the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    /// `daily`
    Daily,
    /// `weekly`
    Weekly,
    /// `monthly`
    Monthly,
    /// `yearly`
    Yearly,
}

impl ChangeFrequency {
    /// Protocol spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
        }
    }
}

/// Which part of the URL space an entry comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteFamily {
    /// Configured fixed pages
    Static,
    /// `/services/...`
    Services,
    /// `/brands/...`
    Brands,
    /// `/industries/...`
    Industries,
    /// `/repairs/...`
    Repairs,
}

impl From<TermFamily> for RouteFamily {
    fn from(family: TermFamily) -> Self {
        match family {
            TermFamily::Brands => RouteFamily::Brands,
            TermFamily::Industries => RouteFamily::Industries,
            TermFamily::Repairs => RouteFamily::Repairs,
        }
    }
}

/// One enumerated URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlEntry {
    /// Site-relative path
    pub path: String,
    /// Sitemap priority in `0.0..=1.0`
    pub priority: f32,
    /// Sitemap change frequency
    pub change_frequency: ChangeFrequency,
    /// Originating family
    pub family: RouteFamily,
}

impl UrlEntry {
    /// Entry for a generated canonical path.
    pub fn canonical(path: &CanonicalPath) -> Self {
        let (priority, change_frequency) = match path.level() {
            PathLevel::City => (0.8, ChangeFrequency::Weekly),
            PathLevel::Locality => (0.7, ChangeFrequency::Weekly),
            PathLevel::Service => (0.6, ChangeFrequency::Monthly),
            PathLevel::Term => (0.7, ChangeFrequency::Weekly),
            PathLevel::TermCity => (0.6, ChangeFrequency::Monthly),
            PathLevel::TermLocality => (0.5, ChangeFrequency::Monthly),
        };
        let family = match path {
            CanonicalPath::City { .. } | CanonicalPath::Locality { .. } | CanonicalPath::Service { .. } => {
                RouteFamily::Services
            }
            CanonicalPath::Term { family, .. }
            | CanonicalPath::TermCity { family, .. }
            | CanonicalPath::TermLocality { family, .. } => RouteFamily::from(*family),
        };
        Self {
            path: path.to_string(),
            priority,
            change_frequency,
            family,
        }
    }

    /// Entry for a configured fixed page.
    pub fn static_page(path: &str) -> Self {
        let (priority, change_frequency) = if path == "/" {
            (1.0, ChangeFrequency::Daily)
        } else {
            (0.5, ChangeFrequency::Monthly)
        };
        Self {
            path: path.to_string(),
            priority,
            change_frequency,
            family: RouteFamily::Static,
        }
    }
}

/// Per-family URL counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FamilyCounts {
    /// Fixed pages
    pub static_pages: usize,
    /// `/services/...`
    pub services: usize,
    /// `/brands/...`
    pub brands: usize,
    /// `/industries/...`
    pub industries: usize,
    /// `/repairs/...`
    pub repairs: usize,
}

impl FamilyCounts {
    /// Closed-form counts for a catalog.
    ///
    /// Services: `C + ΣL + ΣL·S`. Each term family: `T + T·C + T·ΣL`. Static
    /// pages count once each. Assumes no configured static page coincides with a
    /// generated path.
    pub fn expected(catalog: &Catalog, families: &FamilyConfig) -> Self {
        let cities = catalog.cities().len();
        let localities = catalog.locality_count();
        let services = catalog.services().len();
        let term = |family: TermFamily| {
            if families.term_enabled(family) {
                let t = catalog.term_count(family);
                t + t * cities + t * localities
            } else {
                0
            }
        };
        let static_pages: HashSet<&str> = families.static_pages.iter().map(String::as_str).collect();
        Self {
            static_pages: static_pages.len(),
            services: if families.services {
                cities + localities + localities * services
            } else {
                0
            },
            brands: term(TermFamily::Brands),
            industries: term(TermFamily::Industries),
            repairs: term(TermFamily::Repairs),
        }
    }

    /// Tally entries by family.
    pub fn observed<'a>(entries: impl IntoIterator<Item = &'a UrlEntry>) -> Self {
        let mut counts = Self::default();
        for entry in entries {
            counts.add(entry.family);
        }
        counts
    }

    fn add(&mut self, family: RouteFamily) {
        match family {
            RouteFamily::Static => self.static_pages += 1,
            RouteFamily::Services => self.services += 1,
            RouteFamily::Brands => self.brands += 1,
            RouteFamily::Industries => self.industries += 1,
            RouteFamily::Repairs => self.repairs += 1,
        }
    }

    /// Sum over all families.
    pub fn total(&self) -> usize {
        self.static_pages + self.services + self.brands + self.industries + self.repairs
    }
}

/// One page of the browsable URL listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlPage {
    /// 1-based page number
    pub page: usize,
    /// Entries per page
    pub per_page: usize,
    /// Total entries over all pages
    pub total: usize,
    /// Number of pages
    pub page_count: usize,
    /// Entries of this page
    pub entries: Vec<UrlEntry>,
}

/// Number of pages needed for `total` items.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page).max(1)
}

type EntryIter<'c> = Box<dyn Iterator<Item = UrlEntry> + 'c>;

/// Walks the whole URL space of a catalog.
#[derive(Debug, Clone)]
pub struct UrlEnumerator<'c> {
    catalog: &'c Catalog,
    families: FamilyConfig,
}

impl<'c> UrlEnumerator<'c> {
    /// Enumerator over the given families.
    pub fn new(catalog: &'c Catalog, families: &FamilyConfig) -> Self {
        Self {
            catalog,
            families: families.clone(),
        }
    }

    /// Enumerator over every family with the default static pages.
    pub fn all(catalog: &'c Catalog) -> Self {
        Self::new(catalog, &FamilyConfig::default())
    }

    /// Lazily yield every distinct URL entry in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = UrlEntry> + 'c {
        let mut seen: HashSet<String> = HashSet::new();
        self.raw().filter(move |entry| seen.insert(entry.path.clone()))
    }

    /// Number of distinct URLs.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Per-family counts of the distinct URLs.
    pub fn counts(&self) -> FamilyCounts {
        let mut counts = FamilyCounts::default();
        for entry in self.iter() {
            counts.add(entry.family);
        }
        counts
    }

    /// Page `page` (1-based) of the listing; `None` when out of range.
    pub fn page(&self, page: usize, per_page: usize) -> Option<UrlPage> {
        let total = self.count();
        let pages = page_count(total, per_page);
        if page == 0 || page > pages {
            return None;
        }
        let entries = self.iter().skip((page - 1) * per_page).take(per_page).collect();
        Some(UrlPage {
            page,
            per_page,
            total,
            page_count: pages,
            entries,
        })
    }

    fn raw(&self) -> EntryIter<'c> {
        let statics: Vec<UrlEntry> = self
            .families
            .static_pages
            .iter()
            .map(|p| UrlEntry::static_page(p))
            .collect();
        let mut out: EntryIter<'c> = Box::new(statics.into_iter());
        if self.families.services {
            out = Box::new(out.chain(self.services()));
        }
        for family in TermFamily::ALL {
            if self.families.term_enabled(family) {
                out = Box::new(out.chain(self.terms(family)));
            }
        }
        out
    }

    fn services(&self) -> EntryIter<'c> {
        let catalog = self.catalog;
        Box::new(catalog.cities().iter().flat_map(move |city| {
            iter::once(CanonicalPath::city(city))
                .chain(city.scopes().flat_map(move |scope| {
                    iter::once(CanonicalPath::locality(scope)).chain(
                        catalog
                            .services()
                            .iter()
                            .map(move |service| CanonicalPath::service(scope, service)),
                    )
                }))
                .map(|path| UrlEntry::canonical(&path))
        }))
    }

    fn terms(&self, family: TermFamily) -> EntryIter<'c> {
        let catalog = self.catalog;
        Box::new(catalog.terms(family).into_iter().flat_map(move |term| {
            iter::once(CanonicalPath::term(term))
                .chain(catalog.cities().iter().flat_map(move |city| {
                    iter::once(CanonicalPath::term_city(term, city))
                        .chain(city.scopes().map(move |scope| CanonicalPath::term_locality(term, scope)))
                }))
                .map(|path| UrlEntry::canonical(&path))
        }))
    }
}
