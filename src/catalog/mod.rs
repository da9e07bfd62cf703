// Copyright 2025 Cowboy AI, LLC.

//! Catalog store: the immutable reference data every URL is generated from.
//!
//! A [`Catalog`] holds the ordered cities (each owning its ordered localities),
//! the flat service list and the three flat term taxonomies (brands, industries,
//! repair issues). It is built once through [`CatalogBuilder`] and then only read,
//! so a single instance can be shared by reference across any number of threads.
//!
//! Slugs are never stored next to the names they come from. The slug indexes are
//! derived from display names while building and cannot drift from them.

mod builder;
mod lint;

use std::fmt::{self, Display, Formatter};

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{RouteError, RouteResult};
use crate::slug::slugify;

pub use builder::{CatalogBuilder, CatalogFile, CityRecord, ServiceRecord};
pub use lint::CatalogLint;

/// Lookup namespaces of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// Cities
    City,
    /// Localities (scoped to a city)
    Locality,
    /// Services
    Service,
    /// Camera brands
    Brand,
    /// Industries served
    Industry,
    /// Repair issues
    RepairIssue,
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Namespace::City => "city",
            Namespace::Locality => "locality",
            Namespace::Service => "service",
            Namespace::Brand => "brand",
            Namespace::Industry => "industry",
            Namespace::RepairIssue => "repair issue",
        })
    }
}

/// The three flat taxonomies that get their own path family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TermFamily {
    /// `/brands/...`
    Brands,
    /// `/industries/...`
    Industries,
    /// `/repairs/...`
    Repairs,
}

impl TermFamily {
    /// All term families in enumeration order.
    pub const ALL: [TermFamily; 3] = [TermFamily::Brands, TermFamily::Industries, TermFamily::Repairs];

    /// First path segment of the family.
    pub fn segment(self) -> &'static str {
        match self {
            TermFamily::Brands => "brands",
            TermFamily::Industries => "industries",
            TermFamily::Repairs => "repairs",
        }
    }

    /// Parse a first path segment into a term family.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "brands" => Some(TermFamily::Brands),
            "industries" => Some(TermFamily::Industries),
            "repairs" => Some(TermFamily::Repairs),
            _ => None,
        }
    }

    /// Catalog namespace holding the family's terms.
    pub fn namespace(self) -> Namespace {
        match self {
            TermFamily::Brands => Namespace::Brand,
            TermFamily::Industries => Namespace::Industry,
            TermFamily::Repairs => Namespace::RepairIssue,
        }
    }
}

/// Anything identified by a display name.
pub trait Named {
    /// Display name, the identity of the entry.
    fn name(&self) -> &str;

    /// Slug derived from the display name.
    fn slug(&self) -> String {
        slugify(self.name())
    }
}

/// A city and its ordered localities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    name: String,
    localities: Vec<Locality>,
}

impl City {
    /// Localities in catalog order.
    pub fn localities(&self) -> &[Locality] {
        &self.localities
    }
}

impl Named for City {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A locality, owned by exactly one city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locality {
    name: String,
    city: String,
}

impl Locality {
    /// Display name of the owning city.
    pub fn city_name(&self) -> &str {
        &self.city
    }

    /// True when `city` is the owner of this locality.
    pub fn belongs_to(&self, city: &City) -> bool {
        self.city == city.name
    }
}

impl Named for Locality {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A service offered in every locality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    name: String,
    category: Option<String>,
}

impl Service {
    /// Display-only grouping tag.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl Named for Service {
    fn name(&self) -> &str {
        &self.name
    }
}

macro_rules! term_entity {
    ($(#[$meta:meta])* $ty:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $ty {
            name: String,
        }

        impl Named for $ty {
            fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

term_entity!(
    /// A camera brand.
    Brand
);
term_entity!(
    /// An industry vertical.
    Industry
);
term_entity!(
    /// A repair issue.
    RepairIssue
);

/// A borrowed brand, industry or repair issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term<'c> {
    /// Brand term
    Brand(&'c Brand),
    /// Industry term
    Industry(&'c Industry),
    /// Repair issue term
    Repair(&'c RepairIssue),
}

impl Term<'_> {
    /// Path family the term belongs to.
    pub fn family(&self) -> TermFamily {
        match self {
            Term::Brand(_) => TermFamily::Brands,
            Term::Industry(_) => TermFamily::Industries,
            Term::Repair(_) => TermFamily::Repairs,
        }
    }
}

impl Named for Term<'_> {
    fn name(&self) -> &str {
        match self {
            Term::Brand(b) => b.name(),
            Term::Industry(i) => i.name(),
            Term::Repair(r) => r.name(),
        }
    }
}

/// Result of a namespace lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEntry<'c> {
    /// A city
    City(&'c City),
    /// A locality together with its owning city
    Locality(&'c City, &'c Locality),
    /// A service
    Service(&'c Service),
    /// A brand, industry or repair issue
    Term(Term<'c>),
}

impl CatalogEntry<'_> {
    /// Display name of the entry.
    pub fn name(&self) -> &str {
        match self {
            CatalogEntry::City(c) => c.name(),
            CatalogEntry::Locality(_, l) => l.name(),
            CatalogEntry::Service(s) => s.name(),
            CatalogEntry::Term(t) => t.name(),
        }
    }
}

/// Entry counts per namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    /// Number of cities
    pub cities: usize,
    /// Number of localities across all cities
    pub localities: usize,
    /// Number of services
    pub services: usize,
    /// Number of brands
    pub brands: usize,
    /// Number of industries
    pub industries: usize,
    /// Number of repair issues
    pub repair_issues: usize,
}

/// Immutable catalog snapshot.
#[derive(Debug, Clone)]
pub struct Catalog {
    cities: Vec<City>,
    services: Vec<Service>,
    brands: Vec<Brand>,
    industries: Vec<Industry>,
    repair_issues: Vec<RepairIssue>,
    city_index: IndexMap<String, usize>,
    locality_index: Vec<IndexMap<String, usize>>,
    service_index: IndexMap<String, usize>,
    brand_index: IndexMap<String, usize>,
    industry_index: IndexMap<String, usize>,
    repair_index: IndexMap<String, usize>,
    lints: Vec<CatalogLint>,
}

const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

impl Catalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// The Delhi NCR catalog compiled into the crate.
    pub fn embedded() -> RouteResult<Self> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    /// Cities in catalog order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Localities of the city with slug `city_slug`.
    pub fn localities(&self, city_slug: &str) -> RouteResult<&[Locality]> {
        self.find_city(city_slug)
            .map(City::localities)
            .ok_or_else(|| RouteError::not_found(Namespace::City, city_slug))
    }

    /// Localities of a city, treating an unknown city as having none.
    pub fn localities_or_empty(&self, city_slug: &str) -> &[Locality] {
        self.localities(city_slug).unwrap_or(&[])
    }

    /// Services in catalog order.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Brands in catalog order.
    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    /// Industries in catalog order.
    pub fn industries(&self) -> &[Industry] {
        &self.industries
    }

    /// Repair issues in catalog order.
    pub fn repair_issues(&self) -> &[RepairIssue] {
        &self.repair_issues
    }

    /// Terms of a family in catalog order.
    pub fn terms(&self, family: TermFamily) -> Vec<Term<'_>> {
        match family {
            TermFamily::Brands => self.brands.iter().map(Term::Brand).collect(),
            TermFamily::Industries => self.industries.iter().map(Term::Industry).collect(),
            TermFamily::Repairs => self.repair_issues.iter().map(Term::Repair).collect(),
        }
    }

    /// Number of terms in a family.
    pub fn term_count(&self, family: TermFamily) -> usize {
        match family {
            TermFamily::Brands => self.brands.len(),
            TermFamily::Industries => self.industries.len(),
            TermFamily::Repairs => self.repair_issues.len(),
        }
    }

    /// Total localities over all cities.
    pub fn locality_count(&self) -> usize {
        self.cities.iter().map(|c| c.localities.len()).sum()
    }

    /// Iterate `(city, locality)` pairs in nested catalog order.
    pub fn pairs(&self) -> impl Iterator<Item = (&City, &Locality)> + '_ {
        self.cities
            .iter()
            .flat_map(|city| city.localities.iter().map(move |loc| (city, loc)))
    }

    /// Entry counts per namespace.
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            cities: self.cities.len(),
            localities: self.locality_count(),
            services: self.services.len(),
            brands: self.brands.len(),
            industries: self.industries.len(),
            repair_issues: self.repair_issues.len(),
        }
    }

    /// Ambiguity hazards detected while building.
    pub fn lints(&self) -> &[CatalogLint] {
        &self.lints
    }

    /// City with the given slug.
    pub fn find_city(&self, slug: &str) -> Option<&City> {
        self.city_index.get(slug).map(|&i| &self.cities[i])
    }

    /// Locality of `city` with the given slug.
    pub fn find_locality<'c>(&'c self, city: &'c City, slug: &str) -> Option<&'c Locality> {
        let ci = self.city_index.get(city.slug().as_str())?;
        self.locality_index[*ci]
            .get(slug)
            .map(|&li| &self.cities[*ci].localities[li])
    }

    /// Service with the given slug.
    pub fn find_service(&self, slug: &str) -> Option<&Service> {
        self.service_index.get(slug).map(|&i| &self.services[i])
    }

    /// Term of a family with the given slug.
    pub fn find_term(&self, family: TermFamily, slug: &str) -> Option<Term<'_>> {
        match family {
            TermFamily::Brands => self.brand_index.get(slug).map(|&i| Term::Brand(&self.brands[i])),
            TermFamily::Industries => self
                .industry_index
                .get(slug)
                .map(|&i| Term::Industry(&self.industries[i])),
            TermFamily::Repairs => self
                .repair_index
                .get(slug)
                .map(|&i| Term::Repair(&self.repair_issues[i])),
        }
    }

    /// Namespace lookup by slug.
    ///
    /// Equivalent to scanning the namespace in catalog order and returning the
    /// first entry whose `slugify(name)` equals `slug`. Locality lookups that are
    /// not scoped to a city return the first city (in catalog order) that owns a
    /// matching locality.
    pub fn find_by_slug(&self, namespace: Namespace, slug: &str) -> Option<CatalogEntry<'_>> {
        match namespace {
            Namespace::City => self.find_city(slug).map(CatalogEntry::City),
            Namespace::Locality => self.cities.iter().enumerate().find_map(|(ci, city)| {
                self.locality_index[ci]
                    .get(slug)
                    .map(|&li| CatalogEntry::Locality(city, &city.localities[li]))
            }),
            Namespace::Service => self.find_service(slug).map(CatalogEntry::Service),
            Namespace::Brand => self.find_term(TermFamily::Brands, slug).map(CatalogEntry::Term),
            Namespace::Industry => self
                .find_term(TermFamily::Industries, slug)
                .map(CatalogEntry::Term),
            Namespace::RepairIssue => self
                .find_term(TermFamily::Repairs, slug)
                .map(CatalogEntry::Term),
        }
    }

    /// Like [`Catalog::find_by_slug`] but reports a miss as [`RouteError::NotFound`].
    pub fn require(&self, namespace: Namespace, slug: &str) -> RouteResult<CatalogEntry<'_>> {
        self.find_by_slug(namespace, slug)
            .ok_or_else(|| RouteError::not_found(namespace, slug))
    }

    /// Every `(city, locality)` pair whose locality slug is `slug`, in catalog order.
    pub fn localities_named(&self, slug: &str) -> Vec<(&City, &Locality)> {
        self.cities
            .iter()
            .enumerate()
            .filter_map(|(ci, city)| {
                self.locality_index[ci]
                    .get(slug)
                    .map(|&li| (city, &city.localities[li]))
            })
            .collect()
    }

    /// Slugs of a namespace in catalog order (localities across all cities).
    pub fn slugs(&self, namespace: Namespace) -> Vec<&str> {
        match namespace {
            Namespace::City => self.city_index.keys().map(String::as_str).collect(),
            Namespace::Locality => self
                .locality_index
                .iter()
                .flat_map(|idx| idx.keys().map(String::as_str))
                .collect(),
            Namespace::Service => self.service_index.keys().map(String::as_str).collect(),
            Namespace::Brand => self.brand_index.keys().map(String::as_str).collect(),
            Namespace::Industry => self.industry_index.keys().map(String::as_str).collect(),
            Namespace::RepairIssue => self.repair_index.keys().map(String::as_str).collect(),
        }
    }

    /// Locality slugs of the city at position `city_index`, in catalog order.
    pub(crate) fn locality_slugs(&self, city_index: usize) -> impl Iterator<Item = &str> + '_ {
        self.locality_index[city_index].keys().map(String::as_str)
    }
}
