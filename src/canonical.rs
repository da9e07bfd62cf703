// Copyright 2025 Cowboy AI, LLC.

//! Canonical hierarchical paths.
//!
//! Canonical paths are the single authoritative address of a page. The `/`
//! separator never occurs inside a slug, so every segment is unambiguous:
//!
//! ```text
//! /services/{city}
//! /services/{city}/{locality}
//! /services/{city}/{locality}/{service}
//! /{brands|industries|repairs}/{term}
//! /{brands|industries|repairs}/{term}/{city}
//! /{brands|industries|repairs}/{term}/{city}/{locality}
//! ```
//!
//! Rendering is a pure function of the slugs, so equal tuples always produce
//! byte-identical paths.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, City, Named, Service, Term, TermFamily};
use crate::errors::{RouteError, RouteResult};
use crate::slug::Slug;
use crate::tuple::{IdentifierTuple, LocalityScope};

/// First segment of the services family.
pub const SERVICES_SEGMENT: &str = "services";

/// Depth of a canonical path within its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathLevel {
    /// `/services/{city}`
    City,
    /// `/services/{city}/{locality}`
    Locality,
    /// `/services/{city}/{locality}/{service}`
    Service,
    /// `/{family}/{term}`
    Term,
    /// `/{family}/{term}/{city}`
    TermCity,
    /// `/{family}/{term}/{city}/{locality}`
    TermLocality,
}

/// A parsed or built canonical path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum CanonicalPath {
    /// City landing page
    City {
        /// City slug
        city: Slug,
    },
    /// Locality landing page
    Locality {
        /// City slug
        city: Slug,
        /// Locality slug
        locality: Slug,
    },
    /// Service-in-locality page
    Service {
        /// City slug
        city: Slug,
        /// Locality slug
        locality: Slug,
        /// Service slug
        service: Slug,
    },
    /// Term landing page
    Term {
        /// Term family
        family: TermFamily,
        /// Term slug
        term: Slug,
    },
    /// Term in a city
    TermCity {
        /// Term family
        family: TermFamily,
        /// Term slug
        term: Slug,
        /// City slug
        city: Slug,
    },
    /// Term in a locality
    TermLocality {
        /// Term family
        family: TermFamily,
        /// Term slug
        term: Slug,
        /// City slug
        city: Slug,
        /// Locality slug
        locality: Slug,
    },
}

impl CanonicalPath {
    /// Path of a city landing page.
    pub fn city(city: &City) -> Self {
        Self::City {
            city: Slug::derived(city.name()),
        }
    }

    /// Path of a locality landing page.
    pub fn locality(scope: LocalityScope<'_>) -> Self {
        Self::Locality {
            city: Slug::derived(scope.city().name()),
            locality: Slug::derived(scope.locality().name()),
        }
    }

    /// Path of a service page in a locality.
    pub fn service(scope: LocalityScope<'_>, service: &Service) -> Self {
        Self::Service {
            city: Slug::derived(scope.city().name()),
            locality: Slug::derived(scope.locality().name()),
            service: Slug::derived(service.name()),
        }
    }

    /// Path of a term landing page.
    pub fn term(term: Term<'_>) -> Self {
        Self::Term {
            family: term.family(),
            term: Slug::derived(term.name()),
        }
    }

    /// Path of a term page in a city.
    pub fn term_city(term: Term<'_>, city: &City) -> Self {
        Self::TermCity {
            family: term.family(),
            term: Slug::derived(term.name()),
            city: Slug::derived(city.name()),
        }
    }

    /// Path of a term page in a locality.
    pub fn term_locality(term: Term<'_>, scope: LocalityScope<'_>) -> Self {
        Self::TermLocality {
            family: term.family(),
            term: Slug::derived(term.name()),
            city: Slug::derived(scope.city().name()),
            locality: Slug::derived(scope.locality().name()),
        }
    }

    /// Canonical path of a tuple: the term sibling shape when the tuple carries
    /// a term, the services shape otherwise.
    pub fn for_tuple(tuple: &IdentifierTuple<'_>) -> Self {
        match tuple.extra() {
            Some(term) => Self::term_locality(term, tuple.scope()),
            None => Self::service(tuple.scope(), tuple.service()),
        }
    }

    /// Depth of this path.
    pub fn level(&self) -> PathLevel {
        match self {
            Self::City { .. } => PathLevel::City,
            Self::Locality { .. } => PathLevel::Locality,
            Self::Service { .. } => PathLevel::Service,
            Self::Term { .. } => PathLevel::Term,
            Self::TermCity { .. } => PathLevel::TermCity,
            Self::TermLocality { .. } => PathLevel::TermLocality,
        }
    }

    /// Segments in order, including the family segment.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Self::City { city } => vec![SERVICES_SEGMENT, city.as_str()],
            Self::Locality { city, locality } => vec![SERVICES_SEGMENT, city.as_str(), locality.as_str()],
            Self::Service {
                city,
                locality,
                service,
            } => vec![SERVICES_SEGMENT, city.as_str(), locality.as_str(), service.as_str()],
            Self::Term { family, term } => vec![family.segment(), term.as_str()],
            Self::TermCity { family, term, city } => vec![family.segment(), term.as_str(), city.as_str()],
            Self::TermLocality {
                family,
                term,
                city,
                locality,
            } => vec![family.segment(), term.as_str(), city.as_str(), locality.as_str()],
        }
    }

    /// Parse a canonical path string.
    ///
    /// Only the exact canonical form is accepted: a leading `/`, no trailing
    /// `/`, no empty segments, every segment already in slug form.
    pub fn parse(input: &str) -> RouteResult<Self> {
        let rest = input
            .strip_prefix('/')
            .ok_or_else(|| RouteError::InvalidPath(format!("'{input}' does not start with '/'")))?;
        let raw: Vec<&str> = rest.split('/').collect();
        if raw.iter().any(|seg| seg.is_empty()) {
            return Err(RouteError::InvalidPath(format!("'{input}' has an empty segment")));
        }
        let (head, tail) = raw
            .split_first()
            .ok_or_else(|| RouteError::InvalidPath(input.to_string()))?;
        let slugs = tail
            .iter()
            .map(|seg| Slug::new(*seg))
            .collect::<RouteResult<Vec<_>>>()?;

        if *head == SERVICES_SEGMENT {
            let mut it = slugs.into_iter();
            return match (it.next(), it.next(), it.next(), it.next()) {
                (Some(city), None, None, None) => Ok(Self::City { city }),
                (Some(city), Some(locality), None, None) => Ok(Self::Locality { city, locality }),
                (Some(city), Some(locality), Some(service), None) => Ok(Self::Service {
                    city,
                    locality,
                    service,
                }),
                _ => Err(RouteError::InvalidPath(format!(
                    "'{input}' needs 1 to 3 segments after /{SERVICES_SEGMENT}"
                ))),
            };
        }

        let family = TermFamily::from_segment(head)
            .ok_or_else(|| RouteError::InvalidPath(format!("unknown path family '{head}'")))?;
        let mut it = slugs.into_iter();
        match (it.next(), it.next(), it.next(), it.next()) {
            (Some(term), None, None, None) => Ok(Self::Term { family, term }),
            (Some(term), Some(city), None, None) => Ok(Self::TermCity { family, term, city }),
            (Some(term), Some(city), Some(locality), None) => Ok(Self::TermLocality {
                family,
                term,
                city,
                locality,
            }),
            _ => Err(RouteError::InvalidPath(format!(
                "'{input}' needs 1 to 3 segments after /{}",
                family.segment()
            ))),
        }
    }

    /// Map the path back onto catalog entities; `None` when any segment is unknown.
    pub fn resolve<'c>(&self, catalog: &'c Catalog) -> Option<ResolvedRoute<'c>> {
        let scope = |city: &Slug, locality: &Slug| -> Option<LocalityScope<'c>> {
            let city = catalog.find_city(city.as_str())?;
            let locality = catalog.find_locality(city, locality.as_str())?;
            LocalityScope::new(city, locality).ok()
        };
        match self {
            Self::City { city } => catalog.find_city(city.as_str()).map(ResolvedRoute::City),
            Self::Locality { city, locality } => scope(city, locality).map(ResolvedRoute::Locality),
            Self::Service {
                city,
                locality,
                service,
            } => {
                let scope = scope(city, locality)?;
                let service = catalog.find_service(service.as_str())?;
                Some(ResolvedRoute::Service(IdentifierTuple::in_scope(scope, service)))
            }
            Self::Term { family, term } => catalog.find_term(*family, term.as_str()).map(ResolvedRoute::Term),
            Self::TermCity { family, term, city } => {
                let term = catalog.find_term(*family, term.as_str())?;
                let city = catalog.find_city(city.as_str())?;
                Some(ResolvedRoute::TermCity(term, city))
            }
            Self::TermLocality {
                family,
                term,
                city,
                locality,
            } => {
                let term = catalog.find_term(*family, term.as_str())?;
                Some(ResolvedRoute::TermLocality(term, scope(city, locality)?))
            }
        }
    }
}

impl Display for CanonicalPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for seg in self.segments() {
            f.write_str("/")?;
            f.write_str(seg)?;
        }
        Ok(())
    }
}

impl FromStr for CanonicalPath {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanonicalPath::parse(s)
    }
}

/// A canonical path resolved against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedRoute<'c> {
    /// City landing page
    City(&'c City),
    /// Locality landing page
    Locality(LocalityScope<'c>),
    /// Service page
    Service(IdentifierTuple<'c>),
    /// Term landing page
    Term(Term<'c>),
    /// Term in a city
    TermCity(Term<'c>, &'c City),
    /// Term in a locality
    TermLocality(Term<'c>, LocalityScope<'c>),
}

impl ResolvedRoute<'_> {
    /// Canonical path of the resolved route.
    pub fn canonical_path(&self) -> CanonicalPath {
        match *self {
            ResolvedRoute::City(city) => CanonicalPath::city(city),
            ResolvedRoute::Locality(scope) => CanonicalPath::locality(scope),
            ResolvedRoute::Service(tuple) => CanonicalPath::for_tuple(&tuple),
            ResolvedRoute::Term(term) => CanonicalPath::term(term),
            ResolvedRoute::TermCity(term, city) => CanonicalPath::term_city(term, city),
            ResolvedRoute::TermLocality(term, scope) => CanonicalPath::term_locality(term, scope),
        }
    }
}

/// Render the canonical path of a tuple.
///
/// The tuple type already guarantees that the locality belongs to the city;
/// the assertion guards against that guarantee ever being weakened.
pub fn build_canonical_path(tuple: &IdentifierTuple<'_>) -> String {
    debug_assert!(
        tuple.locality().belongs_to(tuple.city()),
        "identifier tuple with foreign locality"
    );
    CanonicalPath::for_tuple(tuple).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog::builder()
            .city("Greater Noida", ["Sector 1", "Pari Chowk"])
            .service("CCTV Repair")
            .brand("CP Plus")
            .repair_issue("No Video Signal")
            .build()
            .unwrap()
    }

    #[test]
    fn builds_service_path() {
        let cat = catalog();
        let city = &cat.cities()[0];
        let tuple = IdentifierTuple::new(city, &city.localities()[0], &cat.services()[0]).unwrap();
        assert_eq!(build_canonical_path(&tuple), "/services/greater-noida/sector-1/cctv-repair");
        assert_eq!(build_canonical_path(&tuple), build_canonical_path(&tuple));
    }

    #[test]
    fn tuple_with_term_uses_sibling_shape() {
        let cat = catalog();
        let city = &cat.cities()[0];
        let brand = cat.find_term(TermFamily::Brands, "cp-plus").unwrap();
        let tuple = IdentifierTuple::new(city, &city.localities()[1], &cat.services()[0])
            .unwrap()
            .with_extra(brand);
        assert_eq!(build_canonical_path(&tuple), "/brands/cp-plus/greater-noida/pari-chowk");
    }

    #[test]
    fn parse_round_trips_every_shape() {
        for input in [
            "/services/greater-noida",
            "/services/greater-noida/sector-1",
            "/services/greater-noida/sector-1/cctv-repair",
            "/brands/cp-plus",
            "/industries/retail/greater-noida",
            "/repairs/no-video-signal/greater-noida/sector-1",
        ] {
            let path = CanonicalPath::parse(input).unwrap();
            assert_eq!(path.to_string(), input);
        }
    }

    #[test]
    fn parse_rejects_non_canonical_forms() {
        for input in [
            "services/delhi",
            "/services",
            "/services/",
            "/services/delhi/",
            "/services/Delhi",
            "/services/a/b/c/d",
            "/brands/a/b/c/d",
            "/blog/some-post",
            "/",
        ] {
            assert!(CanonicalPath::parse(input).is_err(), "{input} should be rejected");
        }
    }

    #[test]
    fn resolve_checks_every_segment() {
        let cat = catalog();
        let ok = CanonicalPath::parse("/services/greater-noida/sector-1/cctv-repair").unwrap();
        let resolved = ok.resolve(&cat).unwrap();
        assert_eq!(resolved.canonical_path(), ok);

        let wrong = CanonicalPath::parse("/services/greater-noida/saket/cctv-repair").unwrap();
        assert!(wrong.resolve(&cat).is_none());

        let repair = CanonicalPath::parse("/repairs/no-video-signal/greater-noida").unwrap();
        assert!(matches!(repair.resolve(&cat), Some(ResolvedRoute::TermCity(_, _))));
        assert_eq!(repair.level(), PathLevel::TermCity);
    }
}
