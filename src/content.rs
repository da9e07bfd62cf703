// Copyright 2025 Cowboy AI, LLC.

//! Page copy keyed by catalog entry.
//!
//! Routing never depends on content. A page whose entry has no copy falls back
//! to built-in templates, so every resolvable route always has a headline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::canonical::ResolvedRoute;
use crate::catalog::{Named, Namespace, Term, TermFamily};
use crate::errors::RouteResult;

/// Source of descriptive copy for catalog entries.
pub trait ContentProvider {
    /// Copy for the entry `name` of `kind`, if any.
    fn get(&self, kind: Namespace, name: &str) -> Option<&str>;
}

/// In-memory content, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticContent {
    entries: HashMap<Namespace, HashMap<String, String>>,
}

impl StaticContent {
    /// Empty content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the copy of one entry.
    pub fn insert(&mut self, kind: Namespace, name: impl Into<String>, text: impl Into<String>) {
        self.entries.entry(kind).or_default().insert(name.into(), text.into());
    }

    /// Builder-style [`StaticContent::insert`].
    pub fn with(mut self, kind: Namespace, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(kind, name, text);
        self
    }

    /// Parse `{"city": {"Delhi": "..."}, "service": {...}}`.
    pub fn from_json_str(input: &str) -> RouteResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Number of entries with copy.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// Whether no entry has copy.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContentProvider for StaticContent {
    fn get(&self, kind: Namespace, name: &str) -> Option<&str> {
        self.entries.get(&kind)?.get(name).map(String::as_str)
    }
}

/// Title and description of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageHeadline {
    /// `<title>` text
    pub title: String,
    /// Meta description
    pub description: String,
}

fn term_title(term: Term<'_>) -> String {
    match term.family() {
        TermFamily::Brands => format!("{} CCTV Services", term.name()),
        TermFamily::Industries => format!("CCTV Solutions for {}", term.name()),
        TermFamily::Repairs => format!("{} Repair", term.name()),
    }
}

impl PageHeadline {
    /// Headline of a resolved route; copy from `provider` wins over templates.
    pub fn for_route(route: &ResolvedRoute<'_>, provider: &dyn ContentProvider) -> Self {
        let copy = |kind: Namespace, name: &str| provider.get(kind, name).map(str::to_string);
        match *route {
            ResolvedRoute::City(city) => Self {
                title: format!("CCTV Services in {}", city.name()),
                description: copy(Namespace::City, city.name()).unwrap_or_else(|| {
                    format!("CCTV installation, repair and maintenance across {}.", city.name())
                }),
            },
            ResolvedRoute::Locality(scope) => {
                let (locality, city) = (scope.locality().name(), scope.city().name());
                Self {
                    title: format!("CCTV Services in {locality}, {city}"),
                    description: copy(Namespace::Locality, locality)
                        .unwrap_or_else(|| format!("Local CCTV technicians serving {locality}, {city}.")),
                }
            }
            ResolvedRoute::Service(tuple) => {
                let (service, locality, city) = (tuple.service().name(), tuple.locality().name(), tuple.city().name());
                Self {
                    title: tuple.to_string(),
                    description: copy(Namespace::Service, service)
                        .unwrap_or_else(|| format!("{service} for homes and businesses in {locality}, {city}.")),
                }
            }
            ResolvedRoute::Term(term) => Self {
                title: term_title(term),
                description: copy(term.family().namespace(), term.name())
                    .unwrap_or_else(|| format!("{} across every city we serve.", term_title(term))),
            },
            ResolvedRoute::TermCity(term, city) => Self {
                title: format!("{} in {}", term_title(term), city.name()),
                description: copy(term.family().namespace(), term.name())
                    .unwrap_or_else(|| format!("{} in {}.", term_title(term), city.name())),
            },
            ResolvedRoute::TermLocality(term, scope) => {
                let (locality, city) = (scope.locality().name(), scope.city().name());
                Self {
                    title: format!("{} in {locality}, {city}", term_title(term)),
                    description: copy(term.family().namespace(), term.name())
                        .unwrap_or_else(|| format!("{} in {locality}, {city}.", term_title(term))),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::CanonicalPath;
    use crate::catalog::Catalog;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog::builder()
            .city("Greater Noida", ["Sector 1"])
            .service("CCTV Repair")
            .brand("CP Plus")
            .build()
            .unwrap()
    }

    fn headline(cat: &Catalog, path: &str, content: &StaticContent) -> PageHeadline {
        let route = CanonicalPath::parse(path).unwrap().resolve(cat).unwrap();
        PageHeadline::for_route(&route, content)
    }

    #[test]
    fn templates_fill_missing_copy() {
        let cat = catalog();
        let h = headline(&cat, "/services/greater-noida/sector-1/cctv-repair", &StaticContent::new());
        assert_eq!(h.title, "CCTV Repair in Sector 1, Greater Noida");
        assert_eq!(
            h.description,
            "CCTV Repair for homes and businesses in Sector 1, Greater Noida."
        );
        let h = headline(&cat, "/brands/cp-plus/greater-noida", &StaticContent::new());
        assert_eq!(h.title, "CP Plus CCTV Services in Greater Noida");
    }

    #[test]
    fn provider_copy_wins() {
        let cat = catalog();
        let content = StaticContent::new().with(Namespace::Service, "CCTV Repair", "Same-day fault finding.");
        let h = headline(&cat, "/services/greater-noida/sector-1/cctv-repair", &content);
        assert_eq!(h.description, "Same-day fault finding.");
    }

    #[test]
    fn loads_from_json() {
        let content =
            StaticContent::from_json_str(r#"{"city": {"Delhi": "Capital coverage."}, "brand": {"Hikvision": "x"}}"#)
                .unwrap();
        assert_eq!(content.len(), 2);
        assert_eq!(content.get(Namespace::City, "Delhi"), Some("Capital coverage."));
        assert_eq!(content.get(Namespace::Service, "Delhi"), None);
    }
}
