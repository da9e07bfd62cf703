// Copyright 2025 Cowboy AI, LLC.

//! Identifier tuples: the (city, locality, service [, term]) combination naming one page.

use std::fmt;

use crate::catalog::{City, Locality, Named, Service, Term};
use crate::errors::{RouteError, RouteResult};

/// A city together with one of its own localities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalityScope<'c> {
    city: &'c City,
    locality: &'c Locality,
}

impl<'c> LocalityScope<'c> {
    /// Pair a city with a locality; fails when the locality belongs elsewhere.
    pub fn new(city: &'c City, locality: &'c Locality) -> RouteResult<Self> {
        if !locality.belongs_to(city) {
            return Err(RouteError::InvariantViolation(format!(
                "locality '{}' belongs to '{}', not '{}'",
                locality.name(),
                locality.city_name(),
                city.name()
            )));
        }
        Ok(Self { city, locality })
    }

    /// The city.
    pub fn city(&self) -> &'c City {
        self.city
    }

    /// The locality.
    pub fn locality(&self) -> &'c Locality {
        self.locality
    }
}

impl City {
    /// The city paired with each of its localities, in catalog order.
    pub fn scopes(&self) -> impl Iterator<Item = LocalityScope<'_>> + '_ {
        self.localities()
            .iter()
            .map(move |locality| LocalityScope { city: self, locality })
    }
}

/// A validated identifier tuple borrowing from a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierTuple<'c> {
    scope: LocalityScope<'c>,
    service: &'c Service,
    extra: Option<Term<'c>>,
}

impl<'c> IdentifierTuple<'c> {
    /// Build a tuple, enforcing that `locality` belongs to `city`.
    pub fn new(city: &'c City, locality: &'c Locality, service: &'c Service) -> RouteResult<Self> {
        Ok(Self {
            scope: LocalityScope::new(city, locality)?,
            service,
            extra: None,
        })
    }

    /// Build a tuple from an already validated scope.
    pub fn in_scope(scope: LocalityScope<'c>, service: &'c Service) -> Self {
        Self {
            scope,
            service,
            extra: None,
        }
    }

    /// Attach a brand, industry or repair issue.
    pub fn with_extra(mut self, extra: Term<'c>) -> Self {
        self.extra = Some(extra);
        self
    }

    /// The city.
    pub fn city(&self) -> &'c City {
        self.scope.city
    }

    /// The locality.
    pub fn locality(&self) -> &'c Locality {
        self.scope.locality
    }

    /// The validated city/locality pair.
    pub fn scope(&self) -> LocalityScope<'c> {
        self.scope
    }

    /// The service.
    pub fn service(&self) -> &'c Service {
        self.service
    }

    /// The optional brand, industry or repair issue.
    pub fn extra(&self) -> Option<Term<'c>> {
        self.extra
    }
}

impl fmt::Display for IdentifierTuple<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {}, {}",
            self.service.name(),
            self.scope.locality.name(),
            self.scope.city.name()
        )?;
        if let Some(extra) = &self.extra {
            write!(f, " [{}]", extra.name())?;
        }
        Ok(())
    }
}
