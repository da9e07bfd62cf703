// Copyright 2025 Cowboy AI, LLC.

//! Legacy flat-slug encoding and decoding.
//!
//! Older URL schemes packed a whole tuple into one path segment, for example
//! `cctv-repair-in-sector-1-greater-noida`. Hyphens separate the fields *and*
//! the words inside names, so decoding cannot split on position. It matches the
//! string against catalog slugs instead, trying the shapes in a fixed priority:
//!
//! 1. `{service}-in-{locality}-{city}`
//! 2. `{service}-{locality}-{city}`
//! 3. `{locality}-{service}`
//! 4. `{service}-{locality}`
//!
//! Inside a shape, longer catalog slugs are tried before shorter ones so that
//! `greater-noida` wins over `noida`. Decoding is a best-effort reconstruction:
//! when catalog names overlap the first consistent match is not guaranteed to be
//! the tuple that produced the slug. [`DecodePolicy::Strict`] turns such overlaps
//! into [`RouteError::AmbiguousDecode`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::canonical::CanonicalPath;
use crate::catalog::{Catalog, City, Named, Namespace};
use crate::errors::{RouteError, RouteResult};
use crate::slug::is_slug;
use crate::tuple::{IdentifierTuple, LocalityScope};

/// Infix of the primary legacy shape.
pub const IN_INFIX: &str = "-in-";

/// Flat-slug layouts, in decoding priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyShape {
    /// `{service}-in-{locality}-{city}`
    ServiceInLocalityCity,
    /// `{service}-{locality}-{city}`
    ServiceLocalityCity,
    /// `{locality}-{service}`
    LocalityService,
    /// `{service}-{locality}`
    ServiceLocality,
}

impl LegacyShape {
    /// All shapes in decoding priority order.
    pub const ALL: [LegacyShape; 4] = [
        LegacyShape::ServiceInLocalityCity,
        LegacyShape::ServiceLocalityCity,
        LegacyShape::LocalityService,
        LegacyShape::ServiceLocality,
    ];
}

impl fmt::Display for LegacyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LegacyShape::ServiceInLocalityCity => "service-in-locality-city",
            LegacyShape::ServiceLocalityCity => "service-locality-city",
            LegacyShape::LocalityService => "locality-service",
            LegacyShape::ServiceLocality => "service-locality",
        })
    }
}

/// Encode a tuple into one of the flat legacy layouts.
pub fn encode(tuple: &IdentifierTuple<'_>, shape: LegacyShape) -> String {
    let service = tuple.service().slug();
    let locality = tuple.locality().slug();
    let city = tuple.city().slug();
    match shape {
        LegacyShape::ServiceInLocalityCity => format!("{service}{IN_INFIX}{locality}-{city}"),
        LegacyShape::ServiceLocalityCity => format!("{service}-{locality}-{city}"),
        LegacyShape::LocalityService => format!("{locality}-{service}"),
        LegacyShape::ServiceLocality => format!("{service}-{locality}"),
    }
}

/// How the decoder treats more than one consistent match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Return the first consistent match (longest catalog slugs first)
    #[default]
    LongestMatch,
    /// Fail when the slug names more than one distinct tuple over all shapes
    Strict,
}

/// A tuple recovered from a flat slug, with the layout it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedTuple<'c> {
    /// The recovered tuple
    pub tuple: IdentifierTuple<'c>,
    /// The layout that matched
    pub shape: LegacyShape,
}

impl DecodedTuple<'_> {
    /// Canonical path the legacy slug should redirect to.
    pub fn canonical_path(&self) -> CanonicalPath {
        CanonicalPath::for_tuple(&self.tuple)
    }
}

#[derive(Clone, Copy)]
struct PairKey<'c> {
    locality: &'c str,
    city: &'c str,
    scope: LocalityScope<'c>,
}

/// Flat-slug decoder bound to one catalog.
///
/// The candidate orderings are computed once on construction; decoding itself
/// is a read-only scan.
pub struct LegacyDecoder<'c> {
    catalog: &'c Catalog,
    policy: DecodePolicy,
    cities_longest_first: Vec<(&'c str, &'c City)>,
    pairs_by_suffix: Vec<PairKey<'c>>,
    pairs_by_locality: Vec<PairKey<'c>>,
}

impl<'c> LegacyDecoder<'c> {
    /// Create a decoder with the default policy.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self::with_policy(catalog, DecodePolicy::default())
    }

    /// Create a decoder with an explicit policy.
    pub fn with_policy(catalog: &'c Catalog, policy: DecodePolicy) -> Self {
        let city_slugs = catalog.slugs(Namespace::City);
        let mut cities_longest_first: Vec<(&'c str, &'c City)> =
            city_slugs.iter().copied().zip(catalog.cities()).collect();
        // stable sort: equal lengths keep catalog order
        cities_longest_first.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let mut pairs_by_suffix = Vec::with_capacity(catalog.locality_count());
        for (ci, (&city_slug, city)) in city_slugs.iter().zip(catalog.cities()).enumerate() {
            for (locality_slug, scope) in catalog.locality_slugs(ci).zip(city.scopes()) {
                pairs_by_suffix.push(PairKey {
                    locality: locality_slug,
                    city: city_slug,
                    scope,
                });
            }
        }
        let mut pairs_by_locality = pairs_by_suffix.clone();
        pairs_by_suffix.sort_by(|a, b| (b.locality.len() + b.city.len()).cmp(&(a.locality.len() + a.city.len())));
        pairs_by_locality.sort_by(|a, b| b.locality.len().cmp(&a.locality.len()));

        Self {
            catalog,
            policy,
            cities_longest_first,
            pairs_by_suffix,
            pairs_by_locality,
        }
    }

    /// The active policy.
    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Decode a flat slug according to the policy.
    ///
    /// Never fails: a slug that matches no shape, or an ambiguous slug under
    /// [`DecodePolicy::Strict`], yields `None`.
    pub fn decode(&self, slug: &str) -> Option<DecodedTuple<'c>> {
        match self.policy {
            DecodePolicy::LongestMatch => {
                let found = LegacyShape::ALL
                    .into_iter()
                    .find_map(|shape| self.candidates(shape, slug, true).into_iter().next());
                debug!(slug, found = ?found.map(|d| d.canonical_path().to_string()), "legacy decode");
                found
            }
            DecodePolicy::Strict => match self.decode_strict(slug) {
                Ok(found) => found,
                Err(err) => {
                    warn!(%err, "refusing ambiguous legacy slug");
                    None
                }
            },
        }
    }

    /// Decode, failing with [`RouteError::AmbiguousDecode`] when the matches of
    /// all shapes together name more than one distinct tuple.
    ///
    /// The same tuple found through two shapes counts once, reported with the
    /// higher-priority shape.
    pub fn decode_strict(&self, slug: &str) -> RouteResult<Option<DecodedTuple<'c>>> {
        let mut distinct: Vec<DecodedTuple<'c>> = Vec::new();
        for found in self.decode_all(slug) {
            if !distinct.iter().any(|d| d.tuple == found.tuple) {
                distinct.push(found);
            }
        }
        if distinct.len() > 1 {
            return Err(RouteError::AmbiguousDecode {
                slug: slug.to_string(),
                candidates: distinct.iter().map(|d| d.canonical_path().to_string()).collect(),
            });
        }
        Ok(distinct.pop())
    }

    /// Every consistent match over all shapes, in priority order.
    pub fn decode_all(&self, slug: &str) -> Vec<DecodedTuple<'c>> {
        LegacyShape::ALL
            .into_iter()
            .flat_map(|shape| self.candidates(shape, slug, false))
            .collect()
    }

    fn candidates(&self, shape: LegacyShape, slug: &str, first_only: bool) -> Vec<DecodedTuple<'c>> {
        let mut out = Vec::new();
        if !is_slug(slug) {
            return out;
        }
        let in_split = slug.split_once(IN_INFIX);
        let mut push = |scope: LocalityScope<'c>, service: &str| -> bool {
            if let Some(service) = self.catalog.find_service(service) {
                out.push(DecodedTuple {
                    tuple: IdentifierTuple::in_scope(scope, service),
                    shape,
                });
                return first_only;
            }
            false
        };

        match shape {
            LegacyShape::ServiceInLocalityCity => {
                if let Some((head, tail)) = in_split {
                    for &(city_slug, city) in &self.cities_longest_first {
                        let Some(locality) = strip_hyphen_suffix(tail, city_slug)
                            .and_then(|rest| self.catalog.find_locality(city, rest))
                        else {
                            continue;
                        };
                        let Ok(scope) = LocalityScope::new(city, locality) else {
                            continue;
                        };
                        if push(scope, head) {
                            break;
                        }
                    }
                }
            }
            LegacyShape::ServiceLocalityCity => {
                for key in &self.pairs_by_suffix {
                    let rest = strip_hyphen_suffix(slug, key.city)
                        .and_then(|rest| strip_hyphen_suffix(rest, key.locality));
                    if let Some(service) = rest {
                        if push(key.scope, service) {
                            break;
                        }
                    }
                }
            }
            LegacyShape::LocalityService => {
                for key in &self.pairs_by_locality {
                    if let Some(service) = strip_hyphen_prefix(slug, key.locality) {
                        if push(key.scope, service) {
                            break;
                        }
                    }
                }
            }
            LegacyShape::ServiceLocality => {
                for key in &self.pairs_by_locality {
                    if let Some(service) = strip_hyphen_suffix(slug, key.locality) {
                        if push(key.scope, service) {
                            break;
                        }
                    }
                }
            }
        }
        out
    }
}

/// `input == rest + "-" + suffix` → `rest` (non-empty).
fn strip_hyphen_suffix<'a>(input: &'a str, suffix: &str) -> Option<&'a str> {
    input
        .strip_suffix(suffix)?
        .strip_suffix('-')
        .filter(|rest| !rest.is_empty())
}

/// `input == prefix + "-" + rest` → `rest` (non-empty).
fn strip_hyphen_prefix<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    input
        .strip_prefix(prefix)?
        .strip_prefix('-')
        .filter(|rest| !rest.is_empty())
}
