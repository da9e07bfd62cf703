// Copyright 2025 Cowboy AI, LLC.

//! Load-time detection of slug overlaps that make flat-slug decoding ambiguous.

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use super::{Catalog, Namespace};
use crate::legacy::IN_INFIX;

/// An ambiguity hazard found in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogLint {
    /// `shorter` is a hyphen-delimited prefix or suffix of `longer` (`noida` in `greater-noida`)
    AffixOverlap {
        /// Namespace of both slugs
        namespace: Namespace,
        /// The contained slug
        shorter: String,
        /// The containing slug
        longer: String,
    },
    /// The same slug exists in two namespaces
    CrossNamespace {
        /// The shared slug
        slug: String,
        /// First namespace
        first: Namespace,
        /// Second namespace
        second: Namespace,
    },
    /// A service slug contains `-in-`, so its `-in-` legacy form splits at the wrong place
    InfixInService {
        /// The service slug
        slug: String,
    },
}

impl Display for CatalogLint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CatalogLint::AffixOverlap {
                namespace,
                shorter,
                longer,
            } => write!(f, "{namespace} slug '{shorter}' is a hyphen affix of '{longer}'"),
            CatalogLint::CrossNamespace { slug, first, second } => {
                write!(f, "slug '{slug}' is both a {first} and a {second}")
            }
            CatalogLint::InfixInService { slug } => {
                write!(f, "service slug '{slug}' contains '{IN_INFIX}' and cannot be decoded from the in-form")
            }
        }
    }
}

/// True when `shorter` sits at either end of `longer` on a hyphen boundary.
pub(crate) fn is_hyphen_affix(shorter: &str, longer: &str) -> bool {
    if shorter.len() >= longer.len() {
        return false;
    }
    let boundary_suffix = longer.ends_with(shorter) && longer[..longer.len() - shorter.len()].ends_with('-');
    let boundary_prefix = longer.starts_with(shorter) && longer[shorter.len()..].starts_with('-');
    boundary_suffix || boundary_prefix
}

pub(super) fn compute_lints(catalog: &Catalog) -> Vec<CatalogLint> {
    let mut lints = BTreeSet::new();

    for namespace in [Namespace::City, Namespace::Locality, Namespace::Service] {
        let slugs: BTreeSet<&str> = catalog.slugs(namespace).into_iter().collect();
        for &a in &slugs {
            for &b in &slugs {
                if is_hyphen_affix(a, b) {
                    lints.insert(CatalogLint::AffixOverlap {
                        namespace,
                        shorter: a.to_string(),
                        longer: b.to_string(),
                    });
                }
            }
        }
    }

    let namespaces = [Namespace::City, Namespace::Locality, Namespace::Service];
    for (i, &first) in namespaces.iter().enumerate() {
        let left: BTreeSet<&str> = catalog.slugs(first).into_iter().collect();
        for &second in &namespaces[i + 1..] {
            for slug in catalog.slugs(second) {
                if left.contains(slug) {
                    lints.insert(CatalogLint::CrossNamespace {
                        slug: slug.to_string(),
                        first,
                        second,
                    });
                }
            }
        }
    }

    for slug in catalog.slugs(Namespace::Service) {
        if slug.contains(IN_INFIX) {
            lints.insert(CatalogLint::InfixInService { slug: slug.to_string() });
        }
    }

    lints.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("noida", "greater-noida", true)]
    #[test_case("sector-1", "sector-1-extension", true)]
    #[test_case("noida", "noidaextension", false)]
    #[test_case("ida", "greater-noida", false)]
    #[test_case("noida", "noida", false)]
    fn hyphen_affix(shorter: &str, longer: &str, expected: bool) {
        assert_eq!(is_hyphen_affix(shorter, longer), expected);
    }

    #[test]
    fn overlapping_cities_and_cross_namespace_slugs_are_linted() {
        let cat = Catalog::builder()
            .city("Noida", ["Sector 18", "Gaur City"])
            .city("Greater Noida", ["Sector 1"])
            .service("CCTV Repair")
            .service("Gaur City")
            .build()
            .unwrap();
        let lints = cat.lints();
        assert!(lints.contains(&CatalogLint::AffixOverlap {
            namespace: Namespace::City,
            shorter: "noida".into(),
            longer: "greater-noida".into(),
        }));
        assert!(lints.contains(&CatalogLint::CrossNamespace {
            slug: "gaur-city".into(),
            first: Namespace::Locality,
            second: Namespace::Service,
        }));
        assert_eq!(
            lints[0].to_string(),
            "city slug 'noida' is a hyphen affix of 'greater-noida'"
        );
    }

    #[test]
    fn service_with_in_infix_is_linted() {
        use crate::legacy::{encode, LegacyDecoder, LegacyShape};
        use crate::tuple::IdentifierTuple;

        let cat = Catalog::builder()
            .city("Delhi", ["Saket"])
            .service("Built-in Cameras")
            .build()
            .unwrap();
        assert_eq!(
            cat.lints(),
            &[CatalogLint::InfixInService {
                slug: "built-in-cameras".into()
            }]
        );
        assert_eq!(
            cat.lints()[0].to_string(),
            "service slug 'built-in-cameras' contains '-in-' and cannot be decoded from the in-form"
        );

        let (city, locality) = cat.pairs().next().unwrap();
        let service = &cat.services()[0];
        let tuple = IdentifierTuple::new(city, locality, service).unwrap();
        let decoder = LegacyDecoder::new(&cat);

        let in_form = encode(&tuple, LegacyShape::ServiceInLocalityCity);
        assert_eq!(in_form, "built-in-cameras-in-saket-delhi");
        assert!(decoder.decode(&in_form).is_none());

        let flat = encode(&tuple, LegacyShape::ServiceLocalityCity);
        assert_eq!(decoder.decode(&flat).map(|d| d.tuple), Some(tuple));
    }

    #[test]
    fn clean_catalog_has_no_lints() {
        let cat = Catalog::builder()
            .city("Delhi", ["Saket", "Dwarka"])
            .service("CCTV Installation")
            .build()
            .unwrap();
        assert!(cat.lints().is_empty());
    }
}
