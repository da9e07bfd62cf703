// Copyright 2025 Cowboy AI, LLC.

use pretty_assertions::assert_eq;
use urlspace::{
    build_canonical_path, encode, Catalog, CanonicalPath, DecodePolicy, IdentifierTuple, LegacyDecoder, LegacyShape,
    Named, RouteError,
};

fn embedded() -> Catalog {
    Catalog::embedded().unwrap()
}

#[test]
fn scenario_greater_noida_sector_one() {
    let catalog = embedded();
    let decoded = LegacyDecoder::new(&catalog)
        .decode("cctv-repair-in-sector-1-greater-noida")
        .unwrap();
    assert_eq!(decoded.shape, LegacyShape::ServiceInLocalityCity);
    assert_eq!(decoded.tuple.city().name(), "Greater Noida");
    assert_eq!(decoded.tuple.locality().name(), "Sector 1");
    assert_eq!(decoded.tuple.service().name(), "CCTV Repair");
    assert_eq!(
        build_canonical_path(&decoded.tuple),
        "/services/greater-noida/sector-1/cctv-repair"
    );
}

#[test]
fn scenario_noida_is_never_confused_with_greater_noida() {
    let catalog = embedded();
    let decoder = LegacyDecoder::new(&catalog);

    let noida = decoder.decode("cctv-repair-in-sector-18-noida").unwrap();
    assert_eq!(noida.tuple.city().name(), "Noida");

    for (locality, city) in [("pari-chowk", "Greater Noida"), ("sector-62", "Noida"), ("gaur-city", "Greater Noida")] {
        let city_slug = urlspace::slugify(city);
        let slug = format!("cctv-installation-in-{locality}-{city_slug}");
        let decoded = decoder.decode(&slug).unwrap();
        assert_eq!(decoded.tuple.city().name(), city, "{slug}");
    }

    let flat = decoder.decode("cctv-repair-pari-chowk-greater-noida").unwrap();
    assert_eq!(flat.shape, LegacyShape::ServiceLocalityCity);
    assert_eq!(flat.tuple.city().name(), "Greater Noida");
}

#[test]
fn scenario_unknown_slug_decodes_to_none() {
    let catalog = embedded();
    let decoder = LegacyDecoder::new(&catalog);
    assert!(decoder.decode("not-a-real-slug-at-all").is_none());
    assert!(decoder.decode_all("not-a-real-slug-at-all").is_empty());
    assert!(decoder.decode("").is_none());
    assert!(decoder.decode("CCTV Repair in Saket Delhi").is_none());
}

#[test]
fn in_form_round_trips_for_every_tuple() {
    let catalog = embedded();
    let decoder = LegacyDecoder::new(&catalog);
    for city in catalog.cities() {
        for scope in city.scopes() {
            for service in catalog.services() {
                let tuple = IdentifierTuple::in_scope(scope, service);
                let slug = encode(&tuple, LegacyShape::ServiceInLocalityCity);
                let decoded = decoder.decode(&slug);
                assert_eq!(decoded.map(|d| d.tuple), Some(tuple), "{slug}");
            }
        }
    }
}

#[test]
fn shared_locality_names_are_ambiguous_only_when_strict() {
    let catalog = embedded();
    let slug = "sector-15-cctv-repair";

    let lenient = LegacyDecoder::new(&catalog).decode(slug).unwrap();
    assert_eq!(lenient.tuple.city().name(), "Noida");

    let strict = LegacyDecoder::with_policy(&catalog, DecodePolicy::Strict);
    assert!(strict.decode(slug).is_none());
    match strict.decode_strict(slug) {
        Err(RouteError::AmbiguousDecode { candidates, .. }) => assert_eq!(
            candidates,
            vec![
                "/services/noida/sector-15/cctv-repair".to_string(),
                "/services/faridabad/sector-15/cctv-repair".to_string(),
            ]
        ),
        other => panic!("expected ambiguity, got {other:?}"),
    }

    // the city-qualified form is not ambiguous
    let qualified = strict.decode_strict("cctv-repair-in-sector-15-faridabad").unwrap().unwrap();
    assert_eq!(qualified.tuple.city().name(), "Faridabad");
}

#[test]
fn canonical_paths_parse_back_to_the_same_route() {
    let catalog = embedded();
    let city = catalog.find_city("gurgaon").unwrap();
    let scope = city.scopes().nth(1).unwrap();
    let service = catalog.find_service("cctv-amc").unwrap();
    let tuple = IdentifierTuple::in_scope(scope, service);

    let path = build_canonical_path(&tuple);
    assert_eq!(path, "/services/gurgaon/sohna-road/cctv-amc");
    assert_eq!(path, build_canonical_path(&tuple));

    let parsed: CanonicalPath = path.parse().unwrap();
    let route = parsed.resolve(&catalog).unwrap();
    assert_eq!(route.canonical_path().to_string(), path);
}

#[test]
fn catalog_reports_known_affix_overlaps() {
    let catalog = embedded();
    let report: Vec<String> = catalog.lints().iter().map(ToString::to_string).collect();
    assert!(report.iter().any(|l| l.contains("noida") && l.contains("greater-noida")), "{report:?}");
}
