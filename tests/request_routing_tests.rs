// Copyright 2025 Cowboy AI, LLC.

use std::fs;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use test_case::test_case;
use urlspace::{
    write_sitemaps, Catalog, Page, PageHeadline, RedirectResolver, RequestRouter, Resolution, RouteResponse,
    SiteConfig, StaticContent, UrlEnumerator,
};

#[test_case("/cctv-repair-in-sector-1-greater-noida", 301 ; "legacy flat slug redirects")]
#[test_case("/service/sector-1-greater-noida/cctv-repair", 301 ; "legacy segmented redirects")]
#[test_case("/services/cctv-amc/saket", 301 ; "legacy inverted services redirects")]
#[test_case("/services/greater-noida/sector-1/cctv-repair", 200 ; "canonical service page")]
#[test_case("/repairs/dvr-not-working/delhi/saket?utm_source=x", 200 ; "canonical term page with query")]
#[test_case("/about/", 200 ; "static page with trailing slash")]
#[test_case("/cctv-repair-in-atlantis-greater-noida", 410 ; "retired flat slug is gone")]
#[test_case("/not-a-real-slug-at-all", 404 ; "unknown slug is not found")]
#[test_case("/services/delhi/atlantis", 404 ; "unknown locality is not found")]
fn router_answers(path: &str, status: u16) {
    let catalog = Catalog::embedded().unwrap();
    let config = SiteConfig::default();
    let response = RequestRouter::new(&catalog, &config).respond(path);
    assert_eq!(response.status(), status, "{path}: {response}");
}

#[test]
fn redirect_location_is_the_canonical_path() {
    let catalog = Catalog::embedded().unwrap();
    let resolution = RedirectResolver::new(&catalog).resolve("/cctv-repair-in-sector-1-greater-noida/");
    assert_eq!(
        resolution,
        Resolution::Redirect {
            location: "/services/greater-noida/sector-1/cctv-repair".to_string(),
            status: 301,
        }
    );
}

#[test]
fn redirect_targets_are_pages() {
    let catalog = Catalog::embedded().unwrap();
    let config = SiteConfig::default();
    let router = RequestRouter::new(&catalog, &config);
    for legacy in ["/cctv-repair-in-sector-18-noida", "/service/vaishali/cctv-cabling"] {
        let RouteResponse::Redirect { location } = router.respond(legacy) else {
            panic!("{legacy} should redirect");
        };
        assert!(matches!(router.respond(&location), RouteResponse::Page(Page::Route(_))), "{location}");
    }
}

#[test]
fn headlines_render_for_routed_pages() {
    let catalog = Catalog::embedded().unwrap();
    let config = SiteConfig::default();
    let router = RequestRouter::new(&catalog, &config);
    let RouteResponse::Page(Page::Route(route)) = router.respond("/brands/hikvision/noida/sector-62") else {
        panic!("expected a page");
    };
    let headline = PageHeadline::for_route(&route, &StaticContent::new());
    assert_eq!(headline.title, "Hikvision CCTV Services in Sector 62, Noida");
}

#[test]
fn sitemaps_cover_the_enumeration() {
    let catalog = Catalog::embedded().unwrap();
    let mut config = SiteConfig::from_toml_str(
        r#"
        base_url = "https://cctv.example.in"

        [sitemap]
        shard_size = 1000
        "#,
    )
    .unwrap();
    config.sitemap.last_modified = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

    let dir = tempfile::tempdir().unwrap();
    let enumerator = UrlEnumerator::new(&catalog, &config.families);
    let files = write_sitemaps(dir.path(), enumerator.iter(), &config, Utc::now()).unwrap();

    assert_eq!(files.url_count, enumerator.count());
    assert_eq!(files.shards.len(), files.url_count.div_ceil(1000));

    let first = fs::read_to_string(&files.shards[0]).unwrap();
    assert_eq!(first.matches("<url>").count(), 1000);
    assert!(first.contains("<loc>https://cctv.example.in/</loc>"));
    assert!(first.contains("<lastmod>2024-01-01T00:00:00Z</lastmod>"));

    let index = fs::read_to_string(&files.index).unwrap();
    assert_eq!(index.matches("<sitemap>").count(), files.shards.len());
}
