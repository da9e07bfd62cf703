// Copyright 2025 Cowboy AI, LLC.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use urlspace::{slugify, Catalog, DecodePolicy, LegacyDecoder, RequestRouter, SiteConfig, UrlEnumerator};

fn benchmark_enumeration(c: &mut Criterion) {
    let catalog = Catalog::embedded().unwrap();
    let enumerator = UrlEnumerator::all(&catalog);

    c.bench_function("enumerate_all", |b| b.iter(|| black_box(enumerator.count())));
    c.bench_function("enumerate_first_page", |b| {
        b.iter(|| black_box(enumerator.page(1, 1_000)))
    });
}

fn benchmark_decoding(c: &mut Criterion) {
    let catalog = Catalog::embedded().unwrap();
    let mut group = c.benchmark_group("decode");

    let slugs = [
        ("in_form", "cctv-repair-in-sector-1-greater-noida"),
        ("flat", "cctv-installation-pari-chowk-greater-noida"),
        ("locality_first", "sector-15-cctv-repair"),
        ("miss", "not-a-real-slug-at-all"),
    ];
    for policy in [DecodePolicy::LongestMatch, DecodePolicy::Strict] {
        let decoder = LegacyDecoder::with_policy(&catalog, policy);
        for (name, slug) in slugs {
            group.bench_with_input(BenchmarkId::new(format!("{policy:?}"), name), &slug, |b, slug| {
                b.iter(|| black_box(decoder.decode(slug)))
            });
        }
    }
    group.finish();

    c.bench_function("decoder_construction", |b| {
        b.iter(|| black_box(LegacyDecoder::new(&catalog)))
    });
}

fn benchmark_routing(c: &mut Criterion) {
    let catalog = Catalog::embedded().unwrap();
    let config = SiteConfig::default();
    let router = RequestRouter::new(&catalog, &config);

    c.bench_function("route_canonical", |b| {
        b.iter(|| black_box(router.respond("/services/greater-noida/sector-1/cctv-repair")))
    });
    c.bench_function("route_legacy", |b| {
        b.iter(|| black_box(router.respond("/cctv-repair-in-sector-18-noida?ref=old")))
    });
    c.bench_function("slugify", |b| {
        b.iter(|| black_box(slugify("Raj Nagar Extension / Phase-2 (Ghaziabad)")))
    });
}

criterion_group!(benches, benchmark_enumeration, benchmark_decoding, benchmark_routing);
criterion_main!(benches);
