// Copyright 2025 Cowboy AI, LLC.

//! urlspace - URL-space tooling
//!
//! Counts, lists and writes the site's URLs, and answers how a single request
//! path or legacy slug would be handled.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use urlspace::sitemap::shard_count;
use urlspace::{
    Catalog, CatalogFile, DecodePolicy, FamilyCounts, LegacyDecoder, RequestRouter, RouteResponse, SiteConfig,
    UrlEnumerator,
};

/// URL-space generation and slug resolution
#[derive(Parser, Debug)]
#[command(name = "urlspace")]
#[command(author, version, about = "Generate and resolve the site's URL space")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Site configuration (TOML)
    #[arg(short, long, global = true, env = "URLSPACE_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog file (JSON or TOML), overrides the configuration
    #[arg(long, global = true, env = "URLSPACE_CATALOG")]
    catalog: Option<PathBuf>,

    /// Base URL, overrides the configuration
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Count URLs per family and check them against the closed form
    Count,

    /// List one page of URLs in enumeration order
    Urls {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Entries per page (configuration value when absent)
        #[arg(long)]
        per_page: Option<usize>,
    },

    /// Write sharded sitemap files and their index
    Sitemap {
        /// Output directory
        #[arg(short, long, default_value = "public")]
        out: PathBuf,
    },

    /// Show how a request path would be answered
    Resolve {
        /// Request path, e.g. /cctv-repair-in-sector-18-noida
        path: String,
    },

    /// Decode a flat legacy slug
    Decode {
        /// The slug, without leading '/'
        slug: String,

        /// List every consistent candidate
        #[arg(long)]
        all: bool,

        /// Fail on ambiguous slugs
        #[arg(long)]
        strict: bool,
    },

    /// Report catalog slug ambiguities
    Lint {
        /// Exit with an error when any lint is found
        #[arg(long)]
        deny: bool,
    },

    /// Print the JSON Schema of catalog files
    Schema,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let mut config = match &cli.config {
        Some(path) => SiteConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => SiteConfig::default(),
    };
    if let Some(catalog) = &cli.catalog {
        config.catalog_path = Some(catalog.clone());
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    Ok(config.validated()?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let catalog = config.load_catalog().context("loading catalog")?;

    match &cli.command {
        Commands::Count => count(&catalog, &config, cli.format),
        Commands::Urls { page, per_page } => urls(
            &catalog,
            &config,
            *page,
            per_page.unwrap_or(config.listing_page_size),
            cli.format,
        ),
        Commands::Sitemap { out } => {
            let enumerator = UrlEnumerator::new(&catalog, &config.families);
            let files = urlspace::write_sitemaps(out, enumerator.iter(), &config, Utc::now())?;
            match cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    json!({
                        "index": files.index,
                        "shards": files.shards,
                        "urls": files.url_count,
                    })
                ),
                OutputFormat::Text => {
                    println!("{} URLs in {} shard(s)", files.url_count, files.shards.len());
                    println!("index: {}", files.index.display());
                }
            }
            Ok(())
        }
        Commands::Resolve { path } => resolve(&catalog, &config, path, cli.format),
        Commands::Decode { slug, all, strict } => decode(&catalog, &config, slug, *all, *strict, cli.format),
        Commands::Lint { deny } => {
            let lints = catalog.lints();
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(lints)?),
                OutputFormat::Text if lints.is_empty() => println!("no ambiguities"),
                OutputFormat::Text => lints.iter().for_each(|lint| println!("{lint}")),
            }
            if *deny && !lints.is_empty() {
                bail!("{} catalog lint(s)", lints.len());
            }
            Ok(())
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(CatalogFile);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

fn count(catalog: &Catalog, config: &SiteConfig, format: OutputFormat) -> Result<()> {
    let expected = FamilyCounts::expected(catalog, &config.families);
    let observed = UrlEnumerator::new(catalog, &config.families).counts();
    let total = observed.total();
    let shards = shard_count(total, config.sitemap.shard_size);

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "catalog": catalog.stats(),
                "expected": expected,
                "observed": observed,
                "total": total,
                "sitemap_shards": shards,
            }))?
        ),
        OutputFormat::Text => {
            let rows = [
                ("static", expected.static_pages, observed.static_pages),
                ("services", expected.services, observed.services),
                ("brands", expected.brands, observed.brands),
                ("industries", expected.industries, observed.industries),
                ("repairs", expected.repairs, observed.repairs),
            ];
            for (family, want, got) in rows {
                let mark = if want == got { "" } else { "  (expected differs)" };
                println!("{family:<12}{got:>8}{mark}");
            }
            println!("{:<12}{total:>8}", "total");
            println!(
                "{:<12}{shards:>8}  ({} per file)",
                "shards", config.sitemap.shard_size
            );
        }
    }
    if expected != observed {
        bail!("enumerated counts differ from the closed form (static pages overlapping generated paths?)");
    }
    Ok(())
}

fn urls(catalog: &Catalog, config: &SiteConfig, page: usize, per_page: usize, format: OutputFormat) -> Result<()> {
    if per_page == 0 {
        bail!("--per-page must be positive");
    }
    let enumerator = UrlEnumerator::new(catalog, &config.families);
    let Some(listing) = enumerator.page(page, per_page) else {
        bail!("page {page} is out of range");
    };
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listing)?),
        OutputFormat::Text => {
            for entry in &listing.entries {
                println!("{}", config.absolute_url(&entry.path));
            }
            eprintln!(
                "page {}/{} ({} URLs total)",
                listing.page, listing.page_count, listing.total
            );
        }
    }
    Ok(())
}

fn resolve(catalog: &Catalog, config: &SiteConfig, path: &str, format: OutputFormat) -> Result<()> {
    let router = RequestRouter::new(catalog, config);
    let response = router.respond(path);
    match format {
        OutputFormat::Json => {
            let location = match &response {
                RouteResponse::Redirect { location } => Some(location.as_str()),
                _ => None,
            };
            println!(
                "{}",
                json!({
                    "path": path,
                    "status": response.status(),
                    "location": location,
                    "summary": response.to_string(),
                })
            );
        }
        OutputFormat::Text => println!("{response}"),
    }
    Ok(())
}

fn decode(
    catalog: &Catalog,
    config: &SiteConfig,
    slug: &str,
    all: bool,
    strict: bool,
    format: OutputFormat,
) -> Result<()> {
    let policy = if strict { DecodePolicy::Strict } else { config.decoder.policy };
    let decoder = LegacyDecoder::with_policy(catalog, policy);
    let found = if all {
        decoder.decode_all(slug)
    } else if policy == DecodePolicy::Strict {
        decoder.decode_strict(slug)?.into_iter().collect()
    } else {
        decoder.decode(slug).into_iter().collect()
    };

    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = found
                .iter()
                .map(|d| {
                    json!({
                        "shape": d.shape.to_string(),
                        "tuple": d.tuple.to_string(),
                        "canonical": d.canonical_path().to_string(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Text if found.is_empty() => println!("no match"),
        OutputFormat::Text => {
            for d in &found {
                println!("{:<28} {}  ({})", d.shape.to_string(), d.canonical_path(), d.tuple);
            }
        }
    }
    Ok(())
}
