// Copyright 2025 Cowboy AI, LLC.

//! Catalog construction and file formats.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::lint::compute_lints;
use super::{Brand, Catalog, City, Industry, Locality, Namespace, RepairIssue, Service};
use crate::errors::{RouteError, RouteResult};
use crate::slug::slugify;

/// On-disk catalog document (JSON or TOML).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogFile {
    /// Cities in enumeration order
    pub cities: Vec<CityRecord>,
    /// Services in enumeration order
    pub services: Vec<ServiceRecord>,
    /// Camera brands
    #[serde(default)]
    pub brands: Vec<String>,
    /// Industries served
    #[serde(default)]
    pub industries: Vec<String>,
    /// Repair issues
    #[serde(default)]
    pub repair_issues: Vec<String>,
}

/// A city with its localities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CityRecord {
    /// Display name
    pub name: String,
    /// Locality display names in enumeration order
    pub localities: Vec<String>,
}

/// A service, either a bare name or a name with a display category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ServiceRecord {
    /// Bare display name
    Name(String),
    /// Display name plus a category used only for grouping in listings
    Detailed {
        /// Display name
        name: String,
        /// Display-only category
        #[serde(default)]
        category: Option<String>,
    },
}

/// Accumulates catalog entries and validates them into a [`Catalog`].
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    file: CatalogFile,
}

impl CatalogBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a parsed catalog document.
    pub fn from_file(file: CatalogFile) -> Self {
        Self { file }
    }

    /// Append a city with its localities.
    pub fn city<I, S>(mut self, name: impl Into<String>, localities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file.cities.push(CityRecord {
            name: name.into(),
            localities: localities.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Append a service.
    pub fn service(mut self, name: impl Into<String>) -> Self {
        self.file.services.push(ServiceRecord::Name(name.into()));
        self
    }

    /// Append a service with a display category.
    pub fn service_in_category(mut self, name: impl Into<String>, category: impl Into<String>) -> Self {
        self.file.services.push(ServiceRecord::Detailed {
            name: name.into(),
            category: Some(category.into()),
        });
        self
    }

    /// Append a brand.
    pub fn brand(mut self, name: impl Into<String>) -> Self {
        self.file.brands.push(name.into());
        self
    }

    /// Append an industry.
    pub fn industry(mut self, name: impl Into<String>) -> Self {
        self.file.industries.push(name.into());
        self
    }

    /// Append a repair issue.
    pub fn repair_issue(mut self, name: impl Into<String>) -> Self {
        self.file.repair_issues.push(name.into());
        self
    }

    /// Validate and freeze the catalog.
    ///
    /// Fails when two names of one namespace share a slug, when a name has no
    /// alphanumeric characters, or when a city has no localities. Ambiguity
    /// hazards that the legacy decoder cares about are recorded as lints and
    /// logged, not rejected.
    pub fn build(self) -> RouteResult<Catalog> {
        let CatalogFile {
            cities: city_records,
            services: service_records,
            brands,
            industries,
            repair_issues,
        } = self.file;

        let mut cities = Vec::with_capacity(city_records.len());
        let mut locality_index = Vec::with_capacity(city_records.len());
        let city_index = index_names(
            Namespace::City,
            city_records.iter().map(|c| c.name.as_str()),
        )?;
        for record in city_records {
            if record.localities.is_empty() {
                return Err(RouteError::EmptyCity(record.name));
            }
            locality_index.push(index_names(
                Namespace::Locality,
                record.localities.iter().map(String::as_str),
            )?);
            let localities = record
                .localities
                .into_iter()
                .map(|name| Locality {
                    name,
                    city: record.name.clone(),
                })
                .collect();
            cities.push(City {
                name: record.name,
                localities,
            });
        }

        let services: Vec<Service> = service_records
            .into_iter()
            .map(|record| match record {
                ServiceRecord::Name(name) => Service { name, category: None },
                ServiceRecord::Detailed { name, category } => Service { name, category },
            })
            .collect();
        let service_index = index_names(Namespace::Service, services.iter().map(|s| s.name.as_str()))?;
        let brand_index = index_names(Namespace::Brand, brands.iter().map(String::as_str))?;
        let industry_index = index_names(Namespace::Industry, industries.iter().map(String::as_str))?;
        let repair_index = index_names(Namespace::RepairIssue, repair_issues.iter().map(String::as_str))?;

        let mut catalog = Catalog {
            cities,
            services,
            brands: brands.into_iter().map(|name| Brand { name }).collect(),
            industries: industries.into_iter().map(|name| Industry { name }).collect(),
            repair_issues: repair_issues.into_iter().map(|name| RepairIssue { name }).collect(),
            city_index,
            locality_index,
            service_index,
            brand_index,
            industry_index,
            repair_index,
            lints: Vec::new(),
        };
        catalog.lints = compute_lints(&catalog);
        for lint in &catalog.lints {
            warn!(%lint, "catalog ambiguity hazard");
        }
        let stats = catalog.stats();
        info!(
            cities = stats.cities,
            localities = stats.localities,
            services = stats.services,
            lints = catalog.lints.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}

/// Build the slug → position index of one namespace, rejecting collisions.
fn index_names<'a>(
    namespace: Namespace,
    names: impl Iterator<Item = &'a str>,
) -> RouteResult<IndexMap<String, usize>> {
    let mut index = IndexMap::new();
    for (pos, name) in names.enumerate() {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(RouteError::EmptySlug {
                namespace,
                name: name.to_string(),
            });
        }
        if index.insert(slug.clone(), pos).is_some() {
            return Err(RouteError::DuplicateSlug { namespace, slug });
        }
    }
    Ok(index)
}

impl Catalog {
    /// Parse and validate a JSON catalog document.
    pub fn from_json_str(input: &str) -> RouteResult<Self> {
        let file: CatalogFile = serde_json::from_str(input)?;
        CatalogBuilder::from_file(file).build()
    }

    /// Parse and validate a TOML catalog document.
    pub fn from_toml_str(input: &str) -> RouteResult<Self> {
        let file: CatalogFile = toml::from_str(input)?;
        CatalogBuilder::from_file(file).build()
    }

    /// Load a catalog file; `.toml` files are read as TOML, everything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> RouteResult<Self> {
        let path = path.as_ref();
        let input = fs::read_to_string(path)
            .map_err(|e| RouteError::Io(format!("{}: {e}", path.display())))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&input),
            _ => Self::from_json_str(&input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Named;

    #[test]
    fn duplicate_slugs_are_rejected() {
        let err = Catalog::builder()
            .city("Delhi", ["Saket"])
            .service("CCTV Repair")
            .service("CCTV  repair!")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            RouteError::DuplicateSlug { namespace: Namespace::Service, ref slug } if slug == "cctv-repair"
        ));
    }

    #[test]
    fn duplicate_localities_are_scoped_per_city() {
        let ok = Catalog::builder()
            .city("Noida", ["Sector 1"])
            .city("Greater Noida", ["Sector 1"])
            .service("CCTV Repair")
            .build();
        assert!(ok.is_ok());

        let err = Catalog::builder()
            .city("Noida", ["Sector 1", "sector-1"])
            .service("CCTV Repair")
            .build()
            .unwrap_err();
        assert!(matches!(err, RouteError::DuplicateSlug { namespace: Namespace::Locality, .. }));
    }

    #[test]
    fn empty_names_and_cities_are_rejected() {
        let err = Catalog::builder().city("Delhi", Vec::<String>::new()).build().unwrap_err();
        assert!(matches!(err, RouteError::EmptyCity(ref name) if name == "Delhi"));

        let err = Catalog::builder()
            .city("Delhi", ["Saket"])
            .brand("???")
            .build()
            .unwrap_err();
        assert!(matches!(err, RouteError::EmptySlug { namespace: Namespace::Brand, .. }));
    }

    #[test]
    fn json_and_toml_documents_agree() {
        let json = r#"{
            "cities": [{"name": "Gurgaon", "localities": ["DLF Phase 3", "Sohna Road"]}],
            "services": ["CCTV Installation", {"name": "Dome Camera Setup", "category": "Cameras"}],
            "brands": ["CP Plus"]
        }"#;
        let toml = r#"
            brands = ["CP Plus"]
            services = ["CCTV Installation", { name = "Dome Camera Setup", category = "Cameras" }]

            [[cities]]
            name = "Gurgaon"
            localities = ["DLF Phase 3", "Sohna Road"]
        "#;
        let a = Catalog::from_json_str(json).unwrap();
        let b = Catalog::from_toml_str(toml).unwrap();
        assert_eq!(a.stats(), b.stats());
        assert_eq!(a.services()[1].category(), Some("Cameras"));
        assert_eq!(b.brands()[0].slug(), "cp-plus");
        assert!(a.industries().is_empty());
    }

    #[test]
    fn load_reads_files_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(
            &path,
            "services = [\"CCTV Repair\"]\n[[cities]]\nname = \"Faridabad\"\nlocalities = [\"Sector 15\"]\n",
        )
        .unwrap();
        let cat = Catalog::load(&path).unwrap();
        assert_eq!(cat.cities()[0].name(), "Faridabad");

        let missing = Catalog::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, RouteError::Io(_)));
    }
}
