use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A trackable product, loaded from the catalog file. Immutable after load.
///
/// `name` is the unique key within its category and half of the idempotency
/// key for persisted analyses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfig {
    pub name: String,
    pub brand: String,
    pub generation: Option<String>,
    pub release_year: Option<i32>,
    /// Keywords joined into the general-search query and embedded in
    /// relevance prompts.
    pub keywords: Vec<String>,
    /// Relevance-language bias for general search; falls back to the
    /// app-level default when absent.
    pub search_language: Option<String>,
    /// Per-product override of the general-search candidate pool size.
    pub candidate_pool_size: Option<u32>,
    /// Per-product override of the full-analysis cap.
    pub full_analysis_cap: Option<u32>,
}

impl ProductConfig {
    /// Generate a filesystem-safe slug from the product name.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// A known reviewer channel searched directly by the curated pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewerChannel {
    pub name: String,
    pub channel_id: String,
}

/// Which pipeline a category's products run through, resolved once at
/// catalog load time rather than re-derived per product.
#[derive(Debug, Clone)]
pub enum CategoryPipeline {
    /// Channel-scoped search against a fixed reviewer list, single-tier
    /// relevance check.
    Curated { reviewers: Vec<ReviewerChannel> },
    /// General platform search with tiered (relevance, then suitability)
    /// filtering.
    General,
}

#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub pipeline: CategoryPipeline,
    pub products: Vec<ProductConfig>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Look up a category by name.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Find a product anywhere in the catalog, with its owning category.
    #[must_use]
    pub fn find_product(&self, product_name: &str) -> Option<(&Category, &ProductConfig)> {
        self.categories.iter().find_map(|c| {
            c.products
                .iter()
                .find(|p| p.name == product_name)
                .map(|p| (c, p))
        })
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    name: String,
    #[serde(default)]
    reviewers: Vec<ReviewerChannel>,
    products: Vec<ProductConfig>,
}

/// Load and validate the product catalog from a YAML file.
///
/// Categories with a non-empty `reviewers` list resolve to
/// [`CategoryPipeline::Curated`]; all others to [`CategoryPipeline::General`].
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (duplicate category/product names, empty keyword sets,
/// reviewers without channel ids).
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    load_catalog_from_str(&content)
}

/// Parse and validate a catalog from YAML text. See [`load_catalog`].
///
/// # Errors
///
/// Returns `ConfigError` on parse or validation failure.
pub fn load_catalog_from_str(yaml: &str) -> Result<Catalog, ConfigError> {
    let file: CatalogFile = serde_yaml::from_str(yaml)?;
    resolve_catalog(file)
}

fn resolve_catalog(file: CatalogFile) -> Result<Catalog, ConfigError> {
    let mut seen_categories = HashSet::new();

    let mut categories = Vec::with_capacity(file.categories.len());
    for entry in file.categories {
        if entry.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category name must be non-empty".to_string(),
            ));
        }
        if !seen_categories.insert(entry.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category name: '{}'",
                entry.name
            )));
        }

        validate_products(&entry.name, &entry.products)?;
        validate_reviewers(&entry.name, &entry.reviewers)?;

        let pipeline = if entry.reviewers.is_empty() {
            CategoryPipeline::General
        } else {
            CategoryPipeline::Curated {
                reviewers: entry.reviewers,
            }
        };

        categories.push(Category {
            name: entry.name,
            pipeline,
            products: entry.products,
        });
    }

    Ok(Catalog { categories })
}

fn validate_products(category: &str, products: &[ProductConfig]) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    for product in products {
        if product.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{category}' has a product with an empty name"
            )));
        }
        if !seen_names.insert(product.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate product name '{}' in category '{category}'",
                product.name
            )));
        }
        if product.keywords.is_empty() {
            return Err(ConfigError::Validation(format!(
                "product '{}' in category '{category}' has no keywords",
                product.name
            )));
        }
    }
    Ok(())
}

fn validate_reviewers(category: &str, reviewers: &[ReviewerChannel]) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();
    for reviewer in reviewers {
        if reviewer.channel_id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "reviewer '{}' in category '{category}' has an empty channel_id",
                reviewer.name
            )));
        }
        if !seen_ids.insert(reviewer.channel_id.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate reviewer channel_id '{}' in category '{category}'",
                reviewer.channel_id
            )));
        }
    }
    Ok(())
}

/// Filesystem-safe slug: lowercase, spaces and slashes become dashes,
/// everything else non-alphanumeric is dropped.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c == ' ' || c == '/' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
