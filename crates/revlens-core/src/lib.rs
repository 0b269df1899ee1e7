//! Shared configuration and domain types for revlens.
//!
//! Holds the env-driven application config, the YAML product catalog
//! (products, curated reviewer lists, and the per-category pipeline
//! resolution), and the `CandidateVideo` search-result type shared by the
//! search client and the pipelines.

use thiserror::Error;

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod video;

#[cfg(test)]
mod config_test;

pub use app_config::{AppConfig, Environment};
pub use catalog::{
    load_catalog, load_catalog_from_str, slugify, Catalog, Category, CategoryPipeline,
    ProductConfig, ReviewerChannel,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use video::CandidateVideo;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
