use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
pub(crate) fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;
    let youtube_api_key = require("YOUTUBE_API_KEY")?;
    let gemini_api_key = require("GEMINI_API_KEY")?;

    let env = parse_environment(&or_default("REVLENS_ENV", "development"));
    let log_level = or_default("REVLENS_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default("REVLENS_CATALOG_PATH", "./config/catalog.yaml"));
    let reports_dir = PathBuf::from(or_default("REVLENS_REPORTS_DIR", "./reports"));

    let db_max_connections = parse_u32("REVLENS_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("REVLENS_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("REVLENS_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    // Full-analysis calls reference whole videos and can be slow to resolve.
    let http_request_timeout_secs = parse_u64("REVLENS_HTTP_TIMEOUT_SECS", "180")?;

    let gemini_model = or_default("REVLENS_GEMINI_MODEL", "gemini-2.0-flash");
    let gemini_max_retries = parse_u32("REVLENS_GEMINI_MAX_RETRIES", "3")?;
    let gemini_backoff_base_secs = parse_u64("REVLENS_GEMINI_BACKOFF_BASE_SECS", "10")?;
    let inter_call_delay_secs = parse_u64("REVLENS_INTER_CALL_DELAY_SECS", "5")?;

    let curated_max_results = parse_u32("REVLENS_CURATED_MAX_RESULTS", "5")?;
    let candidate_pool_size = parse_u32("REVLENS_CANDIDATE_POOL_SIZE", "50")?;
    let full_analysis_cap = parse_u32("REVLENS_FULL_ANALYSIS_CAP", "7")?;
    let video_order = or_default("REVLENS_VIDEO_ORDER", "relevance");
    let default_search_language = or_default("REVLENS_SEARCH_LANGUAGE", "en");
    let region_code = lookup("REVLENS_REGION_CODE").ok();

    Ok(AppConfig {
        database_url,
        youtube_api_key,
        gemini_api_key,
        env,
        log_level,
        catalog_path,
        reports_dir,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        http_request_timeout_secs,
        gemini_model,
        gemini_max_retries,
        gemini_backoff_base_secs,
        inter_call_delay_secs,
        curated_max_results,
        candidate_pool_size,
        full_analysis_cap,
        video_order,
        default_search_language,
        region_code,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
pub(crate) fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
