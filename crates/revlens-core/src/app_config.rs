use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Application configuration, loaded from environment variables at startup.
///
/// API keys and the database URL are redacted in the `Debug` output.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub youtube_api_key: String,
    pub gemini_api_key: String,
    pub env: Environment,
    pub log_level: String,
    pub catalog_path: PathBuf,
    pub reports_dir: PathBuf,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub http_request_timeout_secs: u64,
    /// Model identifier passed to the Generative Language API.
    pub gemini_model: String,
    /// Additional attempts after the first rate-limited failure.
    pub gemini_max_retries: u32,
    /// Base for the exponential backoff fallback, in seconds.
    pub gemini_backoff_base_secs: u64,
    /// Pause between successive full-analysis calls within one run.
    pub inter_call_delay_secs: u64,
    /// Max results per curated channel-scoped search.
    pub curated_max_results: u32,
    /// Default candidate pool size for general search (per-product override wins).
    pub candidate_pool_size: u32,
    /// Default cap on full-analysis calls per product (per-product override wins).
    pub full_analysis_cap: u32,
    /// YouTube search result ordering (`relevance`, `date`, `viewCount`, ...).
    pub video_order: String,
    /// Default relevance-language bias for general search.
    pub default_search_language: String,
    /// Optional ISO 3166-1 region bias for general search.
    pub region_code: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("catalog_path", &self.catalog_path)
            .field("reports_dir", &self.reports_dir)
            .field("database_url", &"[redacted]")
            .field("youtube_api_key", &"[redacted]")
            .field("gemini_api_key", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("http_request_timeout_secs", &self.http_request_timeout_secs)
            .field("gemini_model", &self.gemini_model)
            .field("gemini_max_retries", &self.gemini_max_retries)
            .field("gemini_backoff_base_secs", &self.gemini_backoff_base_secs)
            .field("inter_call_delay_secs", &self.inter_call_delay_secs)
            .field("curated_max_results", &self.curated_max_results)
            .field("candidate_pool_size", &self.candidate_pool_size)
            .field("full_analysis_cap", &self.full_analysis_cap)
            .field("video_order", &self.video_order)
            .field("default_search_language", &self.default_search_language)
            .field("region_code", &self.region_code)
            .finish()
    }
}
