use thiserror::Error;

/// Errors surfaced by the generative-model client.
///
/// Only [`GeminiError::RateLimited`] is retried by the governor; everything
/// else is returned immediately so a malformed prompt or revoked key does
/// not burn the retry budget.
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429 from the API. The message carries the raw error body so the
    /// governor can extract a server-suggested retry delay from it.
    #[error("rate limited by generative API: {message}")]
    RateLimited { message: String },

    /// Application-level API error (4xx other than 429, or 5xx).
    #[error("generative API error: {0}")]
    ApiError(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API returned 200 but no candidate text, usually because the
    /// prompt or the video was blocked by a safety filter.
    #[error("empty response for {context}")]
    EmptyResponse {
        context: String,
        feedback: Option<String>,
    },
}
