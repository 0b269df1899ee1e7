use thiserror::Error;

/// Errors surfaced by the internal (Result-returning) search calls.
///
/// The public client methods fail closed and never expose these to
/// pipelines; they exist for tests and for severity-aware logging.
#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Daily API quota exhausted. Logged critical; the run degrades to
    /// empty search results rather than aborting.
    #[error("YouTube API daily quota exceeded")]
    QuotaExceeded,

    /// API key invalid or access denied.
    #[error("YouTube API access denied: {reason}")]
    AccessDenied { reason: String },

    #[error("unexpected HTTP status {status} from YouTube API")]
    UnexpectedStatus { status: u16 },
}
