use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A video returned by platform search, normalized for the pipelines.
///
/// Ephemeral: candidates are filtered in memory and never persisted
/// directly; only the metadata of fully analyzed videos reaches storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateVideo {
    /// Platform video id, unique per platform. Half of the idempotency key
    /// for persisted analyses.
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
    pub channel_id: String,
    pub channel_title: String,
    /// Canonical watch URL, e.g. `https://www.youtube.com/watch?v=<id>`.
    pub url: String,
}

impl CandidateVideo {
    /// Canonical watch URL for a video id.
    #[must_use]
    pub fn watch_url(video_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={video_id}")
    }
}
