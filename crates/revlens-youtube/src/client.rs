//! HTTP client for the `YouTube` Data API v3 `search.list` endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use revlens_core::CandidateVideo;

use crate::error::YoutubeError;
use crate::types::{ApiErrorResponse, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Optional biasing parameters for general (non-channel) search.
#[derive(Debug, Clone, Default)]
pub struct GeneralSearchOptions<'a> {
    /// ISO 3166-1 alpha-2 country code, e.g. `"US"`.
    pub region_code: Option<&'a str>,
    /// ISO 639-1 language code, e.g. `"en"`.
    pub relevance_language: Option<&'a str>,
}

/// Client for `YouTube` video search.
///
/// Use [`YoutubeClient::new`] for production or
/// [`YoutubeClient::with_base_url`] to point at a mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::AccessDenied`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("revlens/0.1 (review-intelligence)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YoutubeError::AccessDenied {
            reason: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Searches a specific channel for videos matching `query`.
    ///
    /// Fails closed: any error is logged and an empty list is returned, so a
    /// search failure degrades one reviewer rather than aborting the batch.
    pub async fn search_by_channel(
        &self,
        channel_id: &str,
        query: &str,
        max_results: u32,
        order: &str,
    ) -> Vec<CandidateVideo> {
        tracing::info!(
            channel_id,
            query,
            max_results,
            order,
            "searching YouTube (channel-scoped)"
        );
        match self
            .search(query, max_results, order, Some(channel_id), None, None)
            .await
        {
            Ok(videos) => {
                tracing::info!(channel_id, query, count = videos.len(), "channel search done");
                videos
            }
            Err(e) => {
                log_search_failure(&e, "channel search");
                Vec::new()
            }
        }
    }

    /// Searches the whole platform for videos matching `query`.
    ///
    /// Fails closed like [`Self::search_by_channel`].
    pub async fn search_general(
        &self,
        query: &str,
        max_results: u32,
        order: &str,
        options: GeneralSearchOptions<'_>,
    ) -> Vec<CandidateVideo> {
        tracing::info!(
            query,
            max_results,
            order,
            region = options.region_code,
            language = options.relevance_language,
            "searching YouTube (general)"
        );
        match self
            .search(
                query,
                max_results,
                order,
                None,
                options.region_code,
                options.relevance_language,
            )
            .await
        {
            Ok(videos) => {
                tracing::info!(query, count = videos.len(), "general search done");
                videos
            }
            Err(e) => {
                log_search_failure(&e, "general search");
                Vec::new()
            }
        }
    }

    /// Result-returning search shared by both public methods.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::QuotaExceeded`] / [`YoutubeError::AccessDenied`] on
    ///   403 responses, by API-reported reason.
    /// - [`YoutubeError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub(crate) async fn search(
        &self,
        query: &str,
        max_results: u32,
        order: &str,
        channel_id: Option<&str>,
        region_code: Option<&str>,
        relevance_language: Option<&str>,
    ) -> Result<Vec<CandidateVideo>, YoutubeError> {
        let mut url = self
            .base_url
            .join("search")
            .map_err(|e| YoutubeError::AccessDenied {
                reason: format!("invalid search URL: {e}"),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("part", "snippet")
                .append_pair("q", query)
                .append_pair("maxResults", &max_results.to_string())
                .append_pair("order", order)
                .append_pair("type", "video")
                .append_pair("key", &self.api_key);
            if let Some(channel_id) = channel_id {
                pairs.append_pair("channelId", channel_id);
            }
            if let Some(region) = region_code {
                pairs.append_pair("regionCode", region);
            }
            if let Some(language) = relevance_language {
                pairs.append_pair("relevanceLanguage", language);
            }
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify_error_status(status.as_u16(), &body));
        }

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
                context: format!("search(q={query})"),
                source: e,
            })?;

        Ok(parsed
            .items
            .into_iter()
            .filter(|item| item.id.kind == "youtube#video")
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                let url = CandidateVideo::watch_url(&video_id);
                Some(CandidateVideo {
                    video_id,
                    title: item.snippet.title,
                    description: item.snippet.description,
                    published_at: item.snippet.published_at,
                    channel_id: item.snippet.channel_id,
                    channel_title: item.snippet.channel_title,
                    url,
                })
            })
            .collect())
    }
}

/// Map a non-2xx status plus body to a typed error, reading the API's
/// `errors[].reason` field for 403s.
fn classify_error_status(status: u16, body: &str) -> YoutubeError {
    if status == 403 {
        let reason = serde_json::from_str::<ApiErrorResponse>(body)
            .ok()
            .and_then(|e| e.error.errors.into_iter().next())
            .map(|d| d.reason)
            .unwrap_or_default();
        return match reason.as_str() {
            "quotaExceeded" => YoutubeError::QuotaExceeded,
            _ => YoutubeError::AccessDenied { reason },
        };
    }
    YoutubeError::UnexpectedStatus { status }
}

/// Quota exhaustion and auth failures are the highest-severity conditions a
/// run can hit without aborting; everything else is an ordinary error.
fn log_search_failure(err: &YoutubeError, stage: &str) {
    match err {
        YoutubeError::QuotaExceeded => {
            tracing::error!(stage, "CRITICAL: YouTube API daily quota exceeded");
        }
        YoutubeError::AccessDenied { reason } => {
            tracing::error!(
                stage,
                reason,
                "CRITICAL: YouTube API key invalid or access denied"
            );
        }
        other => {
            tracing::error!(stage, error = %other, "YouTube search failed");
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
