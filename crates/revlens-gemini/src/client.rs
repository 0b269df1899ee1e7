//! HTTP client for the Generative Language `generateContent` endpoint.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GeminiError;
use crate::prompts::{
    self, snippet, BUSINESS_JSON_STRUCTURE, CONSUMER_JSON_STRUCTURE, FULL_ANALYSIS_TEMPLATE,
    RELEVANCE_CHECK_TEMPLATE, TIER1_CLASSIFICATION_TEMPLATE, TIER2_SUITABILITY_TEMPLATE,
};
use crate::retry::retry_on_rate_limit;
use crate::synthesis::{parse_synthesis_response, SynthesisResult};
use crate::template::{render_plain, render_template};
use crate::types::{
    ApiErrorResponse, Content, GenerateRequest, GenerateResponse, GenerationConfig, Part,
    Tier1Classification, VideoType,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

/// Which analysis structure the model is asked to fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSchema {
    /// Consumer-electronics review schema (feature sentiment, pricing,
    /// non-verbal reviewer cues).
    ConsumerProduct,
    /// Business-software review schema (modules, UX, implementation,
    /// target business profile).
    BusinessSoftware,
}

impl AnalysisSchema {
    fn structure(self) -> &'static str {
        match self {
            Self::ConsumerProduct => CONSUMER_JSON_STRUCTURE,
            Self::BusinessSoftware => BUSINESS_JSON_STRUCTURE,
        }
    }
}

/// Client for the generative model behind relevance filtering, full video
/// analysis, and report synthesis.
///
/// All calls go through the rate-limit retry governor. The filtering and
/// analysis methods never surface errors to callers: a failed call is
/// logged and collapses to the conservative verdict (`false` / `None`),
/// so one bad video cannot abort a collection batch.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    model: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl GeminiClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, GeminiError> {
        Self::with_base_url(
            api_key,
            model,
            timeout_secs,
            max_retries,
            backoff_base_secs,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeminiError::ApiError`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("revlens/0.1 (review-intelligence)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| GeminiError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            model: model.to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Single-tier relevance verdict for a curated-reviewer video.
    ///
    /// `true` only when the model answers exactly `YES`; model errors and
    /// any other answer count as not relevant.
    pub async fn check_relevance(
        &self,
        product_name: &str,
        keywords: &[String],
        video_title: &str,
        video_description: &str,
    ) -> bool {
        let keyword_list = keywords.join(", ");
        let prompt = render_template(
            RELEVANCE_CHECK_TEMPLATE,
            &[
                ("video_title", video_title),
                (
                    "video_description",
                    snippet(video_description, prompts::RELEVANCE_DESCRIPTION_CHARS),
                ),
                ("product_name", product_name),
                ("product_keywords", &keyword_list),
            ],
        );
        let request = text_request(prompt, None);
        let context = format!("relevance: {}", snippet(video_title, 30));
        match self.generate(&request, &context).await {
            Ok(text) => {
                let decision = text.trim().to_uppercase();
                tracing::info!(video_title, decision, "relevance verdict");
                decision == "YES"
            }
            Err(err) => {
                tracing::error!(video_title, error = %err, "relevance check failed");
                false
            }
        }
    }

    /// Tier-1 classification: product relevance plus video type.
    ///
    /// `None` on model error, empty response, or a reply that does not
    /// match the strict two-key JSON shape; callers treat `None` as not
    /// relevant.
    pub async fn classify_tier1(
        &self,
        product_name: &str,
        video_title: &str,
        channel_title: &str,
        video_description: &str,
    ) -> Option<Tier1Classification> {
        let prompt = render_template(
            TIER1_CLASSIFICATION_TEMPLATE,
            &[
                ("product_name", product_name),
                ("video_title", video_title),
                ("channel_title", channel_title),
                (
                    "video_description",
                    snippet(video_description, prompts::DESCRIPTION_SNIPPET_CHARS),
                ),
            ],
        );
        let request = text_request(
            prompt,
            Some(GenerationConfig {
                response_mime_type: Some("application/json".to_owned()),
                temperature: Some(0.1),
                max_output_tokens: Some(100),
            }),
        );
        let context = format!("tier1: {}", snippet(video_title, 30));
        let text = match self.generate(&request, &context).await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(video_title, error = %err, "tier-1 classification failed");
                return None;
            }
        };
        match serde_json::from_str::<Tier1Classification>(&text) {
            Ok(classification) => {
                tracing::info!(
                    video_title,
                    relevant = classification.is_relevant_to_product,
                    video_type = %classification.video_type,
                    "tier-1 verdict"
                );
                Some(classification)
            }
            Err(err) => {
                tracing::warn!(video_title, error = %err, raw = %snippet(&text, 200), "tier-1 reply did not match expected shape");
                None
            }
        }
    }

    /// Tier-2 suitability check, conditioned on the tier-1 video type.
    ///
    /// `true` only on the exact token `YES_SUITABLE` (after trimming and
    /// uppercasing); anything else, including errors, is unsuitable.
    pub async fn check_suitability(
        &self,
        product_name: &str,
        video_title: &str,
        channel_title: &str,
        video_description: &str,
        video_type: VideoType,
    ) -> bool {
        let prompt = render_template(
            TIER2_SUITABILITY_TEMPLATE,
            &[
                ("product_name", product_name),
                ("video_title", video_title),
                ("channel_title", channel_title),
                (
                    "video_description",
                    snippet(video_description, prompts::DESCRIPTION_SNIPPET_CHARS),
                ),
                ("video_type", video_type.label()),
            ],
        );
        let request = text_request(
            prompt,
            Some(GenerationConfig {
                response_mime_type: None,
                temperature: Some(0.1),
                max_output_tokens: Some(20),
            }),
        );
        let context = format!("tier2: {}", snippet(video_title, 30));
        match self.generate(&request, &context).await {
            Ok(text) => {
                let decision = text.trim().to_uppercase();
                tracing::info!(video_title, decision, "tier-2 verdict");
                decision == "YES_SUITABLE"
            }
            Err(err) => {
                tracing::error!(video_title, error = %err, "tier-2 suitability check failed");
                false
            }
        }
    }

    /// Full video analysis: sends the video as a file-data part plus the
    /// analysis prompt, expecting a single JSON object back.
    ///
    /// The reply is accepted only if the trimmed text starts with `{` and
    /// ends with `}`; deep validation happens when the record is stored as
    /// JSONB. Returns `None` on any failure.
    pub async fn analyze_video(
        &self,
        schema: AnalysisSchema,
        product_name: &str,
        video_url: &str,
        video_title: &str,
        channel_title: &str,
    ) -> Option<String> {
        let structure = render_template(
            schema.structure(),
            &[
                ("video_url", video_url),
                ("video_title", video_title),
                ("channel_name", channel_title),
                ("product_name", product_name),
            ],
        );
        let prompt = render_plain(
            FULL_ANALYSIS_TEMPLATE,
            &[
                ("video_url", video_url),
                ("product_name", product_name),
                ("json_structure_request", &structure),
            ],
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part::video(video_url), Part::text(prompt)],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_owned()),
                temperature: Some(0.25),
                max_output_tokens: None,
            }),
        };
        let context = format!("full analysis: {video_url}");
        tracing::info!(video_url, product_name, "requesting full video analysis");
        let text = match self.generate(&request, &context).await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(video_url, error = %err, "full analysis failed");
                return None;
            }
        };
        let trimmed = text.trim();
        if trimmed.starts_with('{') && trimmed.ends_with('}') {
            Some(text)
        } else {
            tracing::warn!(
                video_url,
                raw = %snippet(trimmed, 200),
                "analysis reply is not a JSON object, discarding"
            );
            None
        }
    }

    /// Sends a fully rendered synthesis prompt and splits the reply into
    /// summary and structured block. Model errors collapse to an empty
    /// result so report generation can report the gap instead of aborting.
    pub async fn synthesize(&self, prompt: String, context: &str) -> SynthesisResult {
        tracing::info!(context, prompt_chars = prompt.len(), "requesting synthesis");
        let request = text_request(
            prompt,
            Some(GenerationConfig {
                response_mime_type: None,
                temperature: Some(0.3),
                max_output_tokens: None,
            }),
        );
        match self.generate(&request, context).await {
            Ok(text) => parse_synthesis_response(&text),
            Err(err) => {
                tracing::error!(context, error = %err, "synthesis call failed");
                SynthesisResult::default()
            }
        }
    }

    /// One governed `generateContent` call; shared by every public method.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::RateLimited`] once the retry budget is spent.
    /// - [`GeminiError::ApiError`] for other non-2xx responses.
    /// - [`GeminiError::EmptyResponse`] when no candidate text came back.
    /// - [`GeminiError::Http`] / [`GeminiError::Deserialize`] for transport
    ///   and shape failures.
    pub(crate) async fn generate(
        &self,
        request: &GenerateRequest,
        context: &str,
    ) -> Result<String, GeminiError> {
        let mut url = self
            .base_url
            .join(&format!("models/{}:generateContent", self.model))
            .map_err(|e| GeminiError::ApiError(format!("invalid model URL: {e}")))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);

        retry_on_rate_limit(self.max_retries, self.backoff_base_secs, context, || {
            self.generate_once(&url, request, context)
        })
        .await
    }

    async fn generate_once(
        &self,
        url: &Url,
        request: &GenerateRequest,
        context: &str,
    ) -> Result<String, GeminiError> {
        let response = self.client.post(url.clone()).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.as_u16() == 429 {
            return Err(GeminiError::RateLimited { message: body });
        }
        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map_or_else(|_| format!("HTTP {status}"), |e| e.error.message);
            return Err(GeminiError::ApiError(message));
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| GeminiError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;

        let text: String = parsed
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GeminiError::EmptyResponse {
                context: context.to_owned(),
                feedback: parsed.prompt_feedback.map(|v| v.to_string()),
            });
        }
        Ok(text)
    }
}

fn text_request(prompt: String, generation_config: Option<GenerationConfig>) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part::text(prompt)],
        }],
        generation_config,
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
