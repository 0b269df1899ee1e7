//! Collaborator seams for the collection pipelines.
//!
//! Pipelines depend on these traits instead of the concrete clients so
//! state-machine behavior (idempotency, tier gating, cap enforcement) is
//! testable with scripted mocks. Production wiring implements them on the
//! real YouTube client, model client, and Postgres pool.

use async_trait::async_trait;
use revlens_core::CandidateVideo;
use revlens_db::{InsertOutcome, NewAnalysisRecord};
use revlens_gemini::{AnalysisSchema, Tier1Classification, VideoType};
use sqlx::PgPool;
use thiserror::Error;

/// Failure talking to the analysis store. The idempotency guard treats any
/// store failure as "already processed".
#[derive(Debug, Error)]
#[error("analysis store error: {0}")]
pub struct StoreError(pub String);

/// Video search, fail-closed: implementations return an empty list on error.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search_by_channel(
        &self,
        channel_id: &str,
        query: &str,
        max_results: u32,
        order: &str,
    ) -> Vec<CandidateVideo>;

    async fn search_general(
        &self,
        query: &str,
        max_results: u32,
        order: &str,
        region_code: Option<&str>,
        relevance_language: Option<&str>,
    ) -> Vec<CandidateVideo>;
}

/// The model-backed filtering and analysis operations. All fail-closed.
#[async_trait]
pub trait ReviewModel: Send + Sync {
    async fn check_relevance(
        &self,
        product_name: &str,
        keywords: &[String],
        video_title: &str,
        video_description: &str,
    ) -> bool;

    async fn classify_tier1(
        &self,
        product_name: &str,
        video_title: &str,
        channel_title: &str,
        video_description: &str,
    ) -> Option<Tier1Classification>;

    async fn check_suitability(
        &self,
        product_name: &str,
        video_title: &str,
        channel_title: &str,
        video_description: &str,
        video_type: VideoType,
    ) -> bool;

    async fn analyze_video(
        &self,
        schema: AnalysisSchema,
        product_name: &str,
        video_url: &str,
        video_title: &str,
        channel_title: &str,
    ) -> Option<String>;
}

/// Persistence for completed analyses.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn analysis_exists(
        &self,
        video_id: &str,
        product_config_name: &str,
    ) -> Result<bool, StoreError>;

    async fn insert(&self, record: NewAnalysisRecord<'_>) -> Result<InsertOutcome, StoreError>;
}

#[async_trait]
impl VideoSearch for revlens_youtube::YoutubeClient {
    async fn search_by_channel(
        &self,
        channel_id: &str,
        query: &str,
        max_results: u32,
        order: &str,
    ) -> Vec<CandidateVideo> {
        Self::search_by_channel(self, channel_id, query, max_results, order).await
    }

    async fn search_general(
        &self,
        query: &str,
        max_results: u32,
        order: &str,
        region_code: Option<&str>,
        relevance_language: Option<&str>,
    ) -> Vec<CandidateVideo> {
        Self::search_general(
            self,
            query,
            max_results,
            order,
            revlens_youtube::GeneralSearchOptions {
                region_code,
                relevance_language,
            },
        )
        .await
    }
}

#[async_trait]
impl ReviewModel for revlens_gemini::GeminiClient {
    async fn check_relevance(
        &self,
        product_name: &str,
        keywords: &[String],
        video_title: &str,
        video_description: &str,
    ) -> bool {
        Self::check_relevance(self, product_name, keywords, video_title, video_description).await
    }

    async fn classify_tier1(
        &self,
        product_name: &str,
        video_title: &str,
        channel_title: &str,
        video_description: &str,
    ) -> Option<Tier1Classification> {
        Self::classify_tier1(self, product_name, video_title, channel_title, video_description)
            .await
    }

    async fn check_suitability(
        &self,
        product_name: &str,
        video_title: &str,
        channel_title: &str,
        video_description: &str,
        video_type: VideoType,
    ) -> bool {
        Self::check_suitability(
            self,
            product_name,
            video_title,
            channel_title,
            video_description,
            video_type,
        )
        .await
    }

    async fn analyze_video(
        &self,
        schema: AnalysisSchema,
        product_name: &str,
        video_url: &str,
        video_title: &str,
        channel_title: &str,
    ) -> Option<String> {
        Self::analyze_video(self, schema, product_name, video_url, video_title, channel_title)
            .await
    }
}

/// Postgres-backed analysis store over the shared pool.
pub struct PgAnalysisStore {
    pool: PgPool,
}

impl PgAnalysisStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisStore for PgAnalysisStore {
    async fn analysis_exists(
        &self,
        video_id: &str,
        product_config_name: &str,
    ) -> Result<bool, StoreError> {
        revlens_db::analysis_exists(&self.pool, video_id, product_config_name)
            .await
            .map_err(|e| StoreError(e.to_string()))
    }

    async fn insert(&self, record: NewAnalysisRecord<'_>) -> Result<InsertOutcome, StoreError> {
        revlens_db::insert_analysis_record(&self.pool, &record)
            .await
            .map_err(|e| StoreError(e.to_string()))
    }
}
