//! Collection pipeline for categories without curated reviewers.
//!
//! One general platform search per product (keywords joined into the
//! query), then two phases:
//!
//! 1. Filtering, in pool order: idempotency skip, tier-1 relevance and
//!    type, tier-2 suitability. Stops as soon as the full-analysis cap is
//!    filled, so earlier (better-ranked) candidates win the budget.
//! 2. Analysis, in enqueue order: defensive idempotency re-check, full
//!    analysis, persist. Reviewer identity comes from the video's own
//!    channel.

use std::time::Duration;

use revlens_core::{CandidateVideo, ProductConfig};
use revlens_gemini::AnalysisSchema;

use crate::guard;
use crate::persist::persist_analysis;
use crate::summary::RunSummary;
use crate::traits::{AnalysisStore, ReviewModel, VideoSearch};

#[derive(Debug, Clone)]
pub struct GeneralConfig {
    /// Candidates fetched per product, unless the product overrides it.
    pub candidate_pool_size: u32,
    /// Max full analyses per product, unless the product overrides it.
    pub full_analysis_cap: u32,
    /// YouTube search ordering, e.g. `"relevance"`.
    pub order: String,
    /// Relevance-language bias when the product does not set one.
    pub default_relevance_language: String,
    /// Optional region bias for search.
    pub region_code: Option<String>,
    /// Pause after every full-analysis attempt. Zero in tests.
    pub inter_call_delay: Duration,
}

pub struct GeneralSearchPipeline<'a, S: ?Sized, M: ?Sized, D: ?Sized> {
    search: &'a S,
    model: &'a M,
    store: &'a D,
    config: GeneralConfig,
}

impl<'a, S, M, D> GeneralSearchPipeline<'a, S, M, D>
where
    S: VideoSearch + ?Sized,
    M: ReviewModel + ?Sized,
    D: AnalysisStore + ?Sized,
{
    pub fn new(search: &'a S, model: &'a M, store: &'a D, config: GeneralConfig) -> Self {
        Self {
            search,
            model,
            store,
            config,
        }
    }

    /// Runs the tiered pipeline for one product.
    pub async fn run(&self, product: &ProductConfig) -> RunSummary {
        let mut summary = RunSummary::default();

        let pool_size = product
            .candidate_pool_size
            .unwrap_or(self.config.candidate_pool_size);
        let analysis_cap = usize::try_from(
            product
                .full_analysis_cap
                .unwrap_or(self.config.full_analysis_cap),
        )
        .unwrap_or(usize::MAX);
        let language = product
            .search_language
            .as_deref()
            .unwrap_or(&self.config.default_relevance_language);
        let query = product.keywords.join(" ");

        tracing::info!(
            product_name = %product.name,
            query,
            pool_size,
            analysis_cap,
            "starting general-search collection"
        );

        let candidates = self
            .search
            .search_general(
                &query,
                pool_size,
                &self.config.order,
                self.config.region_code.as_deref(),
                Some(language),
            )
            .await;
        if candidates.is_empty() {
            tracing::info!(product_name = %product.name, "no candidates found");
            summary.log(&product.name, "general");
            return summary;
        }
        summary.searched = candidates.len();

        let queue = self
            .filter_candidates(product, &candidates, analysis_cap, &mut summary)
            .await;
        tracing::info!(
            product_name = %product.name,
            suitable = queue.len(),
            "tiered filtering finished"
        );

        for video in queue {
            let attempted = self.analyze_and_persist(product, video, &mut summary).await;
            if attempted {
                tokio::time::sleep(self.config.inter_call_delay).await;
            }
        }

        summary.log(&product.name, "general");
        summary
    }

    /// Phase 1: tiered filtering in pool order, capped.
    async fn filter_candidates<'v>(
        &self,
        product: &ProductConfig,
        candidates: &'v [CandidateVideo],
        analysis_cap: usize,
        summary: &mut RunSummary,
    ) -> Vec<&'v CandidateVideo> {
        let mut queue: Vec<&CandidateVideo> = Vec::new();

        for video in candidates {
            if queue.len() >= analysis_cap {
                tracing::info!(
                    product_name = %product.name,
                    analysis_cap,
                    "analysis cap reached, stopping filtering"
                );
                break;
            }

            if guard::is_already_processed(self.store, &video.video_id, &product.name).await {
                tracing::info!(
                    video_id = %video.video_id,
                    product_name = %product.name,
                    "already analyzed, skipping filtering"
                );
                summary.skipped_existing += 1;
                continue;
            }

            let Some(verdict) = self
                .model
                .classify_tier1(
                    &product.name,
                    &video.title,
                    &video.channel_title,
                    &video.description,
                )
                .await
                .filter(|v| v.is_relevant_to_product)
            else {
                tracing::info!(
                    video_id = %video.video_id,
                    video_title = %video.title,
                    "tier 1: not relevant, skipping"
                );
                summary.rejected_relevance += 1;
                continue;
            };

            let suitable = self
                .model
                .check_suitability(
                    &product.name,
                    &video.title,
                    &video.channel_title,
                    &video.description,
                    verdict.video_type,
                )
                .await;
            if !suitable {
                tracing::info!(
                    video_id = %video.video_id,
                    video_type = %verdict.video_type,
                    "tier 2: not suitable, skipping"
                );
                summary.rejected_suitability += 1;
                continue;
            }

            tracing::info!(
                video_id = %video.video_id,
                video_type = %verdict.video_type,
                "suitable for full analysis"
            );
            queue.push(video);
        }

        queue
    }

    /// Phase 2 step: re-check, analyze, persist. Returns whether an
    /// analysis call was actually made, so the caller only paces after
    /// real model spend.
    async fn analyze_and_persist(
        &self,
        product: &ProductConfig,
        video: &CandidateVideo,
        summary: &mut RunSummary,
    ) -> bool {
        // Filtering can take a while; another run may have gotten here first.
        if guard::is_already_processed(self.store, &video.video_id, &product.name).await {
            tracing::info!(
                video_id = %video.video_id,
                product_name = %product.name,
                "re-checked and already analyzed, skipping full analysis"
            );
            summary.skipped_existing += 1;
            return false;
        }

        match self
            .model
            .analyze_video(
                AnalysisSchema::BusinessSoftware,
                &product.name,
                &video.url,
                &video.title,
                &video.channel_title,
            )
            .await
        {
            Some(analysis_text) => {
                summary.analyzed += 1;
                persist_analysis(
                    self.store,
                    product,
                    video,
                    &video.channel_id,
                    &video.channel_title,
                    &analysis_text,
                    summary,
                )
                .await;
            }
            None => {
                tracing::error!(
                    video_id = %video.video_id,
                    video_title = %video.title,
                    "full analysis produced no usable payload"
                );
                summary.failed += 1;
            }
        }
        true
    }
}

#[cfg(test)]
#[path = "general_test.rs"]
mod tests;
