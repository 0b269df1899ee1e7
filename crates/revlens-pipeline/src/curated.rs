//! Collection pipeline for categories with curated reviewer channels.
//!
//! For each reviewer, searches their channel for the product name, then per
//! video: idempotency skip, single-tier relevance verdict, full analysis,
//! persist. Reviewer identity on the stored record is the curated entry,
//! not whatever channel the video reports.

use std::time::Duration;

use revlens_core::{ProductConfig, ReviewerChannel};
use revlens_gemini::AnalysisSchema;

use crate::guard;
use crate::persist::persist_analysis;
use crate::summary::RunSummary;
use crate::traits::{AnalysisStore, ReviewModel, VideoSearch};

#[derive(Debug, Clone)]
pub struct CuratedConfig {
    /// Search results requested per reviewer channel.
    pub max_results_per_reviewer: u32,
    /// YouTube search ordering, e.g. `"relevance"`.
    pub order: String,
    /// Pause after every full-analysis attempt. Zero in tests.
    pub inter_call_delay: Duration,
}

pub struct CuratedPipeline<'a, S: ?Sized, M: ?Sized, D: ?Sized> {
    search: &'a S,
    model: &'a M,
    store: &'a D,
    config: CuratedConfig,
}

impl<'a, S, M, D> CuratedPipeline<'a, S, M, D>
where
    S: VideoSearch + ?Sized,
    M: ReviewModel + ?Sized,
    D: AnalysisStore + ?Sized,
{
    pub fn new(search: &'a S, model: &'a M, store: &'a D, config: CuratedConfig) -> Self {
        Self {
            search,
            model,
            store,
            config,
        }
    }

    /// Runs the pipeline for one product across the given reviewers.
    /// Per-video failures are counted, never raised.
    pub async fn run(&self, product: &ProductConfig, reviewers: &[ReviewerChannel]) -> RunSummary {
        let mut summary = RunSummary::default();
        tracing::info!(product_name = %product.name, reviewers = reviewers.len(), "starting curated collection");

        for reviewer in reviewers {
            let videos = self
                .search
                .search_by_channel(
                    &reviewer.channel_id,
                    &product.name,
                    self.config.max_results_per_reviewer,
                    &self.config.order,
                )
                .await;
            if videos.is_empty() {
                tracing::info!(
                    product_name = %product.name,
                    reviewer = %reviewer.name,
                    "no videos found for reviewer"
                );
                continue;
            }
            summary.searched += videos.len();

            for video in &videos {
                if guard::is_already_processed(self.store, &video.video_id, &product.name).await {
                    tracing::info!(
                        video_id = %video.video_id,
                        product_name = %product.name,
                        "already analyzed, skipping"
                    );
                    summary.skipped_existing += 1;
                    continue;
                }

                let relevant = self
                    .model
                    .check_relevance(
                        &product.name,
                        &product.keywords,
                        &video.title,
                        &video.description,
                    )
                    .await;
                if !relevant {
                    tracing::info!(
                        video_id = %video.video_id,
                        video_title = %video.title,
                        "not relevant, skipping"
                    );
                    summary.rejected_relevance += 1;
                    continue;
                }

                match self
                    .model
                    .analyze_video(
                        AnalysisSchema::ConsumerProduct,
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
                            &reviewer.channel_id,
                            &reviewer.name,
                            &analysis_text,
                            &mut summary,
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

                tokio::time::sleep(self.config.inter_call_delay).await;
            }
        }

        summary.log(&product.name, "curated");
        summary
    }
}

#[cfg(test)]
#[path = "curated_test.rs"]
mod tests;
