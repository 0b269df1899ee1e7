//! Shared persistence step for both pipelines.

use revlens_core::{CandidateVideo, ProductConfig};
use revlens_db::{InsertOutcome, NewAnalysisRecord};

use crate::summary::RunSummary;
use crate::traits::AnalysisStore;

/// Parses the analysis payload and writes one record, updating the run
/// summary. Parse and store failures are logged and counted, never raised.
pub(crate) async fn persist_analysis<D: AnalysisStore + ?Sized>(
    store: &D,
    product: &ProductConfig,
    video: &CandidateVideo,
    reviewer_channel_id: &str,
    reviewer_name: &str,
    analysis_text: &str,
    summary: &mut RunSummary,
) {
    let analysis: serde_json::Value = match serde_json::from_str(analysis_text) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(
                video_id = %video.video_id,
                product_name = %product.name,
                error = %err,
                "analysis payload is not valid JSON, not persisting"
            );
            summary.failed += 1;
            return;
        }
    };

    let record = NewAnalysisRecord {
        video_id: &video.video_id,
        product_config_name: &product.name,
        product_brand: &product.brand,
        product_generation: product.generation.as_deref(),
        product_release_year: product.release_year,
        video_url: &video.url,
        video_title: &video.title,
        video_published_at: video.published_at,
        reviewer_channel_id,
        reviewer_name,
        analysis: &analysis,
    };

    match store.insert(record).await {
        Ok(InsertOutcome::Inserted(id)) => {
            tracing::info!(
                video_id = %video.video_id,
                product_name = %product.name,
                record_id = id,
                "analysis persisted"
            );
            summary.persisted += 1;
        }
        Ok(InsertOutcome::Duplicate) => {
            tracing::warn!(
                video_id = %video.video_id,
                product_name = %product.name,
                "analysis already persisted by another run"
            );
            summary.duplicate_inserts += 1;
        }
        Err(err) => {
            tracing::error!(
                video_id = %video.video_id,
                product_name = %product.name,
                error = %err,
                "failed to persist analysis"
            );
            summary.failed += 1;
        }
    }
}
