//! Idempotency guard over the analysis store.

use crate::traits::AnalysisStore;

/// Returns `true` if an analysis already exists for this video/product
/// pair, or if the store could not be reached.
///
/// Failing safe matters here: a model analysis call is far more expensive
/// than re-checking later, so an unreachable store must read as "already
/// processed" rather than triggering duplicate spend.
pub(crate) async fn is_already_processed<S: AnalysisStore + ?Sized>(
    store: &S,
    video_id: &str,
    product_config_name: &str,
) -> bool {
    match store.analysis_exists(video_id, product_config_name).await {
        Ok(exists) => exists,
        Err(err) => {
            tracing::warn!(
                video_id,
                product_config_name,
                error = %err,
                "existence check failed, treating video as already processed"
            );
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::MockStore;

    #[tokio::test]
    async fn reports_existing_analyses() {
        let store = MockStore::with_existing(&[("v1", "Acme CRM")]);
        assert!(is_already_processed(&store, "v1", "Acme CRM").await);
        assert!(!is_already_processed(&store, "v2", "Acme CRM").await);
        assert!(!is_already_processed(&store, "v1", "Other Product").await);
    }

    #[tokio::test]
    async fn store_failure_reads_as_already_processed() {
        let store = MockStore::failing();
        assert!(is_already_processed(&store, "v1", "Acme CRM").await);
    }
}
