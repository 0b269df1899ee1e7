/// Per-product accounting for one pipeline run, logged at completion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Candidate videos returned by search.
    pub searched: usize,
    /// Skipped by the idempotency guard before any model call.
    pub skipped_existing: usize,
    /// Rejected by the relevance verdict (curated check or tier 1).
    pub rejected_relevance: usize,
    /// Rejected by the tier-2 suitability check.
    pub rejected_suitability: usize,
    /// Full analyses that produced a usable payload.
    pub analyzed: usize,
    /// Records actually written to the store.
    pub persisted: usize,
    /// Inserts that hit an existing row (race with another run).
    pub duplicate_inserts: usize,
    /// Analysis or persistence failures.
    pub failed: usize,
}

impl RunSummary {
    pub(crate) fn log(&self, product_name: &str, pipeline: &str) {
        tracing::info!(
            product_name,
            pipeline,
            searched = self.searched,
            skipped_existing = self.skipped_existing,
            rejected_relevance = self.rejected_relevance,
            rejected_suitability = self.rejected_suitability,
            analyzed = self.analyzed,
            persisted = self.persisted,
            duplicate_inserts = self.duplicate_inserts,
            failed = self.failed,
            "collection run finished"
        );
    }
}
