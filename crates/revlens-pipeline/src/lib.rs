//! Collection pipelines: search, idempotency guard, tiered filtering, full
//! analysis, persistence.
//!
//! Two pipelines share the same collaborator seams. Curated categories run
//! channel-scoped searches against a fixed reviewer list with a single
//! relevance check; everything else runs one general search per product
//! through tier-1 relevance/type and tier-2 suitability filtering, bounded
//! by a per-product full-analysis cap. Both are sequential by design: the
//! model quota is the scarce resource, not wall-clock time.

mod curated;
mod general;
mod guard;
mod persist;
mod summary;
mod traits;

#[cfg(test)]
mod testkit;

pub use curated::{CuratedConfig, CuratedPipeline};
pub use general::{GeneralConfig, GeneralSearchPipeline};
pub use summary::RunSummary;
pub use traits::{AnalysisStore, PgAnalysisStore, ReviewModel, StoreError, VideoSearch};
