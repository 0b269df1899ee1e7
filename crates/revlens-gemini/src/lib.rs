//! Generative-model client for review filtering, full video analysis, and
//! report synthesis.
//!
//! Every call is routed through a rate-limit-aware retry governor that
//! honors server-suggested delays from 429 bodies and otherwise backs off
//! exponentially with jitter. The filtering operations are fail-closed:
//! model errors collapse to "not relevant" / "unsuitable" so one flaky
//! call degrades a single video instead of aborting a batch.

mod client;
mod error;
mod prompts;
mod retry;
mod synthesis;
mod template;
mod types;

pub use client::{AnalysisSchema, GeminiClient};
pub use error::GeminiError;
pub use synthesis::{parse_synthesis_response, SynthesisResult};
pub use template::{render_plain, render_template};
pub use types::{Tier1Classification, VideoType};
