//! Report synthesis over persisted review analyses.
//!
//! Four report kinds share one flow: load the analyses for a set of
//! products, render a two-part synthesis prompt, call the model, and write
//! the textual summary plus (when present) the validated structured block
//! under `<reports_dir>/<kind>/<slug>/`.

pub mod error;
pub mod format;
pub mod generate;
mod prompts;
mod writer;

pub use error::ReportError;
pub use format::{format_analyses_block, product_detail_line};
pub use generate::Reporter;
pub use writer::ReportPaths;
