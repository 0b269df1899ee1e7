//! `YouTube` Data API v3 search client.
//!
//! Wraps `reqwest` with typed response deserialization and the fail-closed
//! contract the pipelines rely on: the public search methods return an empty
//! list on any failure, logging quota and auth problems at the highest
//! severity instead of raising into the batch.

pub mod client;
pub mod error;
mod types;

pub use client::{GeneralSearchOptions, YoutubeClient};
pub use error::YoutubeError;
