//! Scripted collaborator mocks for pipeline state-machine tests.
//!
//! Mocks are keyed by video title; [`video`] sets the title equal to the
//! video id so tests read naturally.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use revlens_core::{CandidateVideo, ProductConfig};
use revlens_db::{InsertOutcome, NewAnalysisRecord};
use revlens_gemini::{AnalysisSchema, Tier1Classification, VideoType};

use crate::traits::{AnalysisStore, ReviewModel, StoreError, VideoSearch};

pub(crate) fn video(id: &str) -> CandidateVideo {
    CandidateVideo {
        video_id: id.to_owned(),
        title: id.to_owned(),
        description: "a detailed hands-on review".to_owned(),
        published_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
        channel_id: format!("UC-{id}"),
        channel_title: format!("Channel {id}"),
        url: CandidateVideo::watch_url(id),
    }
}

pub(crate) fn product(name: &str) -> ProductConfig {
    ProductConfig {
        name: name.to_owned(),
        brand: "Acme".to_owned(),
        generation: None,
        release_year: Some(2024),
        keywords: vec![name.to_owned(), "review".to_owned()],
        search_language: None,
        candidate_pool_size: None,
        full_analysis_cap: None,
    }
}

#[derive(Default)]
pub(crate) struct MockSearch {
    pub videos: Vec<CandidateVideo>,
    /// `(query, max_results)` per search call.
    pub requests: Mutex<Vec<(String, u32)>>,
}

impl MockSearch {
    pub(crate) fn returning(videos: Vec<CandidateVideo>) -> Self {
        Self {
            videos,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl VideoSearch for MockSearch {
    async fn search_by_channel(
        &self,
        _channel_id: &str,
        query: &str,
        max_results: u32,
        _order: &str,
    ) -> Vec<CandidateVideo> {
        self.requests
            .lock()
            .unwrap()
            .push((query.to_owned(), max_results));
        self.videos.clone()
    }

    async fn search_general(
        &self,
        query: &str,
        max_results: u32,
        _order: &str,
        _region_code: Option<&str>,
        _relevance_language: Option<&str>,
    ) -> Vec<CandidateVideo> {
        self.requests
            .lock()
            .unwrap()
            .push((query.to_owned(), max_results));
        self.videos.clone()
    }
}

/// Scripted model: verdicts per video title, every call recorded as
/// `"<op>:<title>"` in order.
#[derive(Default)]
pub(crate) struct MockModel {
    pub relevant: HashSet<String>,
    pub suitable: HashSet<String>,
    pub fail_analysis: HashSet<String>,
    pub calls: Mutex<Vec<String>>,
}

impl MockModel {
    pub(crate) fn record(&self, op: &str, title: &str) {
        self.calls.lock().unwrap().push(format!("{op}:{title}"));
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewModel for MockModel {
    async fn check_relevance(
        &self,
        _product_name: &str,
        _keywords: &[String],
        video_title: &str,
        _video_description: &str,
    ) -> bool {
        self.record("relevance", video_title);
        self.relevant.contains(video_title)
    }

    async fn classify_tier1(
        &self,
        _product_name: &str,
        video_title: &str,
        _channel_title: &str,
        _video_description: &str,
    ) -> Option<Tier1Classification> {
        self.record("tier1", video_title);
        Some(Tier1Classification {
            is_relevant_to_product: self.relevant.contains(video_title),
            video_type: VideoType::InDepthReview,
        })
    }

    async fn check_suitability(
        &self,
        _product_name: &str,
        video_title: &str,
        _channel_title: &str,
        _video_description: &str,
        _video_type: VideoType,
    ) -> bool {
        self.record("tier2", video_title);
        self.suitable.contains(video_title)
    }

    async fn analyze_video(
        &self,
        _schema: AnalysisSchema,
        _product_name: &str,
        _video_url: &str,
        video_title: &str,
        _channel_title: &str,
    ) -> Option<String> {
        self.record("analyze", video_title);
        if self.fail_analysis.contains(video_title) {
            None
        } else {
            Some(format!("{{\"video\": \"{video_title}\"}}"))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InsertedRecord {
    pub video_id: String,
    pub product_config_name: String,
    pub reviewer_channel_id: String,
    pub reviewer_name: String,
}

#[derive(Default)]
pub(crate) struct MockStore {
    existing: HashSet<(String, String)>,
    fail_exists: bool,
    /// When non-empty, each existence check pops the front as its answer,
    /// overriding `existing`.
    exists_script: Mutex<VecDeque<bool>>,
    pub inserted: Mutex<Vec<InsertedRecord>>,
}

impl MockStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_existing(pairs: &[(&str, &str)]) -> Self {
        Self {
            existing: pairs
                .iter()
                .map(|(v, p)| ((*v).to_owned(), (*p).to_owned()))
                .collect(),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail_exists: true,
            ..Self::default()
        }
    }

    pub(crate) fn scripted_exists(script: &[bool]) -> Self {
        Self {
            exists_script: Mutex::new(script.iter().copied().collect()),
            ..Self::default()
        }
    }

    pub(crate) fn inserted(&self) -> Vec<InsertedRecord> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisStore for MockStore {
    async fn analysis_exists(
        &self,
        video_id: &str,
        product_config_name: &str,
    ) -> Result<bool, StoreError> {
        if self.fail_exists {
            return Err(StoreError("connection refused".to_owned()));
        }
        if let Some(answer) = self.exists_script.lock().unwrap().pop_front() {
            return Ok(answer);
        }
        Ok(self
            .existing
            .contains(&(video_id.to_owned(), product_config_name.to_owned())))
    }

    async fn insert(&self, record: NewAnalysisRecord<'_>) -> Result<InsertOutcome, StoreError> {
        let key = (
            record.video_id.to_owned(),
            record.product_config_name.to_owned(),
        );
        if self.existing.contains(&key) {
            return Ok(InsertOutcome::Duplicate);
        }
        let mut inserted = self.inserted.lock().unwrap();
        inserted.push(InsertedRecord {
            video_id: record.video_id.to_owned(),
            product_config_name: record.product_config_name.to_owned(),
            reviewer_channel_id: record.reviewer_channel_id.to_owned(),
            reviewer_name: record.reviewer_name.to_owned(),
        });
        Ok(InsertOutcome::Inserted(i64::try_from(inserted.len()).unwrap()))
    }
}
