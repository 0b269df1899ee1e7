use std::time::Duration;

use super::{GeneralConfig, GeneralSearchPipeline};
use crate::testkit::{product, video, MockModel, MockSearch, MockStore};

fn test_config() -> GeneralConfig {
    GeneralConfig {
        candidate_pool_size: 50,
        full_analysis_cap: 7,
        order: "relevance".to_owned(),
        default_relevance_language: "en".to_owned(),
        region_code: None,
        inter_call_delay: Duration::ZERO,
    }
}

#[tokio::test]
async fn tier_gating_rejects_at_the_right_stage() {
    // v1 fails tier 1, v2 passes tier 1 but fails tier 2, v3 passes both.
    let search = MockSearch::returning(vec![video("v1"), video("v2"), video("v3")]);
    let model = MockModel {
        relevant: ["v2".to_owned(), "v3".to_owned()].into(),
        suitable: ["v3".to_owned()].into(),
        ..MockModel::default()
    };
    let store = MockStore::new();

    let pipeline = GeneralSearchPipeline::new(&search, &model, &store, test_config());
    let summary = pipeline.run(&product("Acme CRM")).await;

    assert_eq!(summary.rejected_relevance, 1);
    assert_eq!(summary.rejected_suitability, 1);
    assert_eq!(summary.analyzed, 1);
    assert_eq!(summary.persisted, 1);

    let calls = model.calls();
    assert!(!calls.contains(&"tier2:v1".to_owned()), "tier 1 reject must not reach tier 2");
    assert!(!calls.contains(&"analyze:v2".to_owned()), "tier 2 reject must not be analyzed");
    assert_eq!(store.inserted()[0].video_id, "v3");
}

#[tokio::test]
async fn cap_is_filled_in_pool_order_and_stops_filtering() {
    let search = MockSearch::returning(vec![
        video("v1"),
        video("v2"),
        video("v3"),
        video("v4"),
        video("v5"),
    ]);
    let all: std::collections::HashSet<String> =
        (1..=5).map(|i| format!("v{i}")).collect();
    let model = MockModel {
        relevant: all.clone(),
        suitable: all,
        ..MockModel::default()
    };
    let store = MockStore::new();

    let mut config = test_config();
    config.full_analysis_cap = 2;
    let pipeline = GeneralSearchPipeline::new(&search, &model, &store, config);
    let summary = pipeline.run(&product("Acme CRM")).await;

    assert_eq!(summary.analyzed, 2);
    let inserted: Vec<String> = store.inserted().iter().map(|r| r.video_id.clone()).collect();
    assert_eq!(inserted, vec!["v1", "v2"], "earlier pool positions win the budget");

    let tier1_calls = model.calls().iter().filter(|c| c.starts_with("tier1:")).count();
    assert_eq!(tier1_calls, 2, "filtering must stop once the cap is filled");
}

#[tokio::test]
async fn product_overrides_replace_the_default_limits() {
    let search = MockSearch::returning(vec![]);
    let model = MockModel::default();
    let store = MockStore::new();

    let mut product = product("Acme CRM");
    product.candidate_pool_size = Some(10);
    let pipeline = GeneralSearchPipeline::new(&search, &model, &store, test_config());
    pipeline.run(&product).await;

    let requests = search.requests.lock().unwrap().clone();
    assert_eq!(requests, vec![("Acme CRM review".to_owned(), 10)]);
}

#[tokio::test]
async fn analysis_phase_rechecks_idempotency() {
    let search = MockSearch::returning(vec![video("v1")]);
    let model = MockModel {
        relevant: ["v1".to_owned()].into(),
        suitable: ["v1".to_owned()].into(),
        ..MockModel::default()
    };
    // First check (filtering) says new; second (analysis phase) says done.
    let store = MockStore::scripted_exists(&[false, true]);

    let pipeline = GeneralSearchPipeline::new(&search, &model, &store, test_config());
    let summary = pipeline.run(&product("Acme CRM")).await;

    assert_eq!(summary.skipped_existing, 1);
    assert_eq!(summary.analyzed, 0);
    assert!(!model.calls().contains(&"analyze:v1".to_owned()));
    assert!(store.inserted().is_empty());
}

#[tokio::test(start_paused = true)]
async fn skipped_recheck_does_not_pause_the_run() {
    let search = MockSearch::returning(vec![video("v1"), video("v2")]);
    let all: std::collections::HashSet<String> = ["v1".to_owned(), "v2".to_owned()].into();
    let model = MockModel {
        relevant: all.clone(),
        suitable: all,
        ..MockModel::default()
    };
    // Both look new during filtering, both turn out done at the re-check.
    let store = MockStore::scripted_exists(&[false, false, true, true]);

    let mut config = test_config();
    config.inter_call_delay = Duration::from_secs(60);
    let pipeline = GeneralSearchPipeline::new(&search, &model, &store, config);

    let started = tokio::time::Instant::now();
    let summary = pipeline.run(&product("Acme CRM")).await;

    assert_eq!(summary.skipped_existing, 2);
    assert_eq!(summary.analyzed, 0);
    assert_eq!(
        started.elapsed(),
        Duration::ZERO,
        "a fully-skipped queue must not wait out the inter-call delay"
    );
}

#[tokio::test(start_paused = true)]
async fn analysis_attempts_pace_the_run() {
    let search = MockSearch::returning(vec![video("v1"), video("v2")]);
    let all: std::collections::HashSet<String> = ["v1".to_owned(), "v2".to_owned()].into();
    let model = MockModel {
        relevant: all.clone(),
        suitable: all,
        ..MockModel::default()
    };
    let store = MockStore::new();

    let mut config = test_config();
    config.inter_call_delay = Duration::from_secs(60);
    let pipeline = GeneralSearchPipeline::new(&search, &model, &store, config);

    let started = tokio::time::Instant::now();
    let summary = pipeline.run(&product("Acme CRM")).await;

    assert_eq!(summary.analyzed, 2);
    assert_eq!(started.elapsed(), Duration::from_secs(120));
}

#[tokio::test]
async fn reviewer_identity_comes_from_the_video_channel() {
    let search = MockSearch::returning(vec![video("v1")]);
    let model = MockModel {
        relevant: ["v1".to_owned()].into(),
        suitable: ["v1".to_owned()].into(),
        ..MockModel::default()
    };
    let store = MockStore::new();

    let pipeline = GeneralSearchPipeline::new(&search, &model, &store, test_config());
    pipeline.run(&product("Acme CRM")).await;

    let inserted = store.inserted();
    assert_eq!(inserted[0].reviewer_channel_id, "UC-v1");
    assert_eq!(inserted[0].reviewer_name, "Channel v1");
}

#[tokio::test]
async fn empty_search_yields_an_empty_summary() {
    let search = MockSearch::returning(vec![]);
    let model = MockModel::default();
    let store = MockStore::new();

    let pipeline = GeneralSearchPipeline::new(&search, &model, &store, test_config());
    let summary = pipeline.run(&product("Acme CRM")).await;

    assert_eq!(summary, super::RunSummary::default());
    assert!(model.calls().is_empty());
}
