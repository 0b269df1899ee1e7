use super::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> YoutubeClient {
    YoutubeClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

fn search_body() -> serde_json::Value {
    serde_json::json!({
        "items": [
            {
                "id": { "kind": "youtube#video", "videoId": "abc123" },
                "snippet": {
                    "title": "iPhone 15 Pro Max Review",
                    "description": "Six months later...",
                    "publishedAt": "2024-02-15T11:00:00Z",
                    "channelId": "UCBJycsmduvYEL83R_U4JriQ",
                    "channelTitle": "Marques Brownlee"
                }
            },
            {
                "id": { "kind": "youtube#channel" },
                "snippet": {
                    "title": "Some channel, not a video",
                    "publishedAt": "2024-01-01T00:00:00Z"
                }
            }
        ]
    })
}

#[tokio::test]
async fn channel_search_parses_videos_and_skips_non_video_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("channelId", "UCBJycsmduvYEL83R_U4JriQ"))
        .and(query_param("type", "video"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let videos = client
        .search_by_channel(
            "UCBJycsmduvYEL83R_U4JriQ",
            "iPhone 15 Pro Max",
            5,
            "relevance",
        )
        .await;

    assert_eq!(videos.len(), 1, "channel items must be filtered out");
    let video = &videos[0];
    assert_eq!(video.video_id, "abc123");
    assert_eq!(video.title, "iPhone 15 Pro Max Review");
    assert_eq!(video.channel_title, "Marques Brownlee");
    assert_eq!(video.url, "https://www.youtube.com/watch?v=abc123");
    assert!(video.published_at.is_some());
}

#[tokio::test]
async fn general_search_sends_bias_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Salesforce Sales Cloud review"))
        .and(query_param("relevanceLanguage", "en"))
        .and(query_param("regionCode", "US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let videos = client
        .search_general(
            "Salesforce Sales Cloud review",
            50,
            "relevance",
            GeneralSearchOptions {
                region_code: Some("US"),
                relevance_language: Some("en"),
            },
        )
        .await;

    assert_eq!(videos.len(), 1);
}

#[tokio::test]
async fn quota_exceeded_fails_closed_to_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": {
                "code": 403,
                "errors": [{ "reason": "quotaExceeded" }]
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let videos = client
        .search_general("anything", 10, "relevance", GeneralSearchOptions::default())
        .await;
    assert!(videos.is_empty(), "quota exhaustion must not raise");
}

#[tokio::test]
async fn internal_search_classifies_quota_and_access_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": { "errors": [{ "reason": "developerKeyInvalid" }] }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .search("q", 5, "relevance", None, None, None)
        .await;
    assert!(
        matches!(result, Err(YoutubeError::AccessDenied { ref reason }) if reason == "developerKeyInvalid"),
        "expected AccessDenied, got: {result:?}"
    );
}

#[tokio::test]
async fn server_error_fails_closed_to_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let videos = client
        .search_by_channel("UCx", "query", 5, "relevance")
        .await;
    assert!(videos.is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search("q", 5, "relevance", None, None, None).await;
    assert!(
        matches!(result, Err(YoutubeError::Deserialize { .. })),
        "expected Deserialize error, got: {result:?}"
    );
}
