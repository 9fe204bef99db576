//! Fetcher tests: canned search envelopes → MockSearchApi → Fetcher::fetch.
//!
//! Each test: hand-craft the API JSON → fetch → assert on the MatchResult
//! and on the raw query the fetcher built. No network.

use isleherald_common::RelayError;
use isleherald_relay::fetcher::Fetcher;
use isleherald_relay::testing::MockSearchApi;

fn keywords(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

#[tokio::test]
async fn matching_post_with_media_resolves_urls_in_key_order() {
    let api = MockSearchApi::returning_json(
        r#"{
        "data": [{
            "id": "12345",
            "text": "Weekly #island update",
            "attachments": {"media_keys": ["m1", "m2"]}
        }],
        "includes": {"media": [
            {"media_key": "m2", "url": "http://a/2.jpg"},
            {"media_key": "m1", "url": "http://a/1.jpg"}
        ]}
    }"#,
    );
    let fetcher = Fetcher::new(api);

    let result = fetcher
        .fetch("TestUser123", &keywords(&["#island", "Week"]))
        .await
        .unwrap();

    assert!(!result.is_empty());
    assert_eq!(result.id, "12345");
    assert_eq!(result.text, "Weekly #island update");
    assert_eq!(result.author_id, "TestUser123");
    assert_eq!(result.media_urls, vec!["http://a/1.jpg", "http://a/2.jpg"]);
}

#[tokio::test]
async fn first_matching_post_wins() {
    let api = MockSearchApi::returning_json(
        r#"{
        "data": [
            {"id": "1", "text": "no match here"},
            {"id": "2", "text": "Weekly #island update"},
            {"id": "3", "text": "also a Weekly #island update"}
        ]
    }"#,
    );
    let fetcher = Fetcher::new(api);

    let result = fetcher
        .fetch("any-user", &keywords(&["#island", "Week"]))
        .await
        .unwrap();

    assert_eq!(result.id, "2");
}

#[tokio::test]
async fn keyword_match_is_case_insensitive_substring() {
    let api = MockSearchApi::returning_json(
        r#"{"data": [{"id": "1", "text": "WEEKLY #ISLAND UPDATE"}]}"#,
    );
    let fetcher = Fetcher::new(api);

    let result = fetcher
        .fetch("any-user", &keywords(&["week", "#island"]))
        .await
        .unwrap();

    assert_eq!(result.id, "1");
}

#[tokio::test]
async fn no_matching_post_yields_empty() {
    let api = MockSearchApi::returning_json(r#"{"data": [{"id": "123", "text": "other content"}]}"#);
    let fetcher = Fetcher::new(api);

    let result = fetcher
        .fetch("any-user", &keywords(&["non-matching-keyword"]))
        .await
        .unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn missing_data_array_yields_empty() {
    let api = MockSearchApi::returning_json("{}");
    let fetcher = Fetcher::new(api);

    let result = fetcher.fetch("any-user", &keywords(&["Week"])).await.unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn unresolved_media_keys_are_dropped_silently() {
    let api = MockSearchApi::returning_json(
        r#"{
        "data": [{
            "id": "1",
            "text": "Weekly #island update",
            "attachments": {"media_keys": ["m1", "m-unknown", "m2"]}
        }],
        "includes": {"media": [
            {"media_key": "m1", "url": "http://a/1.jpg"},
            {"media_key": "m2", "url": "http://a/2.jpg"}
        ]}
    }"#,
    );
    let fetcher = Fetcher::new(api);

    let result = fetcher.fetch("any-user", &keywords(&["Week"])).await.unwrap();

    assert_eq!(result.media_urls, vec!["http://a/1.jpg", "http://a/2.jpg"]);
}

// ---------------------------------------------------------------------------
// Empty-keyword policy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_keywords_force_an_empty_result_even_when_posts_exist() {
    let api = MockSearchApi::returning_json(
        r#"{"data": [{"id": "123", "text": "Some tweet text"}]}"#,
    );
    let fetcher = Fetcher::new(api);

    let result = fetcher.fetch("any-user", &[]).await.unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn query_is_built_identically_with_zero_keywords() {
    let api = MockSearchApi::returning_json("{}");
    let fetcher = Fetcher::new(api);

    fetcher.fetch("TestUser123", &[]).await.unwrap();

    assert_eq!(
        fetcher_query(&fetcher),
        Some("from:TestUser123 has:images".to_string())
    );
}

#[tokio::test]
async fn query_carries_keywords_space_joined_in_order() {
    let api = MockSearchApi::returning_json("{}");
    let fetcher = Fetcher::new(api);

    fetcher
        .fetch("AnotherUser", &keywords(&["C#", "dev & test"]))
        .await
        .unwrap();

    assert_eq!(
        fetcher_query(&fetcher),
        Some("from:AnotherUser has:images C# dev & test".to_string())
    );
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_success_status_surfaces_as_transport_error_with_body() {
    let api = MockSearchApi::failing(400, "Invalid request");
    let fetcher = Fetcher::new(api);

    let err = fetcher.fetch("any-user", &[]).await.unwrap_err();

    match &err {
        RelayError::Transport { status, body } => {
            assert_eq!(*status, 400);
            assert_eq!(body, "Invalid request");
        }
        other => panic!("expected Transport error, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("400"));
    assert!(message.contains("Invalid request"));
}

#[tokio::test]
async fn undecodable_response_surfaces_as_decode_error() {
    let api = MockSearchApi::failing_decode("expected value at line 1 column 1");
    let fetcher = Fetcher::new(api);

    let err = fetcher
        .fetch("any-user", &keywords(&["Week"]))
        .await
        .unwrap_err();

    match &err {
        RelayError::Decode(msg) => assert!(msg.contains("expected value")),
        other => panic!("expected Decode error, got {other:?}"),
    }
}

fn fetcher_query(fetcher: &Fetcher<MockSearchApi>) -> Option<String> {
    fetcher.api().last_query()
}
