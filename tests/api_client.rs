// tests/api_client.rs
//! HTTP client behavior against a local mock of the X API.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};
use x_cli::{
    AppError, Credentials, TimelineSource, TweetDraft, TweetId, UserId, Username, XHttpClient,
};

fn credentials() -> Credentials {
    Credentials::new(
        "consumer-key",
        "consumer-secret",
        "access-token",
        "access-secret",
        "bearer-token",
    )
}

async fn client_for(server: &MockServer) -> XHttpClient {
    XHttpClient::with_base_url(credentials(), server.uri()).unwrap()
}

fn is_oauth_signed(req: &Request) -> bool {
    req.headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| {
            v.starts_with("OAuth ")
                && v.contains("oauth_consumer_key=\"consumer-key\"")
                && v.contains("oauth_token=\"access-token\"")
                && v.contains("oauth_signature=")
        })
}

async fn mount_identity(server: &MockServer, id: &str) {
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(is_oauth_signed)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": id}})))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_get_user_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/by/username/alice"))
        .and(header("authorization", "Bearer bearer-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"id": "42", "username": "alice"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let user = client.get_user(&Username::new("@alice").unwrap()).await.unwrap();
    assert_eq!(user["data"]["id"], "42");
}

#[tokio::test]
async fn test_resolve_user_reads_data_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/by/username/alice"))
        .and(header("authorization", "Bearer bearer-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"id": "42", "username": "alice"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let id = client.resolve_user(&Username::new("alice").unwrap()).await.unwrap();
    assert_eq!(id, UserId::parse("42").unwrap());
}

#[tokio::test]
async fn test_post_tweet_is_signed_with_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tweets"))
        .and(is_oauth_signed)
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "text": "hello",
            "reply": {"in_reply_to_tweet_id": "7"}
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"data": {"id": "8", "text": "hello"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let draft = TweetDraft::new("hello").replying_to(TweetId::parse("7").unwrap());
    let posted = client.post_tweet(&draft).await.unwrap();
    assert_eq!(posted["data"]["id"], "8");
}

#[tokio::test]
async fn test_like_uses_resolved_identity() {
    let server = MockServer::start().await;
    mount_identity(&server, "99").await;
    Mock::given(method("POST"))
        .and(path("/users/99/likes"))
        .and(is_oauth_signed)
        .and(body_json(json!({"tweet_id": "123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"liked": true}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/99/likes/123"))
        .and(is_oauth_signed)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"liked": false}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await.resolve_identity().await.unwrap();
    // Resolving again reuses the known ID; /users/me expects exactly one call.
    let client = client.resolve_identity().await.unwrap();
    assert_eq!(
        client.context().self_id().unwrap(),
        &UserId::parse("99").unwrap()
    );

    let tweet = TweetId::parse("https://x.com/someone/status/123").unwrap();
    let liked = client.like_tweet(&tweet).await.unwrap();
    assert_eq!(liked["data"]["liked"], true);
    let unliked = client.unlike_tweet(&tweet).await.unwrap();
    assert_eq!(unliked["data"]["liked"], false);
}

#[tokio::test]
async fn test_account_calls_need_identity() {
    let server = MockServer::start().await;
    let client = client_for(&server).await;

    let err = client.get_mentions(10).await.unwrap_err();
    assert!(matches!(err, AppError::MissingConfiguration(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rate_limit_carries_reset_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/42/tweets"))
        .respond_with(ResponseTemplate::new(429).insert_header("x-rate-limit-reset", "1700000000"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .get_timeline(&UserId::parse("42").unwrap(), 10, None)
        .await
        .unwrap_err();
    match err {
        AppError::RateLimited { reset_at } => assert_eq!(reset_at, "1700000000"),
        other => panic!("expected rate limit, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rate_limit_without_header_is_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .get_tweet(&TweetId::parse("1").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Rate limited. Resets at unknown.");
}

#[tokio::test]
async fn test_error_status_reports_api_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/by/username/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{"detail": "Could not find user with username: [ghost]."}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .get_user(&Username::new("ghost").unwrap())
        .await
        .unwrap_err();
    match err {
        AppError::RequestFailed { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Could not find user with username: [ghost].");
        }
        other => panic!("expected request failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_success_with_only_errors_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tweets/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{"message": "Not authorized"}, {"message": "Try later"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .get_tweet(&TweetId::parse("5").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "API error (HTTP 200): Not authorized; Try later");
}

#[tokio::test]
async fn test_timeline_passes_cursor_and_clamps_page_size() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/42/tweets"))
        .and(query_param("since_id", "100"))
        .and(query_param("max_results", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "102", "text": "b"}, {"id": "101", "text": "a"}],
            "includes": {"users": [{"id": "42", "username": "alice"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let since = TweetId::parse("100").unwrap();
    let page = client
        .fetch_timeline(&UserId::parse("42").unwrap(), 1, Some(&since))
        .await
        .unwrap();
    assert_eq!(page.tweets.len(), 2);
    assert_eq!(page.newest_id(), Some(TweetId::parse("102").unwrap()));
    assert_eq!(page.includes["users"][0]["username"], "alice");
}

#[tokio::test]
async fn test_search_clamps_max_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tweets/search/recent"))
        .and(query_param("query", "rust lang"))
        .and(query_param("max_results", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"meta": {"result_count": 0}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let found = client.search_tweets("rust lang", 500).await.unwrap();
    assert_eq!(found["meta"]["result_count"], 0);
}
