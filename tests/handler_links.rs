mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use linktrack::api::handlers::create_link_handler;
use linktrack::state::AppState;
use serde_json::{Value, json};

fn create_test_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/links", post(create_link_handler))
        .with_state(state)
}

#[tokio::test]
async fn test_create_link_success() {
    let (state, _rx) = common::create_test_state(common::test_pool().await);
    let server = TestServer::new(create_test_app(state)).unwrap();

    let response = server
        .post("/api/v1/links")
        .json(&json!({ "long_url": "https://example.com/some/long/path" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<Value>();
    let code = json["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(json["long_url"], "https://example.com/some/long/path");
    assert_eq!(json["short_url"], format!("{}/{}", common::BASE_URL, code));
    assert!(json["created_at"].is_string());
}

#[tokio::test]
async fn test_create_link_persists_row() {
    let pool = common::test_pool().await;
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(create_test_app(state)).unwrap();

    let response = server
        .post("/api/v1/links")
        .json(&json!({ "long_url": "https://www.rust-lang.org" }))
        .await;

    let code = response.json::<Value>()["short_code"]
        .as_str()
        .unwrap()
        .to_string();

    let stored: String = sqlx::query_scalar("SELECT long_url FROM links WHERE short_code = ?1")
        .bind(&code)
        .fetch_one(pool.as_ref())
        .await
        .unwrap();

    assert_eq!(stored, "https://www.rust-lang.org");
}

#[tokio::test]
async fn test_create_link_missing_url() {
    let (state, _rx) = common::create_test_state(common::test_pool().await);
    let server = TestServer::new(create_test_app(state)).unwrap();

    let response = server
        .post("/api/v1/links")
        .json(&json!({}))
        .expect_failure()
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_create_link_invalid_url() {
    let (state, _rx) = common::create_test_state(common::test_pool().await);
    let server = TestServer::new(create_test_app(state)).unwrap();

    let response = server
        .post("/api/v1/links")
        .json(&json!({ "long_url": "not-a-valid-url" }))
        .expect_failure()
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_link_unsupported_scheme() {
    let (state, _rx) = common::create_test_state(common::test_pool().await);
    let server = TestServer::new(create_test_app(state)).unwrap();

    let response = server
        .post("/api/v1/links")
        .json(&json!({ "long_url": "ftp://files.example.com/archive.zip" }))
        .expect_failure()
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_link_rejects_control_characters_and_padding() {
    let pool = common::test_pool().await;
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(create_test_app(state)).unwrap();

    for input in [
        "https://example.com/a\nb",
        "https://example.com/a\tb",
        " https://example.com ",
    ] {
        let response = server
            .post("/api/v1/links")
            .json(&json!({ "long_url": input }))
            .expect_failure()
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
    }

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool.as_ref())
        .await
        .unwrap();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn test_create_link_malformed_json() {
    let (state, _rx) = common::create_test_state(common::test_pool().await);
    let server = TestServer::new(create_test_app(state)).unwrap();

    let response = server
        .post("/api/v1/links")
        .text("{ not json")
        .content_type("application/json")
        .expect_failure()
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_create_link_codes_are_distinct() {
    let (state, _rx) = common::create_test_state(common::test_pool().await);
    let server = TestServer::new(create_test_app(state)).unwrap();

    let mut codes = std::collections::HashSet::new();
    for _ in 0..20 {
        let response = server
            .post("/api/v1/links")
            .json(&json!({ "long_url": "https://example.com" }))
            .await;
        let code = response.json::<Value>()["short_code"]
            .as_str()
            .unwrap()
            .to_string();
        codes.insert(code);
    }

    assert_eq!(codes.len(), 20);
}
