mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use linktrack::api::handlers::redirect_handler;
use linktrack::domain::click_dispatcher::EnqueuePolicy;
use linktrack::state::AppState;

fn create_test_app(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .layer(common::MockConnectInfoLayer)
        .with_state(state)
}

#[tokio::test]
async fn test_redirect_success() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "redir1", "https://example.com/target").await;
    let (state, _rx) = common::create_test_state(pool);

    let server = TestServer::new(create_test_app(state)).unwrap();

    let response = server.get("/redir1").await;

    response.assert_status(axum::http::StatusCode::FOUND);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "https://example.com/target"
    );
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, mut rx) = common::create_test_state(common::test_pool().await);
    let server = TestServer::new(create_test_app(state)).unwrap();

    let response = server.get("/nope00").expect_failure().await;

    response.assert_status_not_found();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_enqueues_click_event() {
    let pool = common::test_pool().await;
    let link_id = common::create_test_link(&pool, "track1", "https://example.com").await;
    let (state, mut rx) = common::create_test_state(pool);

    let server = TestServer::new(create_test_app(state)).unwrap();

    server
        .get("/track1")
        .add_header("user-agent", "Mozilla/5.0 (X11; Linux x86_64)")
        .await
        .assert_status(axum::http::StatusCode::FOUND);

    let event = rx.try_recv().unwrap();
    assert_eq!(event.link_id, link_id);
    assert_eq!(event.user_agent, "Mozilla/5.0 (X11; Linux x86_64)");
    assert_eq!(event.ip, "127.0.0.1");
}

#[tokio::test]
async fn test_redirect_honors_forwarded_for() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "proxy1", "https://example.com").await;
    let (state, mut rx) = common::create_test_state(pool);

    let server = TestServer::new(create_test_app(state)).unwrap();

    server
        .get("/proxy1")
        .add_header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .await;

    let event = rx.try_recv().unwrap();
    assert_eq!(event.ip, "203.0.113.7");
    assert!(event.user_agent.is_empty());
}

#[tokio::test]
async fn test_redirect_when_queue_full_with_drop_policy() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "full01", "https://example.com").await;
    let (state, mut rx) = common::create_test_state_with(pool, 1, EnqueuePolicy::Drop);

    let server = TestServer::new(create_test_app(state)).unwrap();

    for _ in 0..3 {
        server
            .get("/full01")
            .await
            .assert_status(axum::http::StatusCode::FOUND);
    }

    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_when_queue_closed() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "closed", "https://example.com").await;
    let (state, rx) = common::create_test_state(pool);
    drop(rx);

    let server = TestServer::new(create_test_app(state)).unwrap();

    server
        .get("/closed")
        .await
        .assert_status(axum::http::StatusCode::FOUND);
}
