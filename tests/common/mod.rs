#![allow(dead_code)]

use axum::extract::ConnectInfo;
use chrono::Utc;
use linktrack::domain::click_dispatcher::{ClickDispatcher, EnqueuePolicy};
use linktrack::domain::click_event::ClickEvent;
use linktrack::infrastructure::persistence;
use linktrack::state::AppState;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::Layer;

pub const BASE_URL: &str = "http://sho.rt";

/// Fresh in-memory database with the schema applied.
pub async fn test_pool() -> Arc<SqlitePool> {
    let pool = persistence::connect("sqlite::memory:", 1).await.unwrap();
    persistence::run_migrations(&pool).await.unwrap();
    Arc::new(pool)
}

pub async fn create_test_link(pool: &SqlitePool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO links (short_code, long_url, created_at) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(code)
    .bind(url)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_click(pool: &SqlitePool, link_id: i64, ip: &str) {
    sqlx::query(
        "INSERT INTO clicks (link_id, clicked_at, user_agent, ip_address) VALUES (?1, ?2, '', ?3)",
    )
    .bind(link_id)
    .bind(Utc::now())
    .bind(ip)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn count_clicks(pool: &SqlitePool, link_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clicks WHERE link_id = ?1")
        .bind(link_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: Arc<SqlitePool>) -> (AppState, mpsc::Receiver<ClickEvent>) {
    create_test_state_with(pool, 100, EnqueuePolicy::Block)
}

pub fn create_test_state_with(
    pool: Arc<SqlitePool>,
    capacity: usize,
    policy: EnqueuePolicy,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (dispatcher, rx) = ClickDispatcher::channel(capacity, policy);
    let state = AppState::new(pool, dispatcher, BASE_URL.to_string());

    (state, rx)
}

/// Injects a fixed peer address, standing in for `into_make_service_with_connect_info`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
