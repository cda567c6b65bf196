//! Shared application state injected into all handlers.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::click_dispatcher::ClickDispatcher;
use crate::infrastructure::persistence::{SqliteClickRepository, SqliteLinkRepository};

/// Link service wired to the SQLite repositories.
pub type AppLinkService = LinkService<SqliteLinkRepository, SqliteClickRepository>;

#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<SqlitePool>,
    pub link_service: Arc<AppLinkService>,
    pub click_dispatcher: ClickDispatcher,
    /// Public prefix used to build short URLs.
    pub base_url: String,
}

impl AppState {
    /// Builds the state and its services on top of an existing pool.
    pub fn new(pool: Arc<SqlitePool>, click_dispatcher: ClickDispatcher, base_url: String) -> Self {
        let link_repository = Arc::new(SqliteLinkRepository::new(pool.clone()));
        let click_repository = Arc::new(SqliteClickRepository::new(pool.clone()));
        let link_service = Arc::new(LinkService::new(link_repository, click_repository));

        Self {
            pool,
            link_service,
            click_dispatcher,
            base_url,
        }
    }
}
