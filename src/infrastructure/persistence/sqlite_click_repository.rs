//! SQLite implementation of the click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    clicked_at: DateTime<Utc>,
    user_agent: String,
    ip_address: String,
}

impl From<ClickRow> for Click {
    fn from(row: ClickRow) -> Self {
        Click::new(
            row.id,
            row.link_id,
            row.clicked_at,
            row.user_agent,
            row.ip_address,
        )
    }
}

/// SQLite repository for recorded clicks.
///
/// Shared by all click workers; SQLite serializes the concurrent inserts.
pub struct SqliteClickRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for SqliteClickRepository {
    async fn create(&self, new_click: NewClick) -> Result<Click, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO clicks (link_id, clicked_at, user_agent, ip_address)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, link_id, clicked_at, user_agent, ip_address
            "#,
        )
        .bind(new_click.link_id)
        .bind(new_click.timestamp)
        .bind(&new_click.user_agent)
        .bind(&new_click.ip_address)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| AppError::store("failed to create click", e))?;

        Ok(row.into())
    }

    async fn count_by_link_id(&self, link_id: i64) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clicks WHERE link_id = ?1")
            .bind(link_id)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| AppError::store(format!("failed to count clicks for link {link_id}"), e))
    }
}
