//! Repository trait for click persistence and counting.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recorded clicks.
///
/// Implementations must be safe to call from several click workers at once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Records a single click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn create(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Counts all clicks recorded for a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn count_by_link_id(&self, link_id: i64) -> Result<i64, AppError>;
}
