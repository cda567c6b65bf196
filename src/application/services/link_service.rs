//! Link creation, lookup and statistics service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code, is_reserved_code};
use crate::utils::url_validator::validate_long_url;

/// Number of codes tried before link creation gives up.
pub const MAX_ATTEMPTS: usize = 5;

/// A link together with its click total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStats {
    pub link: Link,
    pub total_clicks: i64,
}

/// Service for creating and resolving short links.
///
/// Generates random codes, verifies their uniqueness against the store and
/// persists new links. Reads always go to the repositories; nothing is cached.
pub struct LinkService<L: LinkRepository, C: ClickRepository> {
    link_repository: Arc<L>,
    click_repository: Arc<C>,
}

impl<L: LinkRepository, C: ClickRepository> LinkService<L, C> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, click_repository: Arc<C>) -> Self {
        Self {
            link_repository,
            click_repository,
        }
    }

    /// Creates a short link for `long_url`.
    ///
    /// # Code Generation
    ///
    /// Up to [`MAX_ATTEMPTS`] random codes are tried. A code is accepted when
    /// it is not reserved by a system route and the store has no link with it. Since the check and the insert are not
    /// atomic, a uniqueness violation reported by the insert counts as a
    /// collision and consumes another attempt.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL is empty, schemeless or otherwise
    ///   invalid; nothing is generated or stored in that case
    /// - [`AppError::Store`] if the existence check or the insert fails; a
    ///   failing check is not retried
    /// - [`AppError::RandomSource`] if code generation fails
    /// - [`AppError::ExhaustedRetries`] once every attempt collided
    pub async fn create_link(&self, long_url: &str) -> Result<Link, AppError> {
        validate_long_url(long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        for attempt in 1..=MAX_ATTEMPTS {
            let code = generate_code(DEFAULT_CODE_LENGTH)?;

            if !self.code_available(&code).await? {
                metrics::counter!("short_code_collisions_total").increment(1);
                warn!(
                    code = %code,
                    attempt,
                    max_attempts = MAX_ATTEMPTS,
                    "Short code unavailable, retrying"
                );
                continue;
            }

            let new_link = NewLink {
                short_code: code,
                long_url: long_url.to_string(),
                created_at: Utc::now(),
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    info!(link_id = link.id, code = %link.short_code, "Short link created");
                    return Ok(link);
                }
                Err(AppError::Collision { code }) => {
                    metrics::counter!("short_code_collisions_total").increment(1);
                    warn!(
                        code = %code,
                        attempt,
                        max_attempts = MAX_ATTEMPTS,
                        "Short code taken by a concurrent insert, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::ExhaustedRetries {
            attempts: MAX_ATTEMPTS,
        })
    }

    /// Whether `code` can be issued: not reserved and not yet stored.
    async fn code_available(&self, code: &str) -> Result<bool, AppError> {
        if is_reserved_code(code) {
            return Ok(false);
        }

        Ok(self.link_repository.find_by_short_code(code).await?.is_none())
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn get_by_short_code(&self, short_code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_short_code(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "code": short_code }))
            })
    }

    /// Resolves a link and counts its clicks.
    ///
    /// Clicks still queued for the workers are not included.
    ///
    /// # Errors
    ///
    /// See [`Self::get_by_short_code`].
    pub async fn get_stats(&self, short_code: &str) -> Result<LinkStats, AppError> {
        let link = self.get_by_short_code(short_code).await?;
        let total_clicks = self.click_repository.count_by_link_id(link.id).await?;

        Ok(LinkStats { link, total_clicks })
    }
}

/// Builds the public short URL for a code.
pub fn short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}
