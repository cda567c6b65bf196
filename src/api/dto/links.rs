//! DTOs for link creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::link_service::short_url;
use crate::domain::entities::Link;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The original URL to shorten. A missing field deserializes as empty and
    /// fails validation.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "long_url is required"),
        url(message = "Invalid URL format")
    )]
    pub long_url: String,
}

/// A created short link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub short_code: String,
    pub long_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn new(link: Link, base_url: &str) -> Self {
        Self {
            short_url: short_url(base_url, &link.short_code),
            short_code: link.short_code,
            long_url: link.long_url,
            created_at: link.created_at,
        }
    }
}
