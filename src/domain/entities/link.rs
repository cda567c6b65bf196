//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// Maximum length of a stored short code.
pub const MAX_SHORT_CODE_LEN: usize = 10;

/// A shortened URL link.
///
/// Links are immutable once persisted: the code, target and creation time
/// never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, short_code: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            short_code,
            long_url,
            created_at,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}
