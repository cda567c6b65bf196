//! DTOs for link statistics.

use serde::Serialize;

use crate::application::services::LinkStats;

/// Click total for a short link.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub long_url: String,
    pub total_clicks: i64,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            short_code: stats.link.short_code,
            long_url: stats.link.long_url,
            total_clicks: stats.total_clicks,
        }
    }
}
