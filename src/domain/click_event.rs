//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};

use crate::domain::entities::NewClick;

/// An in-memory click event on its way from a redirect to the click workers.
///
/// Events are never persisted as-is: a worker converts each one into a
/// [`NewClick`] and then discards it. Missing request metadata is carried as
/// an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub link_id: i64,
    pub timestamp: DateTime<Utc>,
    pub user_agent: String,
    pub ip: String,
}

impl ClickEvent {
    /// Creates a click event stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let event = ClickEvent::new(42, Some("Mozilla/5.0"), Some("192.168.1.1".to_string()));
    /// assert_eq!(event.link_id, 42);
    /// ```
    pub fn new(link_id: i64, user_agent: Option<&str>, ip: Option<String>) -> Self {
        Self {
            link_id,
            timestamp: Utc::now(),
            user_agent: user_agent.unwrap_or_default().to_string(),
            ip: ip.unwrap_or_default(),
        }
    }

    /// Field-for-field conversion into a click record.
    pub fn into_new_click(self) -> NewClick {
        NewClick {
            link_id: self.link_id,
            timestamp: self.timestamp,
            user_agent: self.user_agent,
            ip_address: self.ip,
        }
    }
}
