//! Redirect-side producer for the click event channel.
//!
//! The dispatcher owns the sending half of the bounded click channel and
//! applies one process-wide [`EnqueuePolicy`] when the channel is full:
//!
//! - [`EnqueuePolicy::Block`] waits for buffer space, so back-pressure reaches
//!   the redirect request and no click is lost while the channel is open.
//! - [`EnqueuePolicy::Drop`] never waits; a full channel drops the event and
//!   reports [`DispatchError::ClickDropped`].
//!
//! Dispatch failures are never surfaced to the visitor: the redirect succeeds
//! regardless and the failure is logged and counted.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

use crate::domain::click_event::ClickEvent;

/// Behaviour of [`ClickDispatcher::dispatch`] on a full channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnqueuePolicy {
    /// Wait for a free slot.
    #[default]
    Block,
    /// Reject immediately and drop the event.
    Drop,
}

impl FromStr for EnqueuePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "block" => Ok(Self::Block),
            "drop" => Ok(Self::Drop),
            other => Err(format!(
                "unknown enqueue policy '{other}', expected 'block' or 'drop'"
            )),
        }
    }
}

impl fmt::Display for EnqueuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => f.write_str("block"),
            Self::Drop => f.write_str("drop"),
        }
    }
}

/// Why an event did not reach the channel.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// Channel full under [`EnqueuePolicy::Drop`].
    #[error("click queue is full, event dropped")]
    ClickDropped,

    /// Receiving side closed, e.g. during shutdown.
    #[error("click queue is closed")]
    QueueClosed,
}

/// Sends click events to the worker pool.
///
/// Cheap to clone; every clone shares the same channel.
#[derive(Debug, Clone)]
pub struct ClickDispatcher {
    sender: mpsc::Sender<ClickEvent>,
    policy: EnqueuePolicy,
}

impl ClickDispatcher {
    /// Creates the bounded click channel and a dispatcher for its sending half.
    ///
    /// A capacity of zero is raised to one.
    pub fn channel(capacity: usize, policy: EnqueuePolicy) -> (Self, mpsc::Receiver<ClickEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self::new(sender, policy), receiver)
    }

    pub fn new(sender: mpsc::Sender<ClickEvent>, policy: EnqueuePolicy) -> Self {
        Self { sender, policy }
    }

    pub fn policy(&self) -> EnqueuePolicy {
        self.policy
    }

    /// Returns true once the worker side stopped accepting events.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Currently free slots in the channel.
    pub fn available(&self) -> usize {
        self.sender.capacity()
    }

    /// Total channel capacity.
    pub fn max_capacity(&self) -> usize {
        self.sender.max_capacity()
    }

    /// Enqueues a click event according to the configured policy.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::ClickDropped`] when the channel is full and the
    /// policy is [`EnqueuePolicy::Drop`], and [`DispatchError::QueueClosed`]
    /// when the workers no longer accept events.
    pub async fn dispatch(&self, event: ClickEvent) -> Result<(), DispatchError> {
        let link_id = event.link_id;

        let result = match self.policy {
            EnqueuePolicy::Block => self
                .sender
                .send(event)
                .await
                .map_err(|_| DispatchError::QueueClosed),
            EnqueuePolicy::Drop => self.sender.try_send(event).map_err(|e| match e {
                TrySendError::Full(_) => DispatchError::ClickDropped,
                TrySendError::Closed(_) => DispatchError::QueueClosed,
            }),
        };

        match result {
            Ok(()) => metrics::counter!("clicks_enqueued_total").increment(1),
            Err(DispatchError::ClickDropped) => {
                metrics::counter!("clicks_dropped_total").increment(1);
                warn!(link_id, "click queue full, dropping click event");
            }
            Err(DispatchError::QueueClosed) => {
                metrics::counter!("clicks_dropped_total").increment(1);
                warn!(link_id, "click queue closed, dropping click event");
            }
        }

        result
    }
}
