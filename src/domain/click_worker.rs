//! Background workers persisting click events.
//!
//! A [`ClickWorkerPool`] runs a fixed number of Tokio tasks that share the
//! receiving half of the click channel. Each event is dequeued by exactly one
//! worker, converted into a [`crate::domain::entities::NewClick`] and written
//! through a [`ClickRepository`].
//!
//! # Delivery
//!
//! Delivery is at-most-once. A failed write is logged and the event is
//! dropped; there is no redelivery. Ordering holds per worker only.
//!
//! # Shutdown
//!
//! [`ClickWorkerPool::shutdown`] closes the channel so producers get
//! [`crate::domain::click_dispatcher::DispatchError::QueueClosed`], lets the
//! workers drain everything already buffered, then waits for them to exit.
//! Workers also stop on their own once every sender is dropped and the
//! buffer is empty.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::ClickRepository;

/// Default number of click workers.
pub const DEFAULT_WORKER_COUNT: usize = 4;

type SharedReceiver = Arc<Mutex<mpsc::Receiver<ClickEvent>>>;

/// Handle to the running click workers.
pub struct ClickWorkerPool {
    handles: Vec<JoinHandle<()>>,
    shutdown_tx: watch::Sender<bool>,
}

impl ClickWorkerPool {
    /// Spawns `worker_count` workers draining `receiver`.
    ///
    /// A worker count of zero is raised to one.
    pub fn spawn<R>(worker_count: usize, receiver: mpsc::Receiver<ClickEvent>, repository: Arc<R>) -> Self
    where
        R: ClickRepository + 'static,
    {
        let worker_count = worker_count.max(1);
        let receiver: SharedReceiver = Arc::new(Mutex::new(receiver));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        info!(worker_count, "Starting click workers");

        let handles = (0..worker_count)
            .map(|id| {
                tokio::spawn(run_click_worker(
                    id,
                    receiver.clone(),
                    repository.clone(),
                    shutdown_rx.clone(),
                ))
            })
            .collect();

        Self {
            handles,
            shutdown_tx,
        }
    }

    /// Stops intake, drains buffered events and waits for every worker.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        self.join().await;
    }

    /// Waits for the workers without signalling them.
    ///
    /// Returns once the channel is closed and drained.
    pub async fn join(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Click worker terminated abnormally: {}", e);
            }
        }
        info!("Click workers stopped");
    }
}

async fn run_click_worker<R>(
    id: usize,
    receiver: SharedReceiver,
    repository: Arc<R>,
    mut shutdown_rx: watch::Receiver<bool>,
) where
    R: ClickRepository + ?Sized,
{
    debug!(worker = id, "Click worker started");

    loop {
        let next = {
            let mut rx = receiver.lock().await;

            if *shutdown_rx.borrow() {
                rx.close();
                rx.recv().await
            } else {
                tokio::select! {
                    biased;
                    event = rx.recv() => event,
                    _ = shutdown_rx.changed() => {
                        rx.close();
                        rx.recv().await
                    }
                }
            }
        };

        let Some(event) = next else {
            break;
        };

        persist_click(id, repository.as_ref(), event).await;
    }

    debug!(worker = id, "Click worker exiting");
}

async fn persist_click<R>(worker: usize, repository: &R, event: ClickEvent)
where
    R: ClickRepository + ?Sized,
{
    let link_id = event.link_id;

    match repository.create(event.into_new_click()).await {
        Ok(click) => {
            metrics::counter!("clicks_persisted_total").increment(1);
            debug!(worker, link_id, click_id = click.id, "Click recorded");
        }
        Err(e) => {
            metrics::counter!("clicks_failed_total").increment(1);
            error!(worker, link_id, "Failed to record click, event dropped: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Click, NewClick};
    use crate::error::AppError;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    /// Records every click it is asked to store; optionally fails for one link.
    #[derive(Default)]
    struct RecordingRepository {
        clicks: StdMutex<Vec<NewClick>>,
        fail_link_id: Option<i64>,
    }

    impl RecordingRepository {
        fn failing_for(link_id: i64) -> Self {
            Self {
                clicks: StdMutex::default(),
                fail_link_id: Some(link_id),
            }
        }

        fn link_ids(&self) -> Vec<i64> {
            let mut ids: Vec<i64> = self.clicks.lock().unwrap().iter().map(|c| c.link_id).collect();
            ids.sort_unstable();
            ids
        }
    }

    #[async_trait]
    impl ClickRepository for RecordingRepository {
        async fn create(&self, new_click: NewClick) -> Result<Click, AppError> {
            if self.fail_link_id == Some(new_click.link_id) {
                return Err(AppError::store(
                    "failed to create click",
                    sqlx::Error::PoolTimedOut,
                ));
            }

            let mut clicks = self.clicks.lock().unwrap();
            clicks.push(new_click.clone());
            Ok(Click::new(
                clicks.len() as i64,
                new_click.link_id,
                new_click.timestamp,
                new_click.user_agent,
                new_click.ip_address,
            ))
        }

        async fn count_by_link_id(&self, link_id: i64) -> Result<i64, AppError> {
            Ok(self
                .clicks
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.link_id == link_id)
                .count() as i64)
        }
    }

    fn event(link_id: i64) -> ClickEvent {
        ClickEvent::new(link_id, Some("agent"), Some("10.0.0.1".to_string()))
    }

    #[tokio::test]
    async fn test_every_event_is_persisted_once() {
        let repo = Arc::new(RecordingRepository::default());
        let (tx, rx) = mpsc::channel(64);
        let pool = ClickWorkerPool::spawn(3, rx, repo.clone());
        assert_eq!(pool.handles.len(), 3);

        for id in 0..50 {
            tx.send(event(id)).await.unwrap();
        }
        drop(tx);

        pool.join().await;

        assert_eq!(repo.link_ids(), (0..50).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_failed_persist_does_not_stop_worker() {
        let repo = Arc::new(RecordingRepository::failing_for(2));
        let (tx, rx) = mpsc::channel(8);
        let pool = ClickWorkerPool::spawn(1, rx, repo.clone());

        for id in 1..=4 {
            tx.send(event(id)).await.unwrap();
        }
        drop(tx);

        pool.join().await;

        assert_eq!(repo.link_ids(), vec![1, 3, 4]);
    }

    #[tokio::test]
    async fn test_shutdown_drains_buffered_events_and_closes_channel() {
        let repo = Arc::new(RecordingRepository::default());
        let (tx, rx) = mpsc::channel(16);

        for id in 0..10 {
            tx.send(event(id)).await.unwrap();
        }

        let pool = ClickWorkerPool::spawn(2, rx, repo.clone());
        pool.shutdown().await;

        assert_eq!(repo.link_ids().len(), 10);
        assert!(tx.is_closed());
        assert!(tx.send(event(100)).await.is_err());
        assert_eq!(repo.count_by_link_id(100).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_zero_workers_is_raised_to_one() {
        let repo = Arc::new(RecordingRepository::default());
        let (_tx, rx) = mpsc::channel(1);
        let pool = ClickWorkerPool::spawn(0, rx, repo);

        assert_eq!(pool.handles.len(), 1);
        pool.shutdown().await;
    }
}
