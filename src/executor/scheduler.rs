//! Periodic Queue Drain
//!
//! Sends `Process_queue` to the queue service on a fixed interval, so queued
//! documents reach the index without an explicit trigger. The drain goes through
//! the mailbox like any other request and never touches queue state directly.

use crate::error::ServiceError;
use crate::ingestion::types::ProcessReport;
use crate::service::actor::Mailbox;
use crate::service::protocol::ACTION_PROCESS_QUEUE;

use std::time::Duration;
use tokio::task::JoinHandle;

pub struct QueueDrainer {
    queue: Mailbox,
    interval: Duration,
}

impl QueueDrainer {
    pub fn new(queue: Mailbox, interval: Duration) -> Self {
        Self { queue, interval }
    }

    /// Spawns the drain loop and returns immediately.
    /// The loop exits once the queue service has stopped.
    pub fn start(self) -> JoinHandle<()> {
        tracing::info!("Draining queue every {} ms", self.interval.as_millis());

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            // The first tick completes immediately.
            interval.tick().await;

            loop {
                interval.tick().await;

                if !self.drain_once().await {
                    break;
                }
            }

            tracing::info!("Queue drain stopped");
        })
    }

    /// One drain tick. Returns `false` when the queue service is gone.
    pub async fn drain_once(&self) -> bool {
        match self.queue.send(ACTION_PROCESS_QUEUE, None).await {
            Ok(value) => {
                match serde_json::from_value::<ProcessReport>(value) {
                    Ok(report) if report.processed > 0 => tracing::info!(
                        "Periodic drain forwarded {} documents ({} failed)",
                        report.processed,
                        report.failed
                    ),
                    Ok(_) => tracing::trace!("Periodic drain: queue empty"),
                    Err(e) => tracing::warn!("Unexpected Process_queue response: {}", e),
                }
                true
            }
            Err(ServiceError::NoTargetConfigured) => {
                tracing::debug!("Periodic drain skipped: no target process configured");
                true
            }
            Err(ServiceError::ServiceUnavailable(_)) => false,
            Err(e) => {
                tracing::warn!("Periodic drain failed: {}", e);
                true
            }
        }
    }
}
