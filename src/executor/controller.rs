//! Queue Controller
//!
//! Drives one `Process_queue` pass: claim a batch, forward each item, record the outcome.
//!
//! ## Lifecycle of a batch
//! 1. **Select**: up to `batch_size` pending or failed items, oldest first.
//! 2. **Claim**: the whole batch is marked `processing` before any forwarding starts.
//! 3. **Forward**: items are sent one by one, each bounded by `forward_timeout`.
//! 4. **Reconcile**: success marks `done`; rejection, unreachability or timeout marks `failed`.
//!    Nothing is left in `processing` once the pass returns.

use super::registry::{ForwardFn, TargetRegistry};
use crate::config::ServiceConfig;
use crate::error::{Result, ServiceError};
use crate::ingestion::queue::IngestionQueue;
use crate::ingestion::types::{ItemStatus, ProcessOutcome, ProcessReport};
use crate::search::types::Document;

use std::sync::Arc;
use std::time::Duration;

pub struct QueueController {
    registry: Arc<TargetRegistry>,
    forward_timeout: Duration,
    batch_size: usize,
}

impl QueueController {
    pub fn new(registry: Arc<TargetRegistry>, config: &ServiceConfig) -> Self {
        Self {
            registry,
            forward_timeout: config.forward_timeout,
            batch_size: config.batch_size,
        }
    }

    pub fn default_batch_size(&self) -> usize {
        self.batch_size
    }

    /// Runs one pass over the queue.
    ///
    /// Fails with `NoTargetConfigured`, touching nothing, when no target is set.
    pub async fn process(
        &self,
        queue: &mut IngestionQueue,
        batch_size: Option<usize>,
    ) -> Result<ProcessReport> {
        let target = queue
            .target()
            .ok_or(ServiceError::NoTargetConfigured)?
            .to_string();

        let batch = queue.eligible(batch_size.unwrap_or(self.batch_size));
        if batch.is_empty() {
            tracing::debug!("Process_queue: nothing to forward");
            return Ok(ProcessReport {
                remaining: queue.remaining(),
                ..Default::default()
            });
        }

        for queue_id in &batch {
            queue.mark_processing(queue_id)?;
        }

        tracing::info!("Forwarding {} queued documents to {}", batch.len(), target);

        let forwarder = self.registry.resolve(&target);
        let mut report = ProcessReport::default();

        for queue_id in batch {
            let document = queue.item(&queue_id)?.document.clone();
            let document_id = document.id.clone();

            let outcome = match &forwarder {
                Some(forward_fn) => self.forward(forward_fn, document).await,
                None => Err(ServiceError::ForwardingFailure(format!(
                    "unknown target process: {}",
                    target
                ))),
            };

            let error = outcome.err().map(|e| e.to_string());
            let status = queue.complete(&queue_id, error.clone().map_or(Ok(()), Err))?;

            report.processed += 1;
            match status {
                ItemStatus::Done => report.done += 1,
                _ => report.failed += 1,
            }
            report.outcomes.push(ProcessOutcome {
                queue_id,
                document_id,
                status,
                error,
            });
        }

        report.remaining = queue.remaining();
        tracing::info!(
            "Process_queue finished: {} done, {} failed, {} remaining",
            report.done,
            report.failed,
            report.remaining
        );

        Ok(report)
    }

    /// Invokes the forwarder with a bounded wait. Non-response counts as failure.
    async fn forward(&self, forward_fn: &ForwardFn, document: Document) -> Result<()> {
        match tokio::time::timeout(self.forward_timeout, forward_fn(document)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(ServiceError::ForwardingFailure(e.to_string())),
            Err(_) => Err(ServiceError::ForwardingFailure(format!(
                "target did not respond within {} ms",
                self.forward_timeout.as_millis()
            ))),
        }
    }
}
