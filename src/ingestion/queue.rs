//! Ingestion Queue
//!
//! Holds documents submitted for indexing together with their forwarding state.
//! Items are kept in enqueue order and are never deleted automatically, so the
//! queue doubles as a history of everything that was submitted.
//!
//! ## Responsibilities
//! - **Intake**: Creating `pending` items for validated documents.
//! - **Selection**: Handing the controller the next batch of eligible items in enqueue order.
//! - **State**: Recording `processing` / `done` / `failed` transitions and attempt metadata.
//! - **Configuration**: Holding the target the controller forwards to.

use super::types::*;
use crate::error::{Result, ServiceError};
use crate::now_ms;
use crate::search::types::Document;

use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct IngestionQueue {
    /// Items in enqueue order.
    items: IndexMap<QueueId, QueueItem>,
    target_process: Option<String>,
}

impl IngestionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `pending` item for an already validated document.
    pub fn enqueue(&mut self, document: Document) -> QueueId {
        let queue_id = QueueId::new();
        tracing::debug!("Queued document {} as {}", document.id, queue_id);

        self.items.insert(
            queue_id.clone(),
            QueueItem {
                queue_id: queue_id.clone(),
                document,
                status: ItemStatus::Pending,
                enqueued_at: now_ms(),
                last_attempt_at: None,
                attempts: 0,
                error: None,
            },
        );

        queue_id
    }

    /// Replaces the forwarding target. `None` unsets it.
    pub fn set_target(&mut self, target: Option<String>) {
        match &target {
            Some(target) => tracing::info!("Target process set to {}", target),
            None => tracing::info!("Target process cleared"),
        }
        self.target_process = target;
    }

    pub fn target(&self) -> Option<&str> {
        self.target_process.as_deref()
    }

    pub fn status(&self) -> QueueStatus {
        let mut status = QueueStatus {
            total: self.items.len(),
            target_process: self.target_process.clone(),
            ..Default::default()
        };

        for item in self.items.values() {
            match item.status {
                ItemStatus::Pending => status.pending += 1,
                ItemStatus::Processing => status.processing += 1,
                ItemStatus::Done => status.done += 1,
                ItemStatus::Failed => status.failed += 1,
            }
        }

        status
    }

    /// Most recently enqueued first, optionally restricted to one status.
    pub fn items(&self, limit: usize, status: Option<ItemStatus>) -> Vec<QueueItem> {
        self.items
            .values()
            .rev()
            .filter(|item| status.is_none_or(|status| item.status == status))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn item(&self, queue_id: &QueueId) -> Result<&QueueItem> {
        self.items
            .get(queue_id)
            .ok_or_else(|| ServiceError::NotFound(format!("queue item {}", queue_id)))
    }

    /// Up to `batch_size` pending or failed items, oldest first.
    pub fn eligible(&self, batch_size: usize) -> Vec<QueueId> {
        self.items
            .values()
            .filter(|item| item.status.is_eligible())
            .take(batch_size)
            .map(|item| item.queue_id.clone())
            .collect()
    }

    /// Number of items a future pass could still pick up.
    pub fn remaining(&self) -> usize {
        self.items
            .values()
            .filter(|item| item.status.is_eligible())
            .count()
    }

    /// Locks an eligible item for forwarding.
    pub fn mark_processing(&mut self, queue_id: &QueueId) -> Result<()> {
        let item = self
            .items
            .get_mut(queue_id)
            .ok_or_else(|| ServiceError::NotFound(format!("queue item {}", queue_id)))?;

        if !item.status.is_eligible() {
            return Err(ServiceError::InvalidArgument(format!(
                "queue item {} is {:?}, not eligible for processing",
                queue_id, item.status
            )));
        }

        item.status = ItemStatus::Processing;
        item.attempts += 1;
        item.last_attempt_at = Some(now_ms());
        Ok(())
    }

    /// Marks a processing item as either `Done` or `Failed`.
    pub fn complete(
        &mut self,
        queue_id: &QueueId,
        outcome: std::result::Result<(), String>,
    ) -> Result<ItemStatus> {
        let item = self
            .items
            .get_mut(queue_id)
            .ok_or_else(|| ServiceError::NotFound(format!("queue item {}", queue_id)))?;

        match outcome {
            Ok(()) => {
                item.status = ItemStatus::Done;
                item.error = None;
                tracing::info!("Queue item {} ({}) done", queue_id, item.document.id);
            }
            Err(error) => {
                tracing::warn!(
                    "Queue item {} ({}) failed: {}",
                    queue_id,
                    item.document.id,
                    error
                );
                item.status = ItemStatus::Failed;
                item.error = Some(error);
            }
        }

        Ok(item.status)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
