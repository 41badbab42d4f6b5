//! Ingestion Data Types
//!
//! Defines the queue item record and the request/response payloads of the queue actions.

use crate::search::types::Document;
use serde::{Deserialize, Serialize};

/// Unique identifier for a queued document.
///
/// Wrapper around a UUID string, generated at enqueue time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct QueueId(pub String);

impl QueueId {
    /// Generates a new random UUID v4-based QueueId.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for QueueId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for QueueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents the lifecycle state of a queued document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Submitted, not yet picked up by a `Process_queue` pass.
    Pending,
    /// Currently being forwarded to the target.
    Processing,
    /// The target accepted the document.
    Done,
    /// The last forwarding attempt failed; eligible for retry.
    Failed,
}

impl ItemStatus {
    /// Whether a `Process_queue` pass may pick the item up.
    pub fn is_eligible(self) -> bool {
        matches!(self, ItemStatus::Pending | ItemStatus::Failed)
    }
}

/// A document plus the metadata tracking its way to the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItem {
    pub queue_id: QueueId,
    pub document: Document,
    pub status: ItemStatus,
    /// Timestamp (ms) when the document was enqueued.
    pub enqueued_at: u64,
    /// Timestamp (ms) of the most recent forwarding attempt.
    pub last_attempt_at: Option<u64>,
    pub attempts: u32,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnqueueResponse {
    pub success: bool,
    pub queue_id: QueueId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStatus {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub done: usize,
    pub failed: usize,
    pub target_process: Option<String>,
}

/// Payload of `Get_queue_items`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueueItemsRequest {
    pub limit: Option<i64>,
    pub status: Option<ItemStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueItemsResponse {
    pub items: Vec<QueueItem>,
}

/// Payload of `Get_queue_item`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueItemRequest {
    pub queue_id: QueueId,
}

/// Payload of `Process_queue`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessQueueRequest {
    pub batch_size: Option<i64>,
}

/// Result of forwarding one item during a `Process_queue` pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    pub queue_id: QueueId,
    pub document_id: String,
    pub status: ItemStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-item outcome summary returned by `Process_queue`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessReport {
    pub processed: usize,
    pub done: usize,
    pub failed: usize,
    /// Items still eligible (pending or failed) after this pass.
    pub remaining: usize,
    pub outcomes: Vec<ProcessOutcome>,
}
