use super::actor::Service;
use super::protocol::*;
use crate::config::ServiceConfig;
use crate::error::{Result, ServiceError};
use crate::executor::controller::QueueController;
use crate::ingestion::queue::IngestionQueue;
use crate::ingestion::types::{
    EnqueueResponse, ProcessQueueRequest, QueueItemRequest, QueueItemsRequest, QueueItemsResponse,
};
use crate::search::types::Document;

use serde_json::{Value, json};

/// The ingestion queue service. Owns the queue, its target and the controller.
pub struct QueueService {
    queue: IngestionQueue,
    controller: QueueController,
    items_limit: usize,
}

impl QueueService {
    pub fn new(controller: QueueController, config: &ServiceConfig) -> Self {
        let mut queue = IngestionQueue::new();
        if let Some(target) = &config.initial_target {
            queue.set_target(Some(target.clone()));
        }

        Self {
            queue,
            controller,
            items_limit: config.items_limit,
        }
    }

    fn queue_document(&mut self, data: Option<&str>) -> Result<Value> {
        let document = Document::parse(data)?;
        let queue_id = self.queue.enqueue(document);
        to_json(&EnqueueResponse {
            success: true,
            queue_id,
        })
    }

    async fn process_queue(&mut self, data: Option<&str>) -> Result<Value> {
        let request: ProcessQueueRequest = parse_optional(data)?;
        let batch_size = positive("batch_size", request.batch_size)?;
        let report = self.controller.process(&mut self.queue, batch_size).await?;
        to_json(&report)
    }

    fn queue_items(&self, data: Option<&str>) -> Result<Value> {
        let request: QueueItemsRequest = parse_optional(data)?;
        let limit = positive("limit", request.limit)?.unwrap_or(self.items_limit);
        to_json(&QueueItemsResponse {
            items: self.queue.items(limit, request.status),
        })
    }

    fn queue_item(&self, data: Option<&str>) -> Result<Value> {
        let request: QueueItemRequest = parse_required(data)?;
        to_json(self.queue.item(&request.queue_id)?)
    }

    fn set_target_process(&mut self, data: Option<&str>) -> Result<Value> {
        match parse_target(data)? {
            Some(target) => {
                self.queue.set_target(Some(target));
                Ok(json!(TARGET_SET))
            }
            None => {
                self.queue.set_target(None);
                Ok(json!(TARGET_CLEARED))
            }
        }
    }
}

impl Service for QueueService {
    const NAME: &'static str = "queue";

    async fn handle(&mut self, request: ActionRequest) -> Result<Value> {
        let data = request.data();

        match request.action.as_str() {
            ACTION_PING => Ok(json!(PONG)),
            ACTION_QUEUE_DOCUMENT => self.queue_document(data),
            ACTION_PROCESS_QUEUE => self.process_queue(data).await,
            ACTION_GET_QUEUE_STATUS => to_json(&self.queue.status()),
            ACTION_GET_QUEUE_ITEMS => self.queue_items(data),
            ACTION_GET_QUEUE_ITEM => self.queue_item(data),
            ACTION_SET_TARGET_PROCESS => self.set_target_process(data),
            other => Err(ServiceError::UnknownAction(other.to_string())),
        }
    }
}

/// Optional count parameter; present values must be at least one.
fn positive(name: &str, value: Option<i64>) -> Result<Option<usize>> {
    match value {
        None => Ok(None),
        Some(value) if value > 0 => Ok(Some(value as usize)),
        Some(value) => Err(ServiceError::InvalidArgument(format!(
            "{} must be positive, got {}",
            name, value
        ))),
    }
}

/// Accepts a bare identifier, a JSON string, or `null`/empty to unset.
fn parse_target(data: Option<&str>) -> Result<Option<String>> {
    let raw = match data.map(str::trim) {
        None | Some("") | Some("null") => return Ok(None),
        Some(raw) => raw,
    };

    let target = if raw.starts_with('"') {
        serde_json::from_str::<String>(raw).map_err(|e| {
            ServiceError::InvalidArgument(format!("malformed target identifier: {}", e))
        })?
    } else {
        raw.to_string()
    };

    let target = target.trim();
    Ok((!target.is_empty()).then(|| target.to_string()))
}
