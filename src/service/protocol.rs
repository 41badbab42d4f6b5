//! Message Protocol Definitions
//!
//! Every operation is a named action carrying an optional JSON-encoded payload,
//! answered by an envelope holding either `data` or `error`, never both.
//!
//! Constants define the action names and the HTTP endpoints the services are mounted on.

use crate::error::{Result, ServiceError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- API Endpoints ---

pub const ENDPOINT_MESSAGE: &str = "/message";
pub const ENDPOINT_HEALTH: &str = "/health";
/// Mount point of the indexing service.
pub const INDEX_PREFIX: &str = "/index";
/// Mount point of the queue service.
pub const QUEUE_PREFIX: &str = "/queue";

// --- Actions ---

pub const ACTION_PING: &str = "Ping";
pub const ACTION_INDEX_DOCUMENT: &str = "Index_document";
pub const ACTION_SEARCH_DOCUMENT: &str = "Search_document";
pub const ACTION_GET_RANDOM_DOCUMENTS: &str = "Get_random_documents";
pub const ACTION_GET_INDEXED_TXS: &str = "Get_indexed_txs";
pub const ACTION_GET_DOCUMENT: &str = "Get_document";
pub const ACTION_GET_INDEX_STATS: &str = "Get_index_stats";
pub const ACTION_RESET_INDEX: &str = "Reset_index";
pub const ACTION_QUEUE_DOCUMENT: &str = "Queue_document";
pub const ACTION_PROCESS_QUEUE: &str = "Process_queue";
pub const ACTION_GET_QUEUE_STATUS: &str = "Get_queue_status";
pub const ACTION_GET_QUEUE_ITEMS: &str = "Get_queue_items";
pub const ACTION_GET_QUEUE_ITEM: &str = "Get_queue_item";
pub const ACTION_SET_TARGET_PROCESS: &str = "Set_target_process";

// --- Confirmation literals ---

pub const PONG: &str = "Pong";
pub const DOCUMENT_INDEXED: &str = "document indexed";
pub const INDEX_RESET: &str = "index has been reset";
pub const TARGET_SET: &str = "target process set";
pub const TARGET_CLEARED: &str = "target process cleared";

// --- Data Transfer Objects ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    /// Raw JSON payload, parsed by the action that receives it.
    #[serde(default)]
    pub data: Option<String>,
}

impl ActionRequest {
    pub fn new(action: &str, data: Option<String>) -> Self {
        Self {
            action: action.to_string(),
            data,
        }
    }

    /// Builds a request whose payload is `payload` encoded as JSON.
    pub fn with_payload<T: Serialize>(action: &str, payload: &T) -> Result<Self> {
        let data = serde_json::to_string(payload)
            .map_err(|e| ServiceError::Internal(format!("failed to encode payload: {}", e)))?;
        Ok(Self::new(action, Some(data)))
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl From<&ServiceError> for ErrorBody {
    fn from(error: &ServiceError) -> Self {
        Self {
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl ActionResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: &ServiceError) -> Self {
        Self {
            data: None,
            error: Some(ErrorBody::from(error)),
        }
    }

    pub fn into_result(self) -> std::result::Result<Value, ErrorBody> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.data.unwrap_or(Value::Null)),
        }
    }
}

impl From<Result<Value>> for ActionResponse {
    fn from(result: Result<Value>) -> Self {
        match result {
            Ok(data) => ActionResponse::ok(data),
            Err(error) => ActionResponse::err(&error),
        }
    }
}

// --- Payload helpers ---

/// Parses a payload that must be present.
pub fn parse_required<T: DeserializeOwned>(data: Option<&str>) -> Result<T> {
    let raw = data
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| ServiceError::InvalidArgument("missing payload".to_string()))?;

    serde_json::from_str(raw)
        .map_err(|e| ServiceError::InvalidArgument(format!("malformed payload: {}", e)))
}

/// Parses a payload that may be omitted, falling back to `T::default()`.
pub fn parse_optional<T: DeserializeOwned + Default>(data: Option<&str>) -> Result<T> {
    match data.map(str::trim) {
        None | Some("") | Some("null") => Ok(T::default()),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| ServiceError::InvalidArgument(format!("malformed payload: {}", e))),
    }
}

pub fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| ServiceError::Internal(format!("failed to encode response: {}", e)))
}
