//! Error taxonomy shared by both services.
//!
//! Every failed action resolves to a [`ServiceError`]. The `kind()` string is what
//! travels in the response envelope, so clients can tell a rejected request apart
//! from an empty result without parsing the message text.

use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Payload could not be parsed into a document, or a required field is missing.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Bad numeric or limit parameter, or an unparsable request payload.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `Process_queue` called before a target process was set.
    #[error("no target process configured")]
    NoTargetConfigured,

    /// The target rejected the document, timed out, or could not be reached.
    #[error("forwarding failed: {0}")]
    ForwardingFailure(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// The service mailbox is closed (the actor stopped).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::InvalidDocument(_) => "InvalidDocument",
            ServiceError::InvalidArgument(_) => "InvalidArgument",
            ServiceError::NoTargetConfigured => "NoTargetConfigured",
            ServiceError::ForwardingFailure(_) => "ForwardingFailure",
            ServiceError::NotFound(_) => "NotFound",
            ServiceError::UnknownAction(_) => "UnknownAction",
            ServiceError::ServiceUnavailable(_) => "ServiceUnavailable",
            ServiceError::Internal(_) => "Internal",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidDocument(_)
            | ServiceError::InvalidArgument(_)
            | ServiceError::UnknownAction(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::NoTargetConfigured => StatusCode::CONFLICT,
            ServiceError::ForwardingFailure(_) => StatusCode::BAD_GATEWAY,
            ServiceError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
