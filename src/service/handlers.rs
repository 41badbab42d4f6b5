use super::actor::Mailbox;
use super::protocol::{ActionRequest, ActionResponse, ENDPOINT_HEALTH, ENDPOINT_MESSAGE};
use crate::error::ServiceError;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

/// Builds the message router of one service.
pub fn router(mailbox: Mailbox) -> Router {
    Router::new()
        .route(ENDPOINT_MESSAGE, post(handle_message))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(Extension(mailbox))
}

/// Entry point for all actions of a service.
///
/// The body is decoded here rather than through `Json<ActionRequest>` so a malformed
/// envelope is answered with the usual error envelope.
pub async fn handle_message(
    Extension(mailbox): Extension<Mailbox>,
    body: String,
) -> (StatusCode, Json<ActionResponse>) {
    let request: ActionRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!("Malformed envelope sent to {}: {}", mailbox.name(), e);
            let error = ServiceError::InvalidArgument(format!("malformed message: {}", e));
            return (error.status_code(), Json(ActionResponse::err(&error)));
        }
    };

    tracing::debug!("{} received {}", mailbox.name(), request.action);

    match mailbox.call(request).await {
        Ok(data) => (StatusCode::OK, Json(ActionResponse::ok(data))),
        Err(error) => (error.status_code(), Json(ActionResponse::err(&error))),
    }
}

pub async fn handle_health() -> &'static str {
    "ok"
}
