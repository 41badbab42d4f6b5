//! Service Layer
//!
//! Wraps the search index and the ingestion queue as message-driven services.
//!
//! ## Architecture Overview
//! Each service is a single actor (`actor`) owning its state. Callers, including the
//! HTTP layer (`handlers`) and the queue's in-process forwarder, only ever talk to a
//! service through its `Mailbox` by sending `(action, data)` pairs (`protocol`).
//!
//! ## Submodules
//! - **`actor`**: Mailbox loop and the `Service` trait.
//! - **`handlers`**: Axum router exposing `POST /message` per service.
//! - **`index_service`**: Action dispatch for the indexing/query service.
//! - **`queue_service`**: Action dispatch for the ingestion queue service.
//! - **`protocol`**: Envelopes, action names and payload helpers.

pub mod actor;
pub mod handlers;
pub mod index_service;
pub mod protocol;
pub mod queue_service;
