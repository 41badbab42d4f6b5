//! Queue Forwarding Module
//!
//! This module moves queued documents into an indexing service.
//!
//! ## Architecture Overview
//! 1. **Resolution**: The queue's target identifier is resolved through the `TargetRegistry`
//!    to either an in-process mailbox or a remote HTTP endpoint.
//! 2. **Claiming**: A batch of eligible items is marked `processing` up front.
//! 3. **Forwarding**: Each document is sent as an `Index_document` message with a bounded wait.
//! 4. **Reconciliation**: Outcomes are written back as `done` / `failed`; failed items are
//!    picked up again by the next pass (at-least-once forwarding).
//!
//! ## Submodules
//! - **`controller`**: The `Process_queue` batch state machine.
//! - **`registry`**: Maps target identifiers to forwarding closures.
//! - **`target`**: Mailbox and HTTP forwarders.
//! - **`scheduler`**: Optional periodic drain of the queue.

pub mod controller;
pub mod registry;
pub mod scheduler;
pub mod target;
