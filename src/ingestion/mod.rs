//! Ingestion Queue Module
//!
//! Decouples document submission from indexing.
//!
//! ## Workflow
//! 1. **Submit**: `Queue_document` validates the payload and stores a `pending` item.
//! 2. **Configure**: `Set_target_process` names the indexing endpoint to forward to.
//! 3. **Forward**: `Process_queue` (see `executor::controller`) drains a batch into the target.
//! 4. **Inspect**: Status counts and item listings remain available for every item ever queued.

pub mod queue;
pub mod types;
