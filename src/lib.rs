//! Tag-Document Search Library
//!
//! This library crate defines the two services that make up the system and the
//! plumbing they share. It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of loosely coupled subsystems:
//!
//! - **`search`**: The core information retrieval logic. Contains the tokenizer, the
//!   document store with its inverted index, term-frequency ranking with exact tag
//!   filters, and seeded random sampling.
//! - **`ingestion`**: The intake queue. Holds submitted documents with per-item status
//!   until they are forwarded to an indexing target.
//! - **`executor`**: The forwarding engine. Drains queue batches into a configured
//!   target (in-process mailbox or remote HTTP endpoint) with timeout-as-failure.
//! - **`service`**: The actor runtime. Each service owns its state inside a single
//!   task fed by a mailbox, and is exposed as named actions over HTTP.
//! - **`config`** / **`error`**: Command-line configuration and the shared error taxonomy.

pub mod config;
pub mod error;
pub mod executor;
pub mod ingestion;
pub mod search;
pub mod service;

/// Helper to get the current system time in milliseconds.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
