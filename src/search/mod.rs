//! Search Service Module
//!
//! The core component responsible for holding the corpus and answering queries.
//!
//! ## Overview
//! This module implements the Information Retrieval (IR) pipeline of the indexing
//! service. Everything here is synchronous and owned by a single actor
//! (see `service::index_service`), so no type in this module takes a lock.
//!
//! ## Responsibilities
//! - **Tokenization**: Normalizing tag values and query strings into searchable terms.
//! - **Storage**: Keeping the canonical document record and its posting lists in step.
//! - **Ranking**: Scoring documents by term frequency and applying exact tag filters.
//! - **Sampling**: Reproducible random subsets of the corpus.
//!
//! ## Submodules
//! - **`engine`**: Query evaluation, ranking and filtering.
//! - **`index`**: Document store plus inverted index.
//! - **`sampler`**: Seeded random document selection.
//! - **`tokenizer`**: Text normalization.
//! - **`types`**: Documents and request/response payloads.

pub mod engine;
pub mod index;
pub mod sampler;
pub mod tokenizer;
pub mod types;

#[cfg(test)]
mod tests;
