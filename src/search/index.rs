//! Document Store and Inverted Index
//!
//! `SearchIndex` is the canonical record of every indexed document plus the
//! term → posting-list map used for retrieval. It is owned by the index service
//! actor, so none of its methods need interior locking.
//!
//! Invariants kept by every mutation:
//! - a document id appears in a term's postings iff that term occurs in one of
//!   the document's current tag values;
//! - the set of ids reachable through `ids()` equals the store's key set.

use super::tokenizer::term_frequencies;
use super::types::{Document, IndexStats};
use crate::error::Result;
use crate::now_ms;

use indexmap::IndexMap;
use std::collections::HashMap;

/// Term → (document id → term frequency).
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, HashMap<String, usize>>,
}

impl InvertedIndex {
    pub fn insert(&mut self, doc_id: &str, frequencies: &HashMap<String, usize>) {
        for (term, frequency) in frequencies {
            self.postings
                .entry(term.clone())
                .or_default()
                .insert(doc_id.to_string(), *frequency);
        }
    }

    /// Drops `doc_id` from the postings of every listed term. Terms left
    /// without postings are removed entirely.
    pub fn purge<'a, I>(&mut self, doc_id: &str, terms: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for term in terms {
            if let Some(posting) = self.postings.get_mut(term) {
                posting.remove(doc_id);
                if posting.is_empty() {
                    self.postings.remove(term);
                }
            }
        }
    }

    pub fn postings(&self, term: &str) -> Option<&HashMap<String, usize>> {
        self.postings.get(term)
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn clear(&mut self) {
        self.postings.clear();
    }
}

#[derive(Debug)]
struct StoredDocument {
    document: Document,
    /// Distinct terms this document contributed, kept for posting purges.
    terms: Vec<String>,
}

/// The document store and its inverted index, mutated together.
#[derive(Debug, Default)]
pub struct SearchIndex {
    documents: IndexMap<String, StoredDocument>,
    inverted: InvertedIndex,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a document.
    ///
    /// A re-indexed id keeps its original enumeration position; its old postings
    /// are purged before the new ones are inserted.
    pub fn index_document(&mut self, mut document: Document) -> Result<()> {
        document.validate()?;

        if let Some(previous) = self.documents.get(&document.id) {
            self.inverted.purge(&document.id, &previous.terms);
            tracing::debug!("Replacing postings of document {}", document.id);
        }

        let frequencies = term_frequencies(document.tag_values());
        self.inverted.insert(&document.id, &frequencies);

        let mut terms: Vec<String> = frequencies.into_keys().collect();
        terms.sort();

        document.indexed_at = Some(now_ms());
        self.documents.insert(
            document.id.clone(),
            StoredDocument { document, terms },
        );

        Ok(())
    }

    /// Removes a document and every posting referencing it.
    pub fn remove_document(&mut self, id: &str) -> Option<Document> {
        let stored = self.documents.shift_remove(id)?;
        self.inverted.purge(id, &stored.terms);
        Some(stored.document)
    }

    /// Clears the store and the inverted index. Resetting an empty index is a no-op.
    pub fn reset(&mut self) {
        let ids = self.ids();
        for id in &ids {
            self.remove_document(id);
        }
        self.inverted.clear();
        tracing::info!("Index reset, {} documents removed", ids.len());
    }

    /// All indexed ids in first-indexed order.
    pub fn ids(&self) -> Vec<String> {
        self.documents.keys().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.get(id).map(|stored| &stored.document)
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values().map(|stored| &stored.document)
    }

    pub fn postings(&self, term: &str) -> Option<&HashMap<String, usize>> {
        self.inverted.postings(term)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.documents.len(),
            terms: self.inverted.term_count(),
        }
    }
}
