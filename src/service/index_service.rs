use super::actor::Service;
use super::protocol::*;
use crate::error::{Result, ServiceError};
use crate::search::engine::search;
use crate::search::index::SearchIndex;
use crate::search::sampler::sample_request;
use crate::search::types::{Document, DocumentRequest, RandomRequest, SearchRequest};

use serde_json::{Value, json};

/// The indexing/query service. Owns the document store and inverted index.
#[derive(Default)]
pub struct IndexService {
    index: SearchIndex,
}

impl IndexService {
    pub fn new() -> Self {
        Self::default()
    }

    fn index_document(&mut self, data: Option<&str>) -> Result<Value> {
        let document = Document::parse(data)?;
        let doc_id = document.id.clone();
        self.index.index_document(document)?;
        tracing::info!("Indexed document {} ({} total)", doc_id, self.index.len());
        Ok(json!(DOCUMENT_INDEXED))
    }

    fn search_document(&self, data: Option<&str>) -> Result<Value> {
        let request: SearchRequest = parse_required(data)?;
        let hits = search(&self.index, &request)?;
        tracing::debug!(
            "Search {:?} with {} filters: {} hits",
            request.query,
            request.filters.len(),
            hits.len()
        );
        to_json(&hits)
    }

    fn random_documents(&self, data: Option<&str>) -> Result<Value> {
        let request: RandomRequest = parse_required(data)?;
        to_json(&sample_request(&self.index, &request)?)
    }

    fn get_document(&self, data: Option<&str>) -> Result<Value> {
        let request: DocumentRequest = parse_required(data)?;
        let document = self
            .index
            .get(&request.id)
            .ok_or_else(|| ServiceError::NotFound(format!("document {}", request.id)))?;
        to_json(document)
    }
}

impl Service for IndexService {
    const NAME: &'static str = "index";

    async fn handle(&mut self, request: ActionRequest) -> Result<Value> {
        let data = request.data();

        match request.action.as_str() {
            ACTION_PING => Ok(json!(PONG)),
            ACTION_INDEX_DOCUMENT => self.index_document(data),
            ACTION_SEARCH_DOCUMENT => self.search_document(data),
            ACTION_GET_RANDOM_DOCUMENTS => self.random_documents(data),
            ACTION_GET_INDEXED_TXS => to_json(&self.index.ids()),
            ACTION_GET_DOCUMENT => self.get_document(data),
            ACTION_GET_INDEX_STATS => to_json(&self.index.stats()),
            ACTION_RESET_INDEX => {
                self.index.reset();
                Ok(json!(INDEX_RESET))
            }
            other => Err(ServiceError::UnknownAction(other.to_string())),
        }
    }
}
