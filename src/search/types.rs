//! Search Data Types
//!
//! Documents as they travel through the system, plus the request and response
//! payloads of the query actions.

use crate::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single `(name, value)` pair attached to a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A tagged document keyed by a caller-supplied id.
///
/// `indexed_at` is only set on the copy held by the document store; documents
/// waiting in the ingestion queue carry `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed_at: Option<u64>,
}

/// Wire shape of a submitted document. Unknown fields (owner, block, ...) are ignored.
#[derive(Debug, Deserialize)]
struct DocumentPayload {
    id: String,
    tags: Vec<Tag>,
}

impl Document {
    pub fn new(id: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            id: id.into(),
            tags,
            indexed_at: None,
        }
    }

    /// Parses and validates a raw JSON payload.
    ///
    /// This is the single point where `InvalidDocument` is raised; everything
    /// downstream works on the validated value.
    pub fn parse(data: Option<&str>) -> Result<Self> {
        let raw = data
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| ServiceError::InvalidDocument("empty payload".to_string()))?;

        let payload: DocumentPayload = serde_json::from_str(raw)
            .map_err(|e| ServiceError::InvalidDocument(format!("malformed payload: {}", e)))?;

        let document = Document::new(payload.id, payload.tags);
        document.validate()?;
        Ok(document)
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ServiceError::InvalidDocument(
                "document id must not be empty".to_string(),
            ));
        }
        if let Some(position) = self.tags.iter().position(|tag| tag.name.is_empty()) {
            return Err(ServiceError::InvalidDocument(format!(
                "tag #{} of document {} has an empty name",
                position, self.id
            )));
        }
        Ok(())
    }

    pub fn tag_values(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.value.as_str())
    }

    /// True if any tag carries exactly this name and value.
    pub fn has_tag(&self, name: &str, value: &str) -> bool {
        self.tags
            .iter()
            .any(|tag| tag.name == name && tag.value == value)
    }
}

/// Payload of `Search_document`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(name.into(), value.into());
        self
    }
}

/// A ranked search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub tags: Vec<Tag>,
    pub indexed_at: u64,
    pub score: usize,
}

/// Payload of `Get_random_documents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomRequest {
    #[serde(default)]
    pub seed: Option<i64>,
    pub n: i64,
}

/// Payload of `Get_document`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub documents: usize,
    pub terms: usize,
}
