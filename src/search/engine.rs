use super::index::SearchIndex;
use super::tokenizer::tokenize_query;
use super::types::{Document, SearchHit, SearchRequest};
use crate::error::{Result, ServiceError};
use std::collections::{BTreeMap, HashMap};

/// Ranks documents by term frequency of the query terms, then applies exact tag filters.
///
/// Candidates are the union of the posting lists of the query terms. A query with
/// no terms but with filters scans every indexed document with score 0.
pub fn search(index: &SearchIndex, request: &SearchRequest) -> Result<Vec<SearchHit>> {
    let (offset, limit) = pagination(request)?;
    let query_tokens = tokenize_query(&request.query);

    let mut doc_scores: HashMap<&str, usize> = HashMap::new();
    if query_tokens.is_empty() {
        if request.filters.is_empty() {
            return Ok(Vec::new());
        }
        for document in index.documents() {
            doc_scores.insert(document.id.as_str(), 0);
        }
    } else {
        for token in query_tokens.iter() {
            if let Some(posting) = index.postings(token) {
                for (doc_id, frequency) in posting {
                    *doc_scores.entry(doc_id.as_str()).or_insert(0) += frequency;
                }
            }
        }
    }

    let mut results: Vec<SearchHit> = doc_scores
        .into_iter()
        .filter_map(|(doc_id, score)| index.get(doc_id).map(|document| (document, score)))
        .filter(|(document, _)| matches_filters(document, &request.filters))
        .map(|(document, score)| SearchHit {
            id: document.id.clone(),
            tags: document.tags.clone(),
            indexed_at: document.indexed_at.unwrap_or_default(),
            score,
        })
        .collect();

    results.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(&b.id)));

    Ok(results.into_iter().skip(offset).take(limit).collect())
}

/// Every filter must match a tag with that exact name and exactly that value.
///
/// A JSON-encoded value also matches its decoded form, so `"\"application/pdf\""`
/// selects both `application/pdf` and a tag literally stored with the quotes.
pub fn matches_filters(document: &Document, filters: &BTreeMap<String, String>) -> bool {
    filters.iter().all(|(name, expected)| {
        document.has_tag(name, expected) || document.has_tag(name, unquote(expected))
    })
}

/// Clients sometimes send JSON-encoded filter values (`"\"application/pdf\""`).
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn pagination(request: &SearchRequest) -> Result<(usize, usize)> {
    let offset = match request.offset {
        None => 0,
        Some(offset) if offset >= 0 => offset as usize,
        Some(offset) => {
            return Err(ServiceError::InvalidArgument(format!(
                "offset must not be negative, got {}",
                offset
            )));
        }
    };
    let limit = match request.limit {
        None => usize::MAX,
        Some(limit) if limit > 0 => limit as usize,
        Some(limit) => {
            return Err(ServiceError::InvalidArgument(format!(
                "limit must be positive, got {}",
                limit
            )));
        }
    };
    Ok((offset, limit))
}
