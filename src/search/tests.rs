//! Search Module Tests
//!
//! Validates the search pipeline, including text processing, document storage, ranking and sampling.
//!
//! ## Test Scopes
//! - **Tokenizer**: Ensures tag values are correctly split, normalized and counted.
//! - **Documents**: Checks payload validation at the ingest boundary.
//! - **Index**: Verifies re-index replacement, posting purges and reset.
//! - **Engine**: Verifies term-frequency ranking, tie-breaking and exact tag filters.
//! - **Sampler**: Verifies seeded, reproducible sampling.

#[cfg(test)]
mod tests {
    use crate::error::ServiceError;
    use crate::search::engine::search;
    use crate::search::index::SearchIndex;
    use crate::search::sampler::{random_sample, sample_request};
    use crate::search::tokenizer::{term_frequencies, tokenize, tokenize_query};
    use crate::search::types::{Document, RandomRequest, SearchRequest, Tag};

    fn doc(id: &str, tags: &[(&str, &str)]) -> Document {
        Document::new(
            id,
            tags.iter().map(|(name, value)| Tag::new(*name, *value)).collect(),
        )
    }

    /// The three documents used throughout the end-to-end scenario.
    fn library() -> SearchIndex {
        let mut index = SearchIndex::new();
        index
            .index_document(doc(
                "test-tx-1",
                &[
                    ("Title", "Introduction to Blockchain Technology"),
                    ("Author", "Alice Johnson"),
                    ("Category", "Technology"),
                    ("Year", "2024"),
                ],
            ))
            .unwrap();
        index
            .index_document(doc(
                "test-tx-2",
                &[
                    ("Title", "Advanced Machine Learning Algorithms"),
                    ("Author", "Bob Smith"),
                    ("Category", "Computer Science"),
                    ("Year", "2023"),
                ],
            ))
            .unwrap();
        index
            .index_document(doc(
                "test-tx-3",
                &[
                    ("Title", "Quantum Computing Fundamentals"),
                    ("Author", "Carol Davis"),
                    ("Category", "Physics"),
                    ("Year", "2024"),
                ],
            ))
            .unwrap();
        index
    }

    fn ids(hits: &[crate::search::types::SearchHit]) -> Vec<&str> {
        hits.iter().map(|hit| hit.id.as_str()).collect()
    }

    // ============================================================
    // TOKENIZER TESTS
    // ============================================================

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        let tokens = tokenize(["Quantum Computing-Fundamentals", "RUST"]);

        assert!(tokens.contains("quantum"));
        assert!(tokens.contains("computing"));
        assert!(tokens.contains("fundamentals"));
        assert!(tokens.contains("rust"));
        assert!(!tokens.contains("RUST"));
    }

    #[test]
    fn test_tokenize_keeps_numbers_and_short_words() {
        let tokens = tokenize(["C++ 2024 a b"]);

        assert!(tokens.contains("c"));
        assert!(tokens.contains("2024"));
        assert!(tokens.contains("a"));
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_tokenize_drops_empty_tokens() {
        assert!(tokenize(["", "  ", "!!!---"]).is_empty());
        assert!(tokenize_query("").is_empty());
    }

    #[test]
    fn test_tokenize_unicode() {
        let tokens = tokenize(["Książka о программировании"]);

        // Non-ASCII letters are alphanumeric too
        assert!(tokens.contains("książka"));
        assert!(tokens.contains("программировании"));
    }

    #[test]
    fn test_term_frequencies_count_across_values() {
        let frequencies = term_frequencies(["rust book", "Rust in action", "rust"]);

        assert_eq!(frequencies.get("rust"), Some(&3));
        assert_eq!(frequencies.get("book"), Some(&1));
        assert_eq!(frequencies.get("action"), Some(&1));
    }

    #[test]
    fn test_term_frequencies_key_set_matches_tokenize() {
        let values = ["Hello, World!", "hello again"];
        let frequencies = term_frequencies(values);
        let tokens = tokenize(values);

        let mut keys: Vec<_> = frequencies.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, tokens.into_iter().collect::<Vec<_>>());
    }

    // ============================================================
    // DOCUMENT VALIDATION TESTS
    // ============================================================

    #[test]
    fn test_parse_valid_document_ignores_extra_fields() {
        let raw = r#"{"id":"tx-1","tags":[{"name":"Title","value":"A"}],"owner":{"address":"abc"}}"#;

        let document = Document::parse(Some(raw)).expect("document should parse");

        assert_eq!(document.id, "tx-1");
        assert_eq!(document.tags, vec![Tag::new("Title", "A")]);
        assert!(document.indexed_at.is_none());
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let result = Document::parse(Some("invalid json"));
        assert!(matches!(result, Err(ServiceError::InvalidDocument(_))));
    }

    #[test]
    fn test_parse_rejects_empty_payload() {
        assert!(matches!(
            Document::parse(None),
            Err(ServiceError::InvalidDocument(_))
        ));
        assert!(matches!(
            Document::parse(Some("   ")),
            Err(ServiceError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_parse_rejects_missing_or_empty_id() {
        assert!(Document::parse(Some(r#"{"tags":[]}"#)).is_err());
        assert!(Document::parse(Some(r#"{"id":"","tags":[]}"#)).is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_tags() {
        assert!(Document::parse(Some(r#"{"id":"x"}"#)).is_err());
        assert!(Document::parse(Some(r#"{"id":"x","tags":{"Title":"A"}}"#)).is_err());
        assert!(Document::parse(Some(r#"{"id":"x","tags":[{"name":"Title"}]}"#)).is_err());
        assert!(Document::parse(Some(r#"{"id":"x","tags":[{"name":"","value":"A"}]}"#)).is_err());
    }

    // ============================================================
    // INDEX TESTS
    // ============================================================

    #[test]
    fn test_index_document_records_postings_and_timestamp() {
        let index = library();

        assert_eq!(index.len(), 3);
        assert!(index.get("test-tx-3").unwrap().indexed_at.is_some());
        assert_eq!(index.postings("quantum").unwrap().get("test-tx-3"), Some(&1));
        assert_eq!(index.postings("2024").unwrap().len(), 2);
    }

    #[test]
    fn test_enumeration_is_insertion_ordered() {
        let index = library();
        assert_eq!(index.ids(), vec!["test-tx-1", "test-tx-2", "test-tx-3"]);
    }

    #[test]
    fn test_reindex_replaces_not_duplicates() {
        // ARRANGE
        let mut index = library();

        // ACT: same id, new tags
        index
            .index_document(doc("test-tx-1", &[("Title", "Gardening Basics")]))
            .unwrap();

        // ASSERT: one entry, in its original position, with only the new postings
        assert_eq!(index.len(), 3);
        assert_eq!(index.ids()[0], "test-tx-1");
        assert!(index.postings("blockchain").is_none());
        assert!(index.postings("alice").is_none());
        assert!(index.postings("gardening").unwrap().contains_key("test-tx-1"));

        let hits = search(&index, &SearchRequest::new("blockchain")).unwrap();
        assert!(hits.is_empty());
        let hits = search(&index, &SearchRequest::new("gardening")).unwrap();
        assert_eq!(ids(&hits), vec!["test-tx-1"]);
    }

    #[test]
    fn test_reindex_keeps_shared_terms_of_other_documents() {
        let mut index = library();

        index
            .index_document(doc("test-tx-1", &[("Title", "Nothing")]))
            .unwrap();

        // "2024" was shared with test-tx-3
        let posting = index.postings("2024").unwrap();
        assert!(!posting.contains_key("test-tx-1"));
        assert!(posting.contains_key("test-tx-3"));
    }

    #[test]
    fn test_index_document_rejects_invalid_without_mutation() {
        let mut index = library();
        let before = index.stats();

        let result = index.index_document(doc("", &[("Title", "Ghost")]));

        assert!(matches!(result, Err(ServiceError::InvalidDocument(_))));
        assert_eq!(index.stats(), before);
        assert!(index.postings("ghost").is_none());
    }

    #[test]
    fn test_remove_document_purges_postings() {
        let mut index = library();

        let removed = index.remove_document("test-tx-3").unwrap();

        assert_eq!(removed.id, "test-tx-3");
        assert!(index.get("test-tx-3").is_none());
        assert!(index.postings("quantum").is_none());
        assert!(!index.postings("2024").unwrap().contains_key("test-tx-3"));
        assert!(index.remove_document("test-tx-3").is_none());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut index = library();

        index.reset();
        assert!(index.ids().is_empty());
        assert_eq!(index.stats().terms, 0);

        index.reset();
        assert!(index.ids().is_empty());
        assert!(index.is_empty());
    }

    // ============================================================
    // ENGINE TESTS
    // ============================================================

    #[test]
    fn test_search_finds_matching_document() {
        let index = library();

        let hits = search(&index, &SearchRequest::new("quantum")).unwrap();

        assert_eq!(ids(&hits), vec!["test-tx-3"]);
        assert_eq!(hits[0].score, 1);
    }

    #[test]
    fn test_search_or_semantics_and_ranking() {
        // ARRANGE
        let mut index = SearchIndex::new();
        index
            .index_document(doc("a", &[("Title", "rust"), ("Subject", "rust rust")]))
            .unwrap();
        index
            .index_document(doc("b", &[("Title", "rust programming")]))
            .unwrap();
        index
            .index_document(doc("c", &[("Title", "programming")]))
            .unwrap();

        // ACT
        let hits = search(&index, &SearchRequest::new("Rust programming")).unwrap();

        // ASSERT: a = 3 (rust x3), b = 2 (rust + programming), c = 1
        assert_eq!(ids(&hits), vec!["a", "b", "c"]);
        assert_eq!(
            hits.iter().map(|hit| hit.score).collect::<Vec<_>>(),
            vec![3, 2, 1]
        );
    }

    #[test]
    fn test_search_ties_break_by_id() {
        let mut index = SearchIndex::new();
        for id in ["zeta", "alpha", "mid"] {
            index
                .index_document(doc(id, &[("Title", "shared")]))
                .unwrap();
        }

        let hits = search(&index, &SearchRequest::new("shared")).unwrap();

        assert_eq!(ids(&hits), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_search_repeated_query_terms_count_once() {
        let index = library();

        let hits = search(&index, &SearchRequest::new("quantum quantum QUANTUM")).unwrap();

        assert_eq!(hits[0].score, 1);
    }

    #[test]
    fn test_search_empty_and_unmatched_queries() {
        let index = library();

        assert!(search(&index, &SearchRequest::new("")).unwrap().is_empty());
        assert!(search(&index, &SearchRequest::new("   ")).unwrap().is_empty());
        assert!(search(&index, &SearchRequest::new("xyz")).unwrap().is_empty());
    }

    #[test]
    fn test_filter_exactness() {
        let index = library();

        let exact = SearchRequest::new("quantum").with_filter("Category", "Physics");
        let lower = SearchRequest::new("quantum").with_filter("Category", "physics");
        let other = SearchRequest::new("quantum").with_filter("Category", "Chemistry");
        let partial = SearchRequest::new("quantum").with_filter("Category", "Phys");

        assert_eq!(ids(&search(&index, &exact).unwrap()), vec!["test-tx-3"]);
        assert!(search(&index, &lower).unwrap().is_empty());
        assert!(search(&index, &other).unwrap().is_empty());
        assert!(search(&index, &partial).unwrap().is_empty());
    }

    #[test]
    fn test_filter_on_other_category_returns_empty() {
        let index = library();

        let request = SearchRequest::new("quantum").with_filter("Category", "Technology");

        assert!(search(&index, &request).unwrap().is_empty());
    }

    #[test]
    fn test_filter_requires_every_key() {
        let index = library();

        let both = SearchRequest::new("2024")
            .with_filter("Category", "Physics")
            .with_filter("Year", "2024");
        let mismatch = SearchRequest::new("2024")
            .with_filter("Category", "Physics")
            .with_filter("Year", "2023");

        assert_eq!(ids(&search(&index, &both).unwrap()), vec!["test-tx-3"]);
        assert!(search(&index, &mismatch).unwrap().is_empty());
    }

    #[test]
    fn test_filter_only_search_scans_all_documents() {
        let index = library();

        let request = SearchRequest::new("").with_filter("Year", "2024");
        let hits = search(&index, &request).unwrap();

        assert_eq!(ids(&hits), vec!["test-tx-1", "test-tx-3"]);
        assert!(hits.iter().all(|hit| hit.score == 0));
    }

    #[test]
    fn test_quoted_filter_values_are_unwrapped() {
        let mut index = SearchIndex::new();
        index
            .index_document(doc(
                "pdf",
                &[("Content-Type", "application/pdf"), ("Title", "cyborg manifesto")],
            ))
            .unwrap();

        let request =
            SearchRequest::new("cyborg").with_filter("Content-Type", "\"application/pdf\"");

        assert_eq!(ids(&search(&index, &request).unwrap()), vec!["pdf"]);
    }

    #[test]
    fn test_quoted_tag_values_match_exactly() {
        // ARRANGE: a tag value that really carries the quotes
        let mut index = SearchIndex::new();
        index
            .index_document(doc("quoted", &[("Title", "\"Dune\"")]))
            .unwrap();
        index
            .index_document(doc("plain", &[("Title", "Dune")]))
            .unwrap();

        // ACT
        let quoted = search(
            &index,
            &SearchRequest::new("dune").with_filter("Title", "\"Dune\""),
        )
        .unwrap();
        let plain = search(&index, &SearchRequest::new("dune").with_filter("Title", "Dune")).unwrap();

        // ASSERT: the raw value and its unquoted form both count as exact matches
        assert_eq!(ids(&quoted), vec!["plain", "quoted"]);
        assert_eq!(ids(&plain), vec!["plain"]);
    }

    #[test]
    fn test_search_pagination() {
        let index = library();
        let mut request = SearchRequest::new("2024 2023");
        request.limit = Some(1);
        request.offset = Some(1);

        let hits = search(&index, &request).unwrap();

        // All three score 1, ordered by id; the second page of size one is tx-2
        assert_eq!(ids(&hits), vec!["test-tx-2"]);
    }

    #[test]
    fn test_search_rejects_bad_pagination() {
        let index = library();

        let mut zero_limit = SearchRequest::new("quantum");
        zero_limit.limit = Some(0);
        let mut negative_offset = SearchRequest::new("quantum");
        negative_offset.offset = Some(-1);

        assert!(matches!(
            search(&index, &zero_limit),
            Err(ServiceError::InvalidArgument(_))
        ));
        assert!(matches!(
            search(&index, &negative_offset),
            Err(ServiceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_search_after_reset_returns_empty() {
        let mut index = library();
        assert!(!search(&index, &SearchRequest::new("blockchain")).unwrap().is_empty());

        index.reset();

        assert!(search(&index, &SearchRequest::new("blockchain")).unwrap().is_empty());
    }

    #[test]
    fn test_search_is_deterministic() {
        let index = library();
        let request = SearchRequest::new("2024 english technology");

        assert_eq!(search(&index, &request).unwrap(), search(&index, &request).unwrap());
    }

    // ============================================================
    // SAMPLER TESTS
    // ============================================================

    #[test]
    fn test_sampling_is_deterministic() {
        let index = library();

        let first = random_sample(&index, 42, 2);
        let second = random_sample(&index, 42, 2);

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sampling_ignores_insertion_order() {
        let first = library();
        let mut second = SearchIndex::new();
        for id in ["test-tx-3", "test-tx-1", "test-tx-2"] {
            second
                .index_document(first.get(id).unwrap().clone())
                .unwrap();
        }

        let a: Vec<String> = random_sample(&first, 7, 2).into_iter().map(|d| d.id).collect();
        let b: Vec<String> = random_sample(&second, 7, 2).into_iter().map(|d| d.id).collect();

        assert_eq!(a, b);
    }

    #[test]
    fn test_sampling_caps_at_index_size() {
        let index = library();

        let sample = random_sample(&index, 1, 10);
        let mut sampled: Vec<String> = sample.into_iter().map(|d| d.id).collect();
        sampled.sort();

        assert_eq!(sampled, vec!["test-tx-1", "test-tx-2", "test-tx-3"]);
        assert!(random_sample(&index, 1, 0).is_empty());
        assert!(random_sample(&SearchIndex::new(), 1, 5).is_empty());
    }

    #[test]
    fn test_sample_request_validation() {
        let index = library();

        let negative = RandomRequest { seed: Some(42), n: -1 };
        let unseeded = RandomRequest { seed: None, n: 2 };
        let negative_seed = RandomRequest { seed: Some(-5), n: 1 };

        assert!(matches!(
            sample_request(&index, &negative),
            Err(ServiceError::InvalidArgument(_))
        ));
        assert_eq!(sample_request(&index, &unseeded).unwrap().len(), 2);
        assert_eq!(sample_request(&index, &negative_seed).unwrap().len(), 1);
    }
}
