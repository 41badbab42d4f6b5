use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

static TERM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Alphabetic}\p{N}]+").expect("term pattern is valid"));

fn terms(text: &str) -> Vec<String> {
    TERM_PATTERN
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Normalized, de-duplicated terms of a sequence of tag values.
pub fn tokenize<'a, I>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    values.into_iter().flat_map(terms).collect()
}

/// Per-term occurrence counts over all values, used for term-frequency scoring.
pub fn term_frequencies<'a, I>(values: I) -> HashMap<String, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut frequencies = HashMap::new();
    for term in values.into_iter().flat_map(terms) {
        *frequencies.entry(term).or_insert(0) += 1;
    }
    frequencies
}

pub fn tokenize_query(query: &str) -> BTreeSet<String> {
    tokenize([query])
}
