//! Shared test fixtures.

#![allow(dead_code)]

use concordance::{MatchResult, TermIndex};

/// Build an index from (term, location, position) triples in the given order.
pub fn index_from_triples(triples: &[(&str, &str, u32)]) -> TermIndex {
    let mut index = TermIndex::new();
    for (term, location, position) in triples {
        index.add(term, location, *position);
    }
    index
}

/// Construct a MatchResult, panicking on the zero-word-count error since
/// fixtures never pass zero.
pub fn result(word_count: u32, match_count: u32, location: &str) -> MatchResult {
    MatchResult::new(word_count, match_count, location).unwrap()
}
