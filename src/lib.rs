//! Ordered term index with deterministic ranking and canonical JSON output.
//!
//! This crate is the data core of a search/indexing tool. It stores, for each
//! distinct term, every location and position at which the term occurs; it
//! ranks locations against a query by combined match strength; and it renders
//! the resulting structures into a canonical, byte-exact indented format.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────┐     ┌──────────────┐
//! │   index.rs   │     │  ranking.rs   │     │   json.rs    │
//! │  (TermIndex: │     │ (MatchResult, │     │ (write_array,│
//! │  term → loc  │     │ compare law,  │     │  ..._object, │
//! │  → positions)│     │ rank_results) │     │  ..._results)│
//! └──────┬───────┘     └───────┬───────┘     └──────▲───────┘
//!        │                     │                    │
//!        └─────────────────────┴────────────────────┘
//!          ordered views and pre-sorted result lists
//!          feed the serializer; no sort step exists
//!          anywhere downstream of the containers
//! ```
//!
//! Tokenization, crawling, and query-term matching live outside this crate: a
//! build driver feeds `(term, location, position)` triples into [`TermIndex`],
//! a query driver constructs and combines [`MatchResult`]s per location, and a
//! reporting driver hands either an index view or a query → ranked-results map
//! to the [`json`] writers.
//!
//! # Single-writer contract
//!
//! Nothing here is safe for concurrent mutation. [`TermIndex::add`] takes
//! `&mut self` and there is no internal synchronization; if a concurrent
//! build is ever needed, the extension is per-term sharding with the ordering
//! invariant kept per shard, not a global lock bolted on here.

mod index;
mod ranking;

pub mod json;

pub use index::{LocationMap, TermIndex};
pub use ranking::{rank_results, MatchResult, RankingError};
