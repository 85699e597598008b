//! The ordered three-level term index.
//!
//! Maps term → location → positions, keeping every level sorted at all times.
//! There is no sort step anywhere in this crate: the serializer iterates the
//! index in the exact order the output format requires, so the ordering here
//! is load-bearing, not cosmetic.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **TERMS_SORTED**: term keys iterate in ascending lexicographic order
//! 2. **LOCATIONS_SORTED**: location keys within a term iterate in ascending
//!    lexicographic order
//! 3. **POSITIONS_SORTED_UNIQUE**: positions within a (term, location) pair
//!    iterate in ascending numeric order with no duplicates
//! 4. **APPEND_ONLY**: once inserted, a (term, location, position) triple is
//!    never removed; no deletion API exists
//!
//! All four hold structurally: `BTreeMap`/`BTreeSet` at every level, and no
//! method hands out a mutable path into the storage.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Location → sorted positions, the second and third index levels.
pub type LocationMap = BTreeMap<String, BTreeSet<u32>>;

/// Shared empties returned for absent key paths, so read views never need
/// an `Option` and never allocate.
static EMPTY_LOCATIONS: LocationMap = BTreeMap::new();
static EMPTY_POSITIONS: BTreeSet<u32> = BTreeSet::new();

/// Ordered store of every position at which every term occurs.
///
/// Built incrementally by repeated [`TermIndex::add`] calls during an indexing
/// pass, then read through [`TermIndex::view`] and friends during query and
/// reporting phases.
///
/// Not safe for concurrent mutation: mutation requires `&mut self`, and there
/// is no internal synchronization. Writers that want a parallel build must
/// merge per-shard indexes themselves.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermIndex {
    terms: BTreeMap<String, LocationMap>,
}

impl TermIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `term` occurs in `location` at `position`, creating the
    /// term and location entries if they do not exist yet.
    ///
    /// Returns `true` iff the position was newly inserted. A repeated insert
    /// of the same triple is a no-op returning `false`; callers use this as
    /// the duplicate-occurrence signal.
    pub fn add(&mut self, term: &str, location: &str, position: u32) -> bool {
        self.terms
            .entry(term.to_string())
            .or_default()
            .entry(location.to_string())
            .or_default()
            .insert(position)
    }

    /// Whether `term` has been indexed at least once.
    pub fn has_term(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Whether `term` occurs in `location`. Implies [`Self::has_term`].
    pub fn has_location(&self, term: &str, location: &str) -> bool {
        self.terms
            .get(term)
            .is_some_and(|locations| locations.contains_key(location))
    }

    /// Whether `term` occurs in `location` at exactly `position`.
    /// Implies [`Self::has_location`].
    pub fn has_position(&self, term: &str, location: &str, position: u32) -> bool {
        self.terms
            .get(term)
            .and_then(|locations| locations.get(location))
            .is_some_and(|positions| positions.contains(&position))
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Number of locations recorded for `term`, 0 if the term is absent.
    pub fn location_count(&self, term: &str) -> usize {
        self.terms.get(term).map_or(0, BTreeMap::len)
    }

    /// Number of positions recorded for `term` in `location`, 0 if either
    /// key is absent.
    pub fn position_count(&self, term: &str, location: &str) -> usize {
        self.terms
            .get(term)
            .and_then(|locations| locations.get(location))
            .map_or(0, BTreeSet::len)
    }

    /// True when no triple has been added yet.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The full term → location → positions structure, in iteration order
    /// matching the canonical output order.
    ///
    /// A shared borrow: the caller can walk it but cannot reach the storage
    /// mutably through it.
    pub fn view(&self) -> &BTreeMap<String, LocationMap> {
        &self.terms
    }

    /// The location → positions map for `term`, or a shared empty map when
    /// the term is absent.
    pub fn locations_of(&self, term: &str) -> &LocationMap {
        self.terms.get(term).unwrap_or(&EMPTY_LOCATIONS)
    }

    /// The position set for `term` in `location`, or a shared empty set when
    /// the key path is absent.
    pub fn positions_of(&self, term: &str, location: &str) -> &BTreeSet<u32> {
        self.terms
            .get(term)
            .and_then(|locations| locations.get(location))
            .unwrap_or(&EMPTY_POSITIONS)
    }
}

impl fmt::Display for TermIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.terms)
    }
}
