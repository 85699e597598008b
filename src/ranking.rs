//! Per-location match records and how they get ranked.
//!
//! A [`MatchResult`] aggregates one location's match strength against one
//! query. The query driver creates one record the first time a location
//! matches any query term, then folds further terms in with
//! [`MatchResult::combine`] instead of creating new records.
//!
//! The ranking comparison is a fixed three-level law and must stay exact:
//! ties are broken deterministically, never left to the sort's whim.
//!
//! 1. **Score** - descending (higher ratio wins)
//! 2. **Match count** - descending (more raw matches wins)
//! 3. **Location** - ascending, case-insensitive (alphabetical tiebreaker)

use serde::Serialize;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt;

/// Error type for match record construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankingError {
    /// `word_count` was zero; the score is matches per word, so a zero
    /// divisor has no meaning and must fail at construction.
    ZeroWordCount { location: String },
}

impl fmt::Display for RankingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingError::ZeroWordCount { location } => {
                write!(f, "word_count is 0 for location '{}'", location)
            }
        }
    }
}

impl Error for RankingError {}

/// The aggregate search outcome for one location against one query.
///
/// Fields are concrete and typed; there is no untyped accessor surface.
/// `score` is derived state: it always equals `match_count / word_count`
/// for the current `match_count`, recomputed on every mutation.
// No Deserialize: construction must go through `new` so the zero-divisor
// check cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    word_count: u32,
    match_count: u32,
    score: f64,
    location: String,
}

impl MatchResult {
    /// Create a record for `location` with the location's total word count
    /// and the first matching term's match count.
    ///
    /// Fails with [`RankingError::ZeroWordCount`] when `word_count` is 0
    /// rather than silently producing a NaN or infinite score.
    pub fn new(
        word_count: u32,
        match_count: u32,
        location: impl Into<String>,
    ) -> Result<Self, RankingError> {
        let location = location.into();
        if word_count == 0 {
            return Err(RankingError::ZeroWordCount { location });
        }
        Ok(Self {
            word_count,
            match_count,
            score: f64::from(match_count) / f64::from(word_count),
            location,
        })
    }

    /// Fold another record's match count into this one, recomputing the
    /// score against this record's own word count.
    ///
    /// Both records must describe the same location; `other.word_count` and
    /// `other.location` are ignored. Combining records for different
    /// locations is a caller error.
    pub fn combine(&mut self, other: &MatchResult) {
        debug_assert_eq!(
            self.location, other.location,
            "combined MatchResults must describe the same location"
        );
        self.set_match_count(self.match_count + other.match_count);
    }

    /// Overwrite the match count and recompute the score.
    pub fn set_match_count(&mut self, match_count: u32) {
        self.match_count = match_count;
        self.score = f64::from(match_count) / f64::from(self.word_count);
    }

    /// Replace the location identifier.
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    /// Total distinct term occurrences recorded for this location.
    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    /// Cumulative count of matching term occurrences.
    pub fn match_count(&self) -> u32 {
        self.match_count
    }

    /// `match_count / word_count` for the current match count.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// The location identifier this record describes.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The score rendered to exactly 8 decimal digits, fixed-point.
    /// This is the form the canonical serializer embeds.
    pub fn score_string(&self) -> String {
        format!("{:.8}", self.score)
    }

    /// Compare two records for ranking.
    ///
    /// Sort order:
    /// 1. **Score** - descending (higher wins)
    /// 2. **Match count** - descending tiebreaker
    /// 3. **Location** - ascending, case-insensitive, for determinism
    ///
    /// Scores are always finite (ratio of u32s with a nonzero divisor), so
    /// `total_cmp` agrees with plain numeric order here.
    pub fn compare(&self, other: &MatchResult) -> Ordering {
        match other.score.total_cmp(&self.score) {
            Ordering::Equal => match other.match_count.cmp(&self.match_count) {
                Ordering::Equal => {
                    let a = self.location.to_lowercase();
                    let b = other.location.to_lowercase();
                    a.cmp(&b)
                }
                ord => ord,
            },
            ord => ord,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[count: {}, score: {}, where: {}]",
            self.match_count, self.score, self.location
        )
    }
}

/// Sort results into ranking order using [`MatchResult::compare`].
///
/// The serializer never sorts; reporting code calls this first and hands the
/// pre-sorted slice over.
pub fn rank_results(results: &mut [MatchResult]) {
    results.sort_by(MatchResult::compare);
}
