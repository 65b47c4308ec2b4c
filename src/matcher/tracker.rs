/// Closest-match tracking for one search.
///
/// A [`MatchTracker`] is owned by a single search session and folds every
/// scanned line into the best candidate seen so far.
use serde::Serialize;
use tracing::debug;

use crate::document::{Range, TextLine};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateMatch {
    /// Token text that produced the rating.
    pub symbol: String,
    /// Full range of the line holding the token, line break included.
    pub range: Range,
    pub rating: f64,
    pub distance_from_cursor: u32,
}

impl CandidateMatch {
    /// Strictly higher rating wins; an equal rating wins only when strictly
    /// closer to the cursor.
    #[must_use]
    pub fn outranks(&self, other: &CandidateMatch) -> bool {
        self.rating > other.rating
            || (self.rating == other.rating && self.distance_from_cursor < other.distance_from_cursor)
    }
}

#[derive(Debug, Default)]
pub struct MatchTracker {
    best: Option<CandidateMatch>,
}

impl MatchTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score `line` against `pattern` and keep it if it outranks the current
    /// best. Lines without tokens are skipped. Returns whether the best changed.
    pub fn update(&mut self, pattern: &str, line: &TextLine, cursor_line: u32) -> bool {
        let Some(best) = super::score_line(pattern, &line.text) else {
            return false;
        };

        let candidate = CandidateMatch {
            symbol: best.token.to_string(),
            range: line.range_including_line_break,
            rating: best.rating,
            distance_from_cursor: cursor_line.abs_diff(line.line_number),
        };
        debug!(
            line = line.line_number,
            token = %candidate.symbol,
            rating = candidate.rating,
            distance = candidate.distance_from_cursor,
            "scored line"
        );
        self.offer(candidate)
    }

    /// Fold an already scored candidate into the tracker.
    pub fn offer(&mut self, candidate: CandidateMatch) -> bool {
        match &self.best {
            Some(current) if !candidate.outranks(current) => false,
            _ => {
                self.best = Some(candidate);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.best = None;
    }

    #[must_use]
    pub fn best(&self) -> Option<&CandidateMatch> {
        self.best.as_ref()
    }

    #[must_use]
    pub fn into_best(self) -> Option<CandidateMatch> {
        self.best
    }
}
