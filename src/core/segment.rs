use serde::{Deserialize, Serialize};

use crate::core::error::BestHitError;

/// Largest accepted query position. Keeps every length sum far below `u64::MAX`.
pub const MAX_POSITION: u64 = u32::MAX as u64;

/// A single scored HSP (high-scoring segment pair) between a query and a hit
///
/// Positions are 1-based and inclusive, as reported by BLAST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// HSP number within the hit (stable ordering tag)
    pub hsp_index: u64,

    pub query_start: u64,
    pub query_end: u64,
    pub hit_start: u64,
    pub hit_end: u64,

    pub gaps: u64,
    pub positive: u64,
    pub identity: u64,

    /// Bit score
    pub score: f64,
}

impl Segment {
    /// Create a segment covering `query_start..=query_end` with the given bit score.
    ///
    /// Hit coordinates mirror the query coordinates and the count fields are zero;
    /// use the `with_*` methods to fill them in.
    pub fn new(hsp_index: u64, query_start: u64, query_end: u64, score: f64) -> Self {
        Self {
            hsp_index,
            query_start,
            query_end,
            hit_start: query_start,
            hit_end: query_end,
            gaps: 0,
            positive: 0,
            identity: 0,
            score,
        }
    }

    #[must_use]
    pub fn with_hit_range(mut self, hit_start: u64, hit_end: u64) -> Self {
        self.hit_start = hit_start;
        self.hit_end = hit_end;
        self
    }

    #[must_use]
    pub fn with_counts(mut self, gaps: u64, positive: u64, identity: u64) -> Self {
        self.gaps = gaps;
        self.positive = positive;
        self.identity = identity;
        self
    }

    /// Number of query positions covered by this segment.
    ///
    /// Exact for segments that pass [`Self::validate`]; an inverted interval
    /// saturates to a length of 1 instead of wrapping.
    #[inline]
    pub fn query_len(&self) -> u64 {
        self.query_end
            .saturating_sub(self.query_start)
            .saturating_add(1)
    }

    /// True if this segment starts strictly after `end` in query coordinates.
    ///
    /// Sharing a boundary position counts as overlap.
    #[inline]
    pub fn follows(&self, end: u64) -> bool {
        self.query_start > end
    }

    /// Check that the query interval is a 1-based `start <= end` range ending
    /// at or before [`MAX_POSITION`].
    ///
    /// # Errors
    ///
    /// Returns `BestHitError::DegenerateInterval` if the query interval is inverted,
    /// starts at 0 or ends past `MAX_POSITION`.
    pub fn validate(&self) -> Result<(), BestHitError> {
        if self.query_start == 0
            || self.query_start > self.query_end
            || self.query_end > MAX_POSITION
        {
            return Err(BestHitError::DegenerateInterval {
                hsp: self.hsp_index,
                query_start: self.query_start,
                query_end: self.query_end,
            });
        }
        Ok(())
    }
}
