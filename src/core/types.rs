use serde::{Deserialize, Serialize};

use crate::core::segment::Segment;

/// Identifies a query within a search collection (the BLAST database searched)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub collection: String,
    pub query: String,
}

impl GroupKey {
    pub fn new(collection: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            query: query.into(),
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.collection, self.query)
    }
}

/// Identifier of a candidate hit within a group
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HitKey(pub String);

impl HitKey {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HitKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Aggregation mode a result was produced under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateMode {
    /// Unconditional sum over every segment of a hit
    Total,
    /// Non-overlapping path (exact below the cutoff, approximate above it)
    Path,
}

impl AggregateMode {
    /// Column prefix used in result rows
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Total => "t",
            Self::Path => "p",
        }
    }
}

/// Summable per-segment fields
///
/// Stored as `f64` because the approximate aggregator scales them by a coverage
/// ratio; exact and total sums are always whole numbers except `score`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSums {
    pub gaps: f64,
    pub positive: f64,
    pub identity: f64,
    pub score: f64,
}

impl FieldSums {
    #[allow(clippy::cast_precision_loss)]
    pub fn from_segment(segment: &Segment) -> Self {
        Self {
            gaps: segment.gaps as f64,
            positive: segment.positive as f64,
            identity: segment.identity as f64,
            score: segment.score,
        }
    }

    /// Field-wise sum over `segments`
    pub fn sum<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> Self {
        segments
            .into_iter()
            .fold(Self::default(), |acc, s| acc.add(&Self::from_segment(s)))
    }

    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self {
            gaps: self.gaps + other.gaps,
            positive: self.positive + other.positive,
            identity: self.identity + other.identity,
            score: self.score + other.score,
        }
    }

    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            gaps: self.gaps * factor,
            positive: self.positive * factor,
            identity: self.identity * factor,
            score: self.score * factor,
        }
    }
}

/// Aggregate values for one hit under one aggregation mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    #[serde(flatten)]
    pub fields: FieldSums,

    /// Covered query length (exact union, its estimate, or the naive sum for totals)
    pub align_len: u64,

    /// Number of segments contributing to the result.
    ///
    /// Depends on how the result was produced: every segment of the hit for
    /// totals and approximate paths, only the chosen segments for exact paths,
    /// 0 for a nulled hit. A path `n_hsp` is therefore only comparable across
    /// hits solved the same way.
    pub n_hsp: usize,
}

impl AggregateResult {
    /// Result of a hit nulled by the zero-score rule
    pub fn null() -> Self {
        Self::default()
    }

    /// Raw values of a lone segment
    pub fn from_single(segment: &Segment) -> Self {
        Self {
            fields: FieldSums::from_segment(segment),
            align_len: segment.query_len(),
            n_hsp: 1,
        }
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.fields.score
    }
}

/// The winning hit of a group under one mode, with its aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitSummary {
    pub hit: HitKey,
    #[serde(flatten)]
    pub result: AggregateResult,
}

/// Both best-hit summaries for a group
///
/// The total and path summaries are selected independently and may name
/// different winning hits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: GroupKey,
    pub total: HitSummary,
    pub path: HitSummary,
}

impl GroupSummary {
    pub fn get(&self, mode: AggregateMode) -> &HitSummary {
        match mode {
            AggregateMode::Total => &self.total,
            AggregateMode::Path => &self.path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_sums() {
        let a = Segment::new(1, 1, 10, 5.0).with_counts(1, 8, 6);
        let b = Segment::new(2, 20, 30, 7.5).with_counts(0, 9, 9);

        let sums = FieldSums::sum([&a, &b]);
        assert_eq!(sums.gaps, 1.0);
        assert_eq!(sums.positive, 17.0);
        assert_eq!(sums.identity, 15.0);
        assert!((sums.score - 12.5).abs() < 1e-9);

        let half = sums.scaled(0.5);
        assert!((half.positive - 8.5).abs() < 1e-9);
    }

    #[test]
    fn test_single_segment_result() {
        let seg = Segment::new(4, 11, 40, 22.0).with_counts(2, 25, 20);
        let result = AggregateResult::from_single(&seg);
        assert_eq!(result.align_len, 30);
        assert_eq!(result.n_hsp, 1);
        assert_eq!(result.fields, FieldSums::from_segment(&seg));
    }

    #[test]
    fn test_null_result_is_all_zero() {
        let null = AggregateResult::null();
        assert_eq!(null.score(), 0.0);
        assert_eq!(null.align_len, 0);
        assert_eq!(null.n_hsp, 0);
    }

    #[test]
    fn test_mode_prefix() {
        assert_eq!(AggregateMode::Total.prefix(), "t");
        assert_eq!(AggregateMode::Path.prefix(), "p");
    }
}
