//! Length-normalised path estimate for hits with too many segments to search.
//!
//! The covered query length is the exact union of segment intervals. Summable
//! fields are scaled by `union_len / total_len`, the fraction of summed segment
//! length that is not double-counted overlap.

use serde::{Deserialize, Serialize};

use crate::core::error::BestHitError;
use crate::core::segment::Segment;
use crate::core::types::{AggregateResult, FieldSums};
use crate::matching::total::summed_len;

/// Which segments contribute to the summed fields before scaling
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ApproximateSums {
    /// Leave out the first segment in query-start order.
    ///
    /// Reproduces the numbers of the legacy pipeline, whose merge loop began
    /// summing at the second segment. Existing result tables were produced
    /// this way.
    #[default]
    SkipLeading,
    /// Sum every segment
    AllSegments,
}

/// Estimate the non-overlapping path of a hit from its interval union.
///
/// # Errors
///
/// Returns `BestHitError::DegenerateInterval` for a segment that fails
/// [`Segment::validate`], and `BestHitError::DegenerateUnion` if the summed or
/// merged query length is zero (only possible for an empty slice, since every
/// valid segment covers at least one position).
pub fn approximate_path(
    segments: &[Segment],
    sums: ApproximateSums,
) -> Result<AggregateResult, BestHitError> {
    for segment in segments {
        segment.validate()?;
    }

    let mut sorted: Vec<&Segment> = segments.iter().collect();
    sorted.sort_by_key(|s| s.query_start);

    let total_len = summed_len(sorted.iter().copied());
    let align_len = union_len(&sorted);
    if total_len == 0 || align_len == 0 {
        return Err(BestHitError::DegenerateUnion);
    }

    let summed = match sums {
        ApproximateSums::SkipLeading => FieldSums::sum(sorted.iter().skip(1).copied()),
        ApproximateSums::AllSegments => FieldSums::sum(sorted.iter().copied()),
    };

    #[allow(clippy::cast_precision_loss)]
    let coverage = align_len as f64 / total_len as f64;

    Ok(AggregateResult {
        fields: summed.scaled(coverage),
        align_len,
        n_hsp: segments.len(),
    })
}

/// Number of query positions covered by at least one segment.
///
/// `sorted` must be ordered by `query_start`.
fn union_len(sorted: &[&Segment]) -> u64 {
    let Some((first, rest)) = sorted.split_first() else {
        return 0;
    };

    let mut covered: u64 = 0;
    let (mut run_start, mut run_end) = (first.query_start, first.query_end);
    for segment in rest {
        if segment.query_start <= run_end {
            run_end = run_end.max(segment.query_end);
        } else {
            covered = covered.saturating_add(span(run_start, run_end));
            (run_start, run_end) = (segment.query_start, segment.query_end);
        }
    }
    covered.saturating_add(span(run_start, run_end))
}

fn span(start: u64, end: u64) -> u64 {
    end.saturating_sub(start).saturating_add(1)
}

/// Interval-union length of an unsorted set of segments
pub fn covered_len(segments: &[Segment]) -> u64 {
    let mut sorted: Vec<&Segment> = segments.iter().collect();
    sorted.sort_by_key(|s| s.query_start);
    union_len(&sorted)
}
