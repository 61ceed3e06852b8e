use crate::core::segment::Segment;
use crate::core::types::{AggregateResult, FieldSums};

/// Straight sum over every segment of a hit, with no overlap reasoning.
///
/// `align_len` is the naive sum of segment lengths. Callers never pass an empty
/// slice; the engine rejects empty hits and invalid segments before aggregation.
pub fn total(segments: &[Segment]) -> AggregateResult {
    AggregateResult {
        fields: FieldSums::sum(segments),
        align_len: summed_len(segments),
        n_hsp: segments.len(),
    }
}

/// Sum of segment lengths, saturating at `u64::MAX`
pub(crate) fn summed_len<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> u64 {
    segments
        .into_iter()
        .fold(0, |acc, s| acc.saturating_add(s.query_len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_sums_disjoint_segments() {
        let segments = vec![Segment::new(1, 1, 10, 5.0), Segment::new(2, 20, 30, 7.0)];
        let result = total(&segments);
        assert!((result.score() - 12.0).abs() < 1e-9);
        assert_eq!(result.align_len, 21);
        assert_eq!(result.n_hsp, 2);
    }

    #[test]
    fn test_total_double_counts_overlap() {
        let segments = vec![
            Segment::new(1, 1, 10, 5.0).with_counts(1, 8, 7),
            Segment::new(2, 5, 30, 7.0).with_counts(2, 20, 18),
        ];
        let result = total(&segments);
        assert!((result.score() - 12.0).abs() < 1e-9);
        assert_eq!(result.align_len, 36);
        assert_eq!(result.fields.gaps, 3.0);
        assert_eq!(result.fields.positive, 28.0);
        assert_eq!(result.fields.identity, 25.0);
    }

    #[test]
    fn test_total_single_segment_is_raw() {
        let seg = Segment::new(1, 3, 9, 4.25).with_counts(0, 6, 5);
        assert_eq!(total(std::slice::from_ref(&seg)), AggregateResult::from_single(&seg));
    }
}
