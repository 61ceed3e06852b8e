//! Exact maximum-score non-overlapping path through a hit's segments.
//!
//! A subset of segments is a valid path when, ordered by `query_start`, every
//! member starts strictly after the previous member ends. Two solvers are
//! provided:
//!
//! - [`exact_path`]: exhaustive depth-first search over every valid path. Ties
//!   are resolved by keeping the first maximal path found when segments are
//!   visited in `(query_start, arrival)` order. Exponential in the number of
//!   segments; only used at or below the configured cutoff.
//! - [`interval_scheduling_path`]: weighted interval scheduling over segments
//!   sorted by `query_end`. Same maximum score in `O(n log n)`, but on ties it
//!   prefers leaving out the later-ending segment, so the chosen path can differ
//!   from the exhaustive one when several paths share the best score.

use serde::{Deserialize, Serialize};

use crate::core::segment::Segment;
use crate::core::types::{AggregateResult, FieldSums};
use crate::matching::total::summed_len;

/// Solver used for hits at or below the cutoff
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ExactSolver {
    /// Depth-first search over every valid path
    #[default]
    Exhaustive,
    /// Weighted interval scheduling
    IntervalScheduling,
}

impl ExactSolver {
    pub fn solve(self, segments: &[Segment]) -> ExactPath {
        match self {
            Self::Exhaustive => exact_path(segments),
            Self::IntervalScheduling => interval_scheduling_path(segments),
        }
    }
}

/// Best path found through a set of segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExactPath {
    /// Sums over the chosen segments only
    pub result: AggregateResult,

    /// `hsp_index` of each chosen segment, in query order
    pub chosen: Vec<u64>,
}

impl ExactPath {
    fn from_indices(segments: &[Segment], indices: &[usize]) -> Self {
        let chosen_segments = indices.iter().map(|&i| &segments[i]);
        Self {
            result: AggregateResult {
                fields: FieldSums::sum(chosen_segments.clone()),
                align_len: summed_len(chosen_segments.clone()),
                n_hsp: indices.len(),
            },
            chosen: chosen_segments.map(|s| s.hsp_index).collect(),
        }
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.result.score()
    }
}

/// Exhaustive search for the maximum-score non-overlapping path.
pub fn exact_path(segments: &[Segment]) -> ExactPath {
    let mut order: Vec<usize> = (0..segments.len()).collect();
    order.sort_by_key(|&i| segments[i].query_start);

    let mut search = PathSearch {
        segments,
        order: &order,
        path: Vec::with_capacity(segments.len()),
        best: None,
    };
    search.extend(0, None, 0.0);

    let best_path = search.best.map(|(_, path)| path).unwrap_or_default();
    let indices: Vec<usize> = best_path.iter().map(|&k| order[k]).collect();
    ExactPath::from_indices(segments, &indices)
}

struct PathSearch<'a> {
    segments: &'a [Segment],
    /// Segment indices sorted by query start
    order: &'a [usize],
    /// Positions in `order` of the path being explored
    path: Vec<usize>,
    best: Option<(f64, Vec<usize>)>,
}

impl PathSearch<'_> {
    /// Try every segment at or after `from` (in start order) that begins past `end`.
    fn extend(&mut self, from: usize, end: Option<u64>, score: f64) {
        let segments = self.segments;
        let mut extended = false;
        for k in from..self.order.len() {
            let segment = &segments[self.order[k]];
            if end.is_some_and(|e| !segment.follows(e)) {
                continue;
            }
            extended = true;
            self.path.push(k);
            self.extend(k + 1, Some(segment.query_end), score + segment.score);
            self.path.pop();
        }

        if !extended && self.best.as_ref().map_or(true, |(best, _)| score > *best) {
            self.best = Some((score, self.path.clone()));
        }
    }
}

/// Weighted interval scheduling over segments sorted by query end.
pub fn interval_scheduling_path(segments: &[Segment]) -> ExactPath {
    let mut order: Vec<usize> = (0..segments.len()).collect();
    order.sort_by_key(|&i| (segments[i].query_end, segments[i].query_start));
    let ends: Vec<u64> = order.iter().map(|&i| segments[i].query_end).collect();

    // predecessor[j]: number of segments (in end order) finishing before segment j starts
    let predecessor: Vec<usize> = order
        .iter()
        .map(|&i| ends.partition_point(|&e| e < segments[i].query_start))
        .collect();

    let mut best = vec![0.0_f64; order.len() + 1];
    let mut take = vec![false; order.len() + 1];
    for j in 0..order.len() {
        let with = segments[order[j]].score + best[predecessor[j]];
        if with > best[j] {
            best[j + 1] = with;
            take[j + 1] = true;
        } else {
            best[j + 1] = best[j];
        }
    }

    let mut indices = Vec::new();
    let mut j = order.len();
    while j > 0 {
        if take[j] {
            indices.push(order[j - 1]);
            j = predecessor[j - 1];
        } else {
            j -= 1;
        }
    }
    indices.reverse();

    ExactPath::from_indices(segments, &indices)
}

/// Check that `path` segments are pairwise non-overlapping in query coordinates.
pub fn is_valid_path<'a>(path: impl IntoIterator<Item = &'a Segment>) -> bool {
    let mut sorted: Vec<&Segment> = path.into_iter().collect();
    sorted.sort_by_key(|s| s.query_start);
    sorted.windows(2).all(|w| w[1].follows(w[0].query_end))
}
