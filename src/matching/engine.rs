use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::core::error::BestHitError;
use crate::core::grouping::{GroupedHits, HitGroup};
use crate::core::segment::Segment;
use crate::core::types::{AggregateResult, GroupKey, GroupSummary, HitKey, HitSummary};
use crate::matching::approximate::{approximate_path, ApproximateSums};
use crate::matching::exact::ExactSolver;
use crate::matching::total::total;
use crate::utils::validation::check_cutoff;

/// Default segment count above which the path aggregate is approximated
pub const DEFAULT_CUTOFF: usize = 20;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read engine config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse engine config: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Configuration for the best-hit engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hits with more than `cutoff` segments use the approximate aggregator in
    /// path mode. Total mode is unaffected. Raising it makes exact search
    /// exponentially slower; there is no timeout.
    pub cutoff: usize,

    /// Summation policy of the approximate aggregator
    pub approximate_sums: ApproximateSums,

    /// Solver used at or below the cutoff
    pub exact_solver: ExactSolver,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            approximate_sums: ApproximateSums::default(),
            exact_solver: ExactSolver::default(),
        }
    }
}

impl EngineConfig {
    /// Parse configuration from a JSON string; missing keys take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// How the path aggregate of a hit was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMethod {
    /// Leading segment scored zero; the hit contributes nothing
    Null,
    /// Lone segment, raw values
    Single,
    /// Exact solver at or below the cutoff
    Exact,
    /// Interval-union estimate above the cutoff
    Approximate,
}

/// Both aggregates of one candidate hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitAggregates {
    pub hit: HitKey,
    pub segments: usize,
    pub method: PathMethod,
    pub total: AggregateResult,
    pub path: AggregateResult,
    /// `hsp_index` of the segments forming the path, in query order. `None`
    /// when no subset was selected (nulled or approximated hits).
    pub chosen: Option<Vec<u64>>,
}

/// Running winner of one aggregation mode within a group
#[derive(Default)]
struct BestSoFar(Option<HitSummary>);

impl BestSoFar {
    /// Replace the winner only on strict improvement, so ties keep the earliest hit
    fn offer(&mut self, hit: &HitKey, result: AggregateResult) {
        if self
            .0
            .as_ref()
            .map_or(true, |best| result.score() > best.result.score())
        {
            self.0 = Some(HitSummary {
                hit: hit.clone(),
                result,
            });
        }
    }
}

/// Picks the best-supported hit of every (collection, query) group
pub struct BestHitEngine {
    config: EngineConfig,
}

impl Default for BestHitEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BestHitEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Create an engine with custom configuration
    pub fn with_config(config: EngineConfig) -> Self {
        if let Some(message) = check_cutoff(config.cutoff) {
            warn!("{message}");
        }
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute the total and path aggregates of a single hit of group `key`.
    ///
    /// A hit whose leading segment has a zero score is nulled in both modes.
    ///
    /// # Errors
    ///
    /// Returns `BestHitError::EmptyHit` if `segments` is empty,
    /// `BestHitError::DegenerateInterval` if any segment fails
    /// [`Segment::validate`], and `BestHitError::DegenerateUnion` if the
    /// approximate aggregator cannot form a coverage ratio.
    pub fn aggregate_hit(
        &self,
        key: &GroupKey,
        hit: &HitKey,
        segments: &[Segment],
    ) -> Result<HitAggregates, BestHitError> {
        for segment in segments {
            segment.validate()?;
        }

        let (method, total_result, path_result, chosen) = match segments {
            [] => {
                return Err(BestHitError::EmptyHit {
                    collection: key.collection.clone(),
                    query: key.query.clone(),
                    hit: hit.to_string(),
                })
            }
            [leading, ..] if leading.score == 0.0 => (
                PathMethod::Null,
                AggregateResult::null(),
                AggregateResult::null(),
                None,
            ),
            [single] => {
                let result = AggregateResult::from_single(single);
                (PathMethod::Single, result, result, Some(vec![single.hsp_index]))
            }
            _ if segments.len() <= self.config.cutoff => {
                let path = self.config.exact_solver.solve(segments);
                (PathMethod::Exact, total(segments), path.result, Some(path.chosen))
            }
            _ => (
                PathMethod::Approximate,
                total(segments),
                approximate_path(segments, self.config.approximate_sums)?,
                None,
            ),
        };

        Ok(HitAggregates {
            hit: hit.clone(),
            segments: segments.len(),
            method,
            total: total_result,
            path: path_result,
            chosen,
        })
    }

    /// Aggregate every hit of a group, in arrival order.
    ///
    /// # Errors
    ///
    /// Returns `BestHitError::EmptyGroup` for a group without hits, or any error
    /// from [`Self::aggregate_hit`].
    pub fn explain_group(&self, group: &HitGroup) -> Result<Vec<HitAggregates>, BestHitError> {
        if group.is_empty() {
            return Err(BestHitError::EmptyGroup {
                collection: group.key.collection.clone(),
                query: group.key.query.clone(),
            });
        }

        group
            .hits()
            .map(|(hit, segments)| {
                let aggregates = self.aggregate_hit(&group.key, hit, segments)?;
                trace!(
                    group = %group.key,
                    hit = %hit,
                    n_hsp = segments.len(),
                    method = ?aggregates.method,
                    total_score = aggregates.total.score(),
                    path_score = aggregates.path.score(),
                    total_align_len = aggregates.total.align_len,
                    path_align_len = aggregates.path.align_len,
                    "aggregated hit"
                );
                Ok(aggregates)
            })
            .collect()
    }

    /// Select the winning hit of a group independently for total and path mode.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::explain_group`].
    pub fn select_group(&self, group: &HitGroup) -> Result<GroupSummary, BestHitError> {
        let mut best_total = BestSoFar::default();
        let mut best_path = BestSoFar::default();

        for aggregates in self.explain_group(group)? {
            best_total.offer(&aggregates.hit, aggregates.total);
            best_path.offer(&aggregates.hit, aggregates.path);
        }

        let (Some(total), Some(path)) = (best_total.0, best_path.0) else {
            return Err(BestHitError::EmptyGroup {
                collection: group.key.collection.clone(),
                query: group.key.query.clone(),
            });
        };

        debug!(
            group = %group.key,
            total_hit = %total.hit,
            total_score = total.result.score(),
            path_hit = %path.hit,
            path_score = path.result.score(),
            "selected best hits"
        );

        Ok(GroupSummary {
            key: group.key.clone(),
            total,
            path,
        })
    }

    /// Select best hits for every group, in group arrival order.
    ///
    /// # Errors
    ///
    /// Aborts on the first group that fails; see [`Self::select_group`].
    pub fn select(&self, grouped: &GroupedHits) -> Result<Vec<GroupSummary>, BestHitError> {
        debug!(
            groups = grouped.len(),
            segments = grouped.segment_count(),
            cutoff = self.config.cutoff,
            "selecting best hits"
        );
        grouped
            .groups()
            .iter()
            .map(|group| self.select_group(group))
            .collect()
    }
}
