//! Best-hit selection engine and aggregation algorithms.
//!
//! This module provides the core selection functionality:
//!
//! - [`BestHitEngine`]: Main entry point, picks a winning hit per group and mode
//! - [`total`]: Unconditional sum over every segment of a hit
//! - [`exact_path`]: Maximum-score non-overlapping subset of segments
//! - [`approximate_path`]: Interval-union estimate for hits above the cutoff
//!
//! ## Aggregation Modes
//!
//! Every candidate hit is aggregated twice:
//!
//! 1. **Total**: field-wise sum over all segments, `align_len` is the naive sum
//!    of segment lengths
//! 2. **Path**: sums over the best set of segments that do not overlap in query
//!    coordinates. Hits with at most `cutoff` segments are solved exactly; larger
//!    hits use the approximate aggregator
//!
//! The winner of each mode is chosen independently, so a group can report
//! different winning hits for total and path.
//!
//! ## Example
//!
//! ```rust
//! use besthits::{BestHitEngine, GroupKey, GroupedHits, HitKey, Segment};
//!
//! let key = GroupKey::new("swissprot", "NP_001005221.2");
//! let grouped = GroupedHits::from_segments(vec![
//!     (key.clone(), HitKey::new("1"), Segment::new(1, 1, 10, 5.0)),
//!     (key.clone(), HitKey::new("1"), Segment::new(2, 5, 30, 7.0)),
//! ])
//! .unwrap();
//!
//! let engine = BestHitEngine::new();
//! let summaries = engine.select(&grouped).unwrap();
//!
//! assert_eq!(summaries[0].path.result.align_len, 26);
//! assert_eq!(summaries[0].total.result.align_len, 36);
//! ```
//!
//! [`BestHitEngine`]: engine::BestHitEngine
//! [`total`]: total::total
//! [`exact_path`]: exact::exact_path
//! [`approximate_path`]: approximate::approximate_path

pub mod approximate;
pub mod engine;
pub mod exact;
pub mod total;
