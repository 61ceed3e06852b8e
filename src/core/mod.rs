//! Core data types for best-hit selection.
//!
//! - [`Segment`]: one scored HSP with 1-based inclusive query/hit coordinates
//! - [`GroupKey`], [`HitKey`]: identify a (collection, query) group and a hit in it
//! - [`GroupedHits`]: rows organised by group and hit, in arrival order
//! - [`AggregateResult`], [`GroupSummary`]: per-hit and per-group results
//! - [`BestHitError`]: errors raised while grouping or aggregating
//!
//! [`Segment`]: segment::Segment
//! [`GroupKey`]: types::GroupKey
//! [`HitKey`]: types::HitKey
//! [`GroupedHits`]: grouping::GroupedHits
//! [`AggregateResult`]: types::AggregateResult
//! [`GroupSummary`]: types::GroupSummary
//! [`BestHitError`]: error::BestHitError

pub mod error;
pub mod grouping;
pub mod segment;
pub mod types;
