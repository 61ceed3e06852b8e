//! # besthits
//!
//! A library for picking the best-supported subject hit of every query from
//! BLAST HSP tables.
//!
//! A local-alignment search reports, per query and subject hit, one or more
//! HSPs (high-scoring segment pairs). Deciding which hit is "best" needs every
//! hit reduced to a single comparable summary first. Two summaries are
//! computed side by side:
//!
//! - **total**: plain sum of every HSP of the hit
//! - **path**: best set of HSPs that do not overlap on the query, found by an
//!   exact search for small hits and by a length-normalised estimate for hits
//!   with many HSPs
//!
//! Each mode then elects its own winning hit per (collection, query) group.
//!
//! ## Example
//!
//! ```rust
//! use besthits::{BestHitEngine, GroupKey, GroupedHits, HitKey, Segment};
//!
//! let key = GroupKey::new("nr", "NP_001005221.2");
//! let grouped = GroupedHits::from_segments([
//!     (key.clone(), HitKey::new("1"), Segment::new(1, 1, 10, 8.0)),
//!     (key.clone(), HitKey::new("1"), Segment::new(2, 5, 15, 9.0)),
//!     (key.clone(), HitKey::new("1"), Segment::new(3, 12, 20, 7.0)),
//! ])
//! .unwrap();
//!
//! let summaries = BestHitEngine::new().select(&grouped).unwrap();
//! assert_eq!(summaries[0].total.result.score(), 24.0);
//! assert_eq!(summaries[0].path.result.score(), 15.0);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Segments, group keys, aggregate types and row grouping
//! - [`matching`]: Total, exact and approximate aggregators and the selection engine
//! - [`parsing`]: Delimited segment table parsing
//! - [`store`]: Result rows and the replace-on-conflict result store
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod store;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::error::BestHitError;
pub use core::grouping::{GroupedHits, HitGroup, RawRow};
pub use core::segment::Segment;
pub use core::types::*;
pub use matching::engine::{BestHitEngine, EngineConfig, HitAggregates, PathMethod};
pub use store::memory::{MemoryStore, ResultStore};
pub use store::row::BestHitRow;
