//! Result rows and their destination.
//!
//! - [`BestHitRow`]: one row per (collection, query) with sorted column order
//! - [`ResultStore`]: replace-on-conflict sink for rows
//! - [`MemoryStore`]: in-memory store that can be written out as a table
//!
//! [`BestHitRow`]: row::BestHitRow
//! [`ResultStore`]: memory::ResultStore
//! [`MemoryStore`]: memory::MemoryStore

pub mod memory;
pub mod row;
