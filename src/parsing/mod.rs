//! Readers for flat segment rows.
//!
//! Rows normally come from a relational store populated from BLAST XML
//! reports. For standalone use they can be exported as a TSV/CSV table:
//!
//! | Column | Description |
//! |--------|-------------|
//! | collection  | Database the query was searched against |
//! | query       | Query identifier |
//! | hit         | Hit number or identifier |
//! | hsp         | HSP number within the hit |
//! | query_start, query_end | 1-based inclusive query interval |
//! | hit_start, hit_end     | 1-based inclusive hit interval |
//! | gaps, positive, identity | Alignment counts |
//! | score       | Bit score |
//!
//! ## Example
//!
//! ```rust
//! use besthits::parsing::tsv::parse_rows_text;
//! use besthits::GroupedHits;
//!
//! let rows = parse_rows_text("nr\tq1\t1\t1\t1\t10\t1\t10\t0\t9\t8\t20.5\n", '\t').unwrap();
//! let grouped = GroupedHits::from_rows(rows).unwrap();
//! assert_eq!(grouped.len(), 1);
//! ```

pub mod tsv;
