//! Command-line interface for besthits.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **select**: Pick the best hit of every (collection, query) group
//! - **explain**: Show total and path aggregates of every candidate hit
//!
//! ## Usage
//!
//! ```text
//! # Best hits from an exported segment table
//! besthits select segments.tsv
//!
//! # Only the top hit of two queries, as a sorted result table
//! besthits select segments.tsv --hit 1 --query NP_001005221.2 --query NP_689699.2 --format tsv
//!
//! # Raise the exact-search cutoff
//! besthits select segments.tsv --cutoff 24
//!
//! # Per-hit breakdown
//! besthits explain segments.tsv --format json
//! ```

use clap::{Parser, Subcommand};

pub mod explain;
pub mod input;
pub mod select;

#[derive(Parser)]
#[command(name = "besthits")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Select best-supported hits from BLAST HSP tables")]
#[command(
    long_about = "besthits reduces the HSPs of every query/hit pair to a single summary and picks the best hit per query.\n\nTwo summaries are reported per query:\n- total: plain sum over every HSP of the hit\n- path: best set of HSPs that do not overlap on the query (exact search up to --cutoff HSPs, length-normalised estimate above)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Select the best hit of every query
    Select(select::SelectArgs),

    /// Show per-hit aggregates for every query
    Explain(explain::ExplainArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
