use thiserror::Error;

/// Errors raised while grouping segment rows or aggregating hits.
///
/// None of these are recoverable inside the engine: each one signals either a
/// data-quality problem upstream or a violated caller contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BestHitError {
    #[error("Malformed row {row}: column '{column}' has invalid numeric value {value:?}")]
    MalformedRow {
        /// 1-based position of the row in the input sequence
        row: usize,
        column: &'static str,
        /// Raw cell content, `None` when the cell was absent
        value: Option<String>,
    },

    #[error("Empty group ({collection}, {query}): no candidate hits")]
    EmptyGroup { collection: String, query: String },

    #[error("Empty hit {hit} in group ({collection}, {query}): no segments")]
    EmptyHit {
        collection: String,
        query: String,
        hit: String,
    },

    #[error(
        "Degenerate interval for HSP {hsp}: query {query_start}..{query_end} is not a valid 1-based range"
    )]
    DegenerateInterval {
        hsp: u64,
        query_start: u64,
        query_end: u64,
    },

    #[error("Degenerate interval union: summed query length is zero")]
    DegenerateUnion,
}
