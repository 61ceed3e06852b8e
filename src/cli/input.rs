//! Input handling shared by all subcommands: reading rows, filtering them and
//! building the engine configuration.

use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::core::grouping::{GroupedHits, RawRow};
use crate::matching::approximate::ApproximateSums;
use crate::matching::engine::EngineConfig;
use crate::matching::exact::ExactSolver;
use crate::parsing::tsv::{parse_rows_file, parse_rows_text};

#[derive(Args)]
pub struct InputArgs {
    /// Segment table (TSV or CSV). Use '-' for stdin (tab-delimited)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Field delimiter (default: ',' for .csv files, tab otherwise)
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Only keep rows of this hit (e.g. 1 for the top-ranked hit)
    #[arg(long)]
    pub hit: Option<String>,

    /// Only keep rows of this query (repeatable)
    #[arg(long = "query")]
    pub queries: Vec<String>,

    /// Engine configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// HSP count above which path mode uses the approximate aggregator
    #[arg(long)]
    pub cutoff: Option<usize>,

    /// Which HSPs the approximate aggregator sums before scaling
    #[arg(long, value_enum)]
    pub approximate_sums: Option<ApproximateSums>,

    /// Solver used for hits at or below the cutoff
    #[arg(long, value_enum)]
    pub exact_solver: Option<ExactSolver>,
}

impl InputArgs {
    /// Engine configuration: defaults, then the config file, then flags
    pub fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load_from_file(path)?,
            None => EngineConfig::default(),
        };
        if let Some(cutoff) = self.cutoff {
            config.cutoff = cutoff;
        }
        if let Some(sums) = self.approximate_sums {
            config.approximate_sums = sums;
        }
        if let Some(solver) = self.exact_solver {
            config.exact_solver = solver;
        }
        Ok(config)
    }

    /// Read, filter and group the input rows
    pub fn load_grouped(&self, verbose: bool) -> anyhow::Result<GroupedHits> {
        let rows = read_rows(&self.input, self.delimiter)?;
        let total = rows.len();

        let filter = RowFilter {
            hit: self.hit.as_deref(),
            queries: self.queries.iter().map(String::as_str).collect(),
        };
        let kept: Vec<RawRow> = rows.into_iter().filter(|r| filter.keep(r)).collect();

        if verbose {
            eprintln!("Read {total} rows, {} kept after filtering", kept.len());
        }

        Ok(GroupedHits::from_rows(kept)?)
    }
}

fn read_rows(path: &Path, delimiter: Option<char>) -> anyhow::Result<Vec<RawRow>> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(parse_rows_text(&text, delimiter.unwrap_or('\t'))?);
    }

    let delimiter = delimiter.unwrap_or_else(|| {
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv {
            ','
        } else {
            '\t'
        }
    });
    Ok(parse_rows_file(path, delimiter)?)
}

/// Caller-supplied restriction applied before grouping
struct RowFilter<'a> {
    hit: Option<&'a str>,
    queries: HashSet<&'a str>,
}

impl RowFilter<'_> {
    fn keep(&self, row: &RawRow) -> bool {
        let cell = |i: usize| row.cells.get(i).and_then(|c| c.as_deref());

        // Rows with missing keys pass through so grouping can report them
        let hit_ok = match (self.hit, cell(2)) {
            (Some(wanted), Some(hit)) => hit == wanted,
            _ => true,
        };
        let query_ok = self.queries.is_empty()
            || cell(1).map_or(true, |query| self.queries.contains(query));

        hit_ok && query_ok
    }
}
