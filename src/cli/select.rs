//! Select command - pick the best hit of every (collection, query) group.

use clap::Args;

use crate::cli::input::InputArgs;
use crate::cli::OutputFormat;
use crate::core::types::{GroupSummary, HitSummary};
use crate::matching::engine::BestHitEngine;
use crate::store::memory::{MemoryStore, ResultStore};
use crate::store::row::BestHitRow;

/// Arguments for the select command
#[derive(Args)]
pub struct SelectArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Execute the select command
///
/// # Errors
///
/// Returns an error if the input cannot be read or grouped, or if any group
/// fails to aggregate.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SelectArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.input.engine_config()?;
    let grouped = args.input.load_grouped(verbose)?;

    if verbose {
        eprintln!(
            "Grouped {} segments into {} queries (cutoff {})",
            grouped.segment_count(),
            grouped.len(),
            config.cutoff,
        );
    }

    let engine = BestHitEngine::with_config(config);
    let summaries = engine.select(&grouped)?;

    let mut store = MemoryStore::new();
    store.replace_all(summaries.iter().map(BestHitRow::from));

    match format {
        OutputFormat::Text => print_text_results(&summaries),
        OutputFormat::Json => {
            let rows: Vec<&BestHitRow> = store.rows().collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Tsv => store.write_delimited(&mut std::io::stdout().lock(), '\t')?,
    }

    Ok(())
}

fn print_text_results(summaries: &[GroupSummary]) {
    if summaries.is_empty() {
        println!("No segment rows left after filtering.");
        return;
    }

    for (i, summary) in summaries.iter().enumerate() {
        if i > 0 {
            println!("{}", "─".repeat(60));
        }
        println!("{} / {}", summary.key.collection, summary.key.query);
        print_summary("Total", &summary.total);
        print_summary("Path ", &summary.path);
        if summary.total.hit != summary.path.hit {
            println!("   Note: total and path modes selected different hits");
        }
    }
}

fn print_summary(label: &str, summary: &HitSummary) {
    let r = &summary.result;
    println!(
        "   {label}  hit {:<8} score {:>10.2}  align_len {:>6}  n_hsp {:>3}  identity {:.1}  positive {:.1}  gaps {:.1}",
        summary.hit,
        r.fields.score,
        r.align_len,
        r.n_hsp,
        r.fields.identity,
        r.fields.positive,
        r.fields.gaps,
    );
}
