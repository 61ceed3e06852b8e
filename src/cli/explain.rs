//! Explain command - per-hit total and path aggregates for every group.

use clap::Args;
use serde::Serialize;

use crate::cli::input::InputArgs;
use crate::cli::OutputFormat;
use crate::core::types::GroupKey;
use crate::matching::engine::{BestHitEngine, HitAggregates};

#[derive(Args)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Serialize)]
struct GroupExplanation<'a> {
    #[serde(flatten)]
    key: &'a GroupKey,
    hits: Vec<HitAggregates>,
}

#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ExplainArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.input.engine_config()?;
    let grouped = args.input.load_grouped(verbose)?;
    let engine = BestHitEngine::with_config(config);

    let explanations = grouped
        .groups()
        .iter()
        .map(|group| {
            Ok(GroupExplanation {
                key: &group.key,
                hits: engine.explain_group(group)?,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    match format {
        OutputFormat::Text => print_text(&explanations),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&explanations)?),
        OutputFormat::Tsv => print_tsv(&explanations),
    }

    Ok(())
}

fn print_text(explanations: &[GroupExplanation<'_>]) {
    for explanation in explanations {
        println!("\n{}", explanation.key);
        for hit in &explanation.hits {
            println!(
                "   hit {} ({} HSPs, path {:?}, chosen HSPs: {})",
                hit.hit,
                hit.segments,
                hit.method,
                format_chosen(hit.chosen.as_deref()),
            );
            println!("   {:<10} {:>12} {:>12}", "field", "path", "total");
            for (name, path, total) in [
                ("gaps", hit.path.fields.gaps, hit.total.fields.gaps),
                ("positive", hit.path.fields.positive, hit.total.fields.positive),
                ("identity", hit.path.fields.identity, hit.total.fields.identity),
                ("score", hit.path.fields.score, hit.total.fields.score),
            ] {
                println!("   {name:<10} {path:>12.2} {total:>12.2}");
            }
            println!(
                "   {:<10} {:>12} {:>12}",
                "align_len", hit.path.align_len, hit.total.align_len
            );
            println!("   {:<10} {:>12} {:>12}", "n_hsp", hit.path.n_hsp, hit.total.n_hsp);
        }
    }
    println!();
}

fn format_chosen(chosen: Option<&[u64]>) -> String {
    match chosen {
        Some(ids) => ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
        None => "-".to_string(),
    }
}

fn print_tsv(explanations: &[GroupExplanation<'_>]) {
    println!("collection\tquery\thit\tsegments\tmethod\tp_score\tt_score\tp_align_len\tt_align_len\tp_n_hsp\tt_n_hsp\tchosen");
    for explanation in explanations {
        for hit in &explanation.hits {
            println!(
                "{}\t{}\t{}\t{}\t{:?}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                explanation.key.collection,
                explanation.key.query,
                hit.hit,
                hit.segments,
                hit.method,
                hit.path.score(),
                hit.total.score(),
                hit.path.align_len,
                hit.total.align_len,
                hit.path.n_hsp,
                hit.total.n_hsp,
                format_chosen(hit.chosen.as_deref()),
            );
        }
    }
}
