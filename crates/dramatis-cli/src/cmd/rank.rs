//! `dramatis rank`: top characters for one metric.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use dramatis_core::analyze;
use dramatis_core::config::AnalysisConfig;
use serde::Serialize;

use super::{PipelineArgs, RankedCharacter, layout_rng, load_input, ranked};
use crate::output::{OutputMode, pretty_ranking, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct RankArgs {
    /// Cast document produced by the extractor (JSON).
    pub input: PathBuf,

    /// Metric to rank by: degree, betweenness, closeness, eigenvector,
    /// dialogue or interaction_strength.
    #[arg(short, long, default_value = "degree")]
    pub metric: String,

    /// How many characters to list.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[derive(Debug, Serialize)]
pub struct Ranking {
    pub metric: String,
    pub weight_by: String,
    pub entries: Vec<RankedCharacter>,
}

pub fn run_rank(args: &RankArgs, mut config: AnalysisConfig, output: OutputMode) -> anyhow::Result<()> {
    args.pipeline.apply(&mut config);

    let input = load_input(&args.input)?;
    let report = analyze(&input, &config, &mut layout_rng(&config))?;
    let top = report.try_top_by(&args.metric, args.top)?;

    let ranking = Ranking {
        metric: args.metric.clone(),
        weight_by: report.metadata.weight_by.to_string(),
        entries: ranked(&top, &args.metric),
    };
    render_mode(output, &ranking, render_text, render_pretty)
}

fn render_text(ranking: &Ranking, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "rank\tid\tname\t{}", ranking.metric)?;
    for entry in &ranking.entries {
        writeln!(w, "{}\t{}\t{}\t{:.6}", entry.rank, entry.id, entry.name, entry.score)?;
    }
    Ok(())
}

fn render_pretty(ranking: &Ranking, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!("Top characters by {} ({})", ranking.metric, ranking.weight_by),
    )?;
    if ranking.entries.is_empty() {
        writeln!(w, "(no characters)")?;
    }
    pretty_ranking(w, &ranking.entries)
}
