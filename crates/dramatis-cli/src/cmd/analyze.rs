//! `dramatis analyze`: run the full pipeline on one cast document.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use dramatis_core::config::AnalysisConfig;
use dramatis_core::{AnalysisReport, analyze};
use serde::Serialize;
use tracing::info;

use super::{PipelineArgs, RankedCharacter, layout_rng, load_input, ranked, write_json};
use crate::output::{OutputMode, pretty_kv, pretty_ranking, pretty_section, render_mode};

/// Metric used for the summary ranking.
const SUMMARY_METRIC: &str = "degree";

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Cast document produced by the extractor (JSON).
    pub input: PathBuf,

    /// Write the full report here as pretty JSON.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// How many characters to list in the summary.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeSummary {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
    pub weight_by: String,
    pub characters: usize,
    pub relationships: usize,
    pub communities: usize,
    pub content_hash: String,
    pub eigenvector_converged: bool,
    pub top_metric: &'static str,
    pub top: Vec<RankedCharacter>,
}

impl AnalyzeSummary {
    fn new(args: &AnalyzeArgs, report: &AnalysisReport) -> Self {
        Self {
            input: args.input.display().to_string(),
            report_path: args.output.as_ref().map(|p| p.display().to_string()),
            weight_by: report.metadata.weight_by.to_string(),
            characters: report.metadata.total_characters,
            relationships: report.metadata.total_edges,
            communities: report.metadata.community_count,
            content_hash: report.metadata.content_hash.clone(),
            eigenvector_converged: report.metadata.eigenvector_converged,
            top_metric: SUMMARY_METRIC,
            top: ranked(&report.top_by(SUMMARY_METRIC, args.top), SUMMARY_METRIC),
        }
    }
}

pub fn run_analyze(
    args: &AnalyzeArgs,
    mut config: AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    args.pipeline.apply(&mut config);

    let input = load_input(&args.input)?;
    let mut rng = layout_rng(&config);
    let report = analyze(&input, &config, &mut rng)?;

    if let Some(path) = &args.output {
        write_report(path, &report)?;
    }

    let summary = AnalyzeSummary::new(args, &report);
    render_mode(output, &summary, render_text, render_pretty)
}

fn write_report(path: &Path, report: &AnalysisReport) -> anyhow::Result<()> {
    write_json(path, report)?;
    info!(path = %path.display(), "report written");
    Ok(())
}

fn render_text(summary: &AnalyzeSummary, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "characters\t{}", summary.characters)?;
    writeln!(w, "relationships\t{}", summary.relationships)?;
    writeln!(w, "communities\t{}", summary.communities)?;
    writeln!(w, "weight_by\t{}", summary.weight_by)?;
    if let Some(path) = &summary.report_path {
        writeln!(w, "report\t{path}")?;
    }
    for entry in &summary.top {
        writeln!(w, "{}\t{}\t{}\t{:.4}", entry.rank, entry.id, entry.name, entry.score)?;
    }
    Ok(())
}

fn render_pretty(summary: &AnalyzeSummary, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Character network: {}", summary.input))?;
    pretty_kv(w, "Characters", summary.characters.to_string())?;
    pretty_kv(w, "Relationships", summary.relationships.to_string())?;
    pretty_kv(w, "Communities", summary.communities.to_string())?;
    pretty_kv(w, "Weighted by", &summary.weight_by)?;
    if !summary.eigenvector_converged {
        pretty_kv(w, "Eigenvector", "did not converge")?;
    }
    if let Some(path) = &summary.report_path {
        pretty_kv(w, "Report", path)?;
    }

    if !summary.top.is_empty() {
        writeln!(w)?;
        pretty_section(w, &format!("Top characters by {} centrality", summary.top_metric))?;
        pretty_ranking(w, &summary.top)?;
    }
    Ok(())
}
