//! `dramatis variations`: one report per available weighting method.
//!
//! Writes `<stem>_<weight_by>.json` for every edge source present in the
//! input, plus `graph_variations_summary.json` indexing them. A weighting
//! that fails to analyze is logged and skipped.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;
use dramatis_core::config::AnalysisConfig;
use dramatis_core::{CastInput, WeightBy, analyze};
use serde::Serialize;
use tracing::{info, warn};

use super::{LayoutArgs, layout_rng, load_input, write_json};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

pub const SUMMARY_FILE: &str = "graph_variations_summary.json";

#[derive(Args, Debug)]
pub struct VariationsArgs {
    /// Cast document produced by the extractor (JSON).
    pub input: PathBuf,

    /// Directory for the per-weighting reports (created if missing).
    #[arg(short = 'o', long, value_name = "DIR", default_value = "outputs")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

#[derive(Debug, Clone, Serialize)]
pub struct Variation {
    pub weight_by: WeightBy,
    pub filename: String,
    pub nodes: usize,
    pub edges: usize,
}

#[derive(Debug, Serialize)]
pub struct VariationsSummary {
    pub output_dir: String,
    pub variations: Vec<Variation>,
}

pub fn run_variations(
    args: &VariationsArgs,
    mut config: AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    args.layout.apply(&mut config);

    let input = load_input(&args.input)?;
    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;

    let stem = args
        .input
        .file_stem()
        .map_or_else(|| "cast".to_string(), |s| s.to_string_lossy().into_owned());

    let variations = export_variations(&input, &config, &stem, &args.output_dir)?;
    write_json(&args.output_dir.join(SUMMARY_FILE), &variations)?;
    info!(count = variations.len(), dir = %args.output_dir.display(), "variations written");

    let summary = VariationsSummary {
        output_dir: args.output_dir.display().to_string(),
        variations,
    };
    render_mode(output, &summary, render_text, render_pretty)
}

/// Analyze `input` once per weighting that has data and write each report.
///
/// Every run reseeds the layout RNG from the config, so a seeded config
/// gives reproducible files.
pub fn export_variations(
    input: &CastInput,
    config: &AnalysisConfig,
    stem: &str,
    dir: &Path,
) -> anyhow::Result<Vec<Variation>> {
    let mut variations = Vec::new();

    for weight_by in input.available_weightings() {
        let config = AnalysisConfig {
            weight_by,
            ..config.clone()
        };
        let report = match analyze(input, &config, &mut layout_rng(&config)) {
            Ok(report) => report,
            Err(err) => {
                warn!(%weight_by, error = %err, "skipping weighting");
                continue;
            }
        };

        let filename = format!("{stem}_{weight_by}.json");
        write_json(&dir.join(&filename), &report)?;

        variations.push(Variation {
            weight_by,
            filename,
            nodes: report.nodes.len(),
            edges: report.edges.len(),
        });
    }

    Ok(variations)
}

fn render_text(summary: &VariationsSummary, w: &mut dyn Write) -> std::io::Result<()> {
    for v in &summary.variations {
        writeln!(w, "{}\t{}\t{}\t{}", v.weight_by, v.filename, v.nodes, v.edges)?;
    }
    Ok(())
}

fn render_pretty(summary: &VariationsSummary, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Graph variations in {}", summary.output_dir))?;
    if summary.variations.is_empty() {
        writeln!(w, "No edge sources found in the input.")?;
        return Ok(());
    }
    for v in &summary.variations {
        pretty_kv(
            w,
            v.weight_by.as_str(),
            format!("{} ({} characters, {} relationships)", v.filename, v.nodes, v.edges),
        )?;
    }
    Ok(())
}
