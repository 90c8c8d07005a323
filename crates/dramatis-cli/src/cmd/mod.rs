pub mod analyze;
pub mod completions;
pub mod rank;
pub mod variations;

use std::path::Path;

use anyhow::Context as _;
use clap::Args;
use dramatis_core::config::{AnalysisConfig, resolve_config};
use dramatis_core::report::NodeReport;
use dramatis_core::{CastInput, WeightBy};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::debug;

/// Layout overrides.
#[derive(Args, Debug, Default, Clone)]
pub struct LayoutArgs {
    /// Seed for the layout RNG (overrides `layout.seed`).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of layout iterations (overrides `layout.iterations`).
    #[arg(long)]
    pub iterations: Option<usize>,
}

/// Overrides for commands that analyze one weighting.
#[derive(Args, Debug, Default, Clone)]
pub struct PipelineArgs {
    /// Edge source: co_occurrence, interaction_frequency or edge_list.
    #[arg(long, value_name = "METHOD")]
    pub weight_by: Option<WeightBy>,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

impl LayoutArgs {
    pub fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(seed) = self.seed {
            config.layout.seed = Some(seed);
        }
        if let Some(iterations) = self.iterations {
            config.layout.iterations = iterations;
        }
    }
}

impl PipelineArgs {
    pub fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(weight_by) = self.weight_by {
            config.weight_by = weight_by;
        }
        self.layout.apply(config);
    }
}

/// Resolve the config file chain for `project_root`.
pub fn load_config(explicit: Option<&Path>, project_root: &Path) -> anyhow::Result<AnalysisConfig> {
    let (config, source) = resolve_config(explicit, project_root)?;
    match source {
        Some(path) => debug!(path = %path.display(), "using config file"),
        None => debug!("no config file found; using defaults"),
    }
    Ok(config)
}

pub fn load_input(path: &Path) -> anyhow::Result<CastInput> {
    let input = CastInput::from_path(path)?;
    debug!(
        path = %path.display(),
        characters = input.characters.len(),
        "loaded cast document"
    );
    Ok(input)
}

/// Layout RNG: seeded when the config carries a seed, entropy otherwise.
pub fn layout_rng(config: &AnalysisConfig) -> StdRng {
    config
        .layout
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let body = serde_json::to_string_pretty(value)?;
    std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))
}

/// One line of a ranking.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCharacter {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub score: f64,
}

pub fn ranked(nodes: &[&NodeReport], metric: &str) -> Vec<RankedCharacter> {
    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| RankedCharacter {
            rank: i + 1,
            id: node.id.clone(),
            name: node.name.clone(),
            score: node.score(metric).unwrap_or_default(),
        })
        .collect()
}
