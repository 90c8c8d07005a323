//! Analysis configuration.
//!
//! Every field has a default, so an empty or missing `dramatis.toml` yields
//! the standard analysis. Example:
//!
//! ```toml
//! weight_by = "interaction_frequency"
//!
//! [eigenvector]
//! max_iter = 200
//!
//! [layout]
//! iterations = 300
//! seed = 7
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AnalysisError;
use crate::input::WeightBy;

/// File name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "dramatis.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub weight_by: WeightBy,
    #[serde(default = "default_description_limit")]
    pub description_limit: usize,
    #[serde(default)]
    pub eigenvector: EigenvectorConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            weight_by: WeightBy::default(),
            description_limit: default_description_limit(),
            eigenvector: EigenvectorConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Power-iteration limits for eigenvector centrality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenvectorConfig {
    /// Maximum number of iterations. Default: 100.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    /// Stop once the largest per-node change is below this. Default: 1e-6.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iter: default_max_iter(),
            tolerance: default_tolerance(),
        }
    }
}

/// Spring-embedder constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Simulation steps. Default: 100.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Natural spring length for an edge of weight 0. Default: 2.0.
    #[serde(default = "default_k")]
    pub k: f64,
    /// Spring stiffness. Default: 0.1.
    #[serde(default = "default_spring")]
    pub spring: f64,
    /// How quickly the target length shrinks with edge weight. Default: 0.1.
    #[serde(default = "default_weight_damping")]
    pub weight_damping: f64,
    /// Repulsion scale between non-adjacent nodes. Default: 0.01.
    #[serde(default = "default_repulsion")]
    pub repulsion: f64,
    /// Smallest distance used in force terms. Default: 0.01.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Longest move a node may make in one step, before cooling. A value of
    /// 0 or less disables the cap. Default: 2.0.
    #[serde(default = "default_max_displacement")]
    pub max_displacement: f64,
    /// Initial positions are drawn from `[-bound, bound]²`. Default: 1.0.
    #[serde(default = "default_bound")]
    pub bound: f64,
    /// Seed for the layout RNG; `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            k: default_k(),
            spring: default_spring(),
            weight_damping: default_weight_damping(),
            repulsion: default_repulsion(),
            epsilon: default_epsilon(),
            max_displacement: default_max_displacement(),
            bound: default_bound(),
            seed: None,
        }
    }
}

/// Parse an [`AnalysisConfig`] from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn load_config(path: &Path) -> Result<AnalysisConfig, AnalysisError> {
    let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str::<AnalysisConfig>(&content).map_err(|source| AnalysisError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Default per-user config location: `<config dir>/dramatis/config.toml`.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dramatis").join("config.toml"))
}

/// Resolve the effective configuration.
///
/// Precedence: `explicit` path, then `dramatis.toml` in `project_root`,
/// then the user config file, then defaults. Returns the config and the
/// file it came from, if any. An explicit path that does not exist is an
/// error; implicit locations are skipped when absent.
///
/// # Errors
///
/// Returns an error if the selected file cannot be read or does not parse.
pub fn resolve_config(
    explicit: Option<&Path>,
    project_root: &Path,
) -> Result<(AnalysisConfig, Option<PathBuf>), AnalysisError> {
    if let Some(path) = explicit {
        return load_config(path).map(|config| (config, Some(path.to_path_buf())));
    }

    let candidates = std::iter::once(project_root.join(PROJECT_CONFIG_FILE)).chain(user_config_path());
    for path in candidates {
        if path.exists() {
            debug!(path = %path.display(), "loading config");
            let config = load_config(&path)?;
            return Ok((config, Some(path)));
        }
    }

    Ok((AnalysisConfig::default(), None))
}

const fn default_description_limit() -> usize {
    200
}

const fn default_max_iter() -> usize {
    100
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_iterations() -> usize {
    100
}

const fn default_k() -> f64 {
    2.0
}

const fn default_spring() -> f64 {
    0.1
}

const fn default_weight_damping() -> f64 {
    0.1
}

const fn default_repulsion() -> f64 {
    0.01
}

const fn default_epsilon() -> f64 {
    0.01
}

const fn default_max_displacement() -> f64 {
    2.0
}

const fn default_bound() -> f64 {
    1.0
}
