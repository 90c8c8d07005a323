//! Analysis result handed to exporters and the CLI.
//!
//! [`AnalysisReport`] is a flat, serializable snapshot: no graph handles,
//! only ids, scores and coordinates. Node order is graph insertion order;
//! edges are canonical (`source < target`) and sorted.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::community::Communities;
use crate::error::AnalysisError;
use crate::graph::{WeightedGraph, content_hash};
use crate::input::WeightBy;
use crate::layout::Point;
use crate::metrics::{CentralityScores, engine::STRUCTURAL_METRICS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub total_characters: usize,
    pub total_edges: usize,
    pub community_count: usize,
    pub weight_by: WeightBy,
    /// `blake3:<hex>` over the canonical edge list.
    pub content_hash: String,
    pub eigenvector_converged: bool,
    pub eigenvector_iterations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeReport {
    pub id: String,
    pub name: String,
    pub degree: usize,
    pub community: usize,
    #[serde(default)]
    pub dialogue_count: u64,
    #[serde(default)]
    pub context_count: u64,
    #[serde(default)]
    pub description: String,
    /// Metric name → score.
    pub centrality: BTreeMap<String, f64>,
    pub x: f64,
    pub y: f64,
}

impl NodeReport {
    /// Score for `metric`, if recorded.
    #[must_use]
    pub fn score(&self, metric: &str) -> Option<f64> {
        self.centrality.get(metric).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeReport {
    pub source: String,
    pub target: String,
    pub weight: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub nodes: Vec<NodeReport>,
    pub edges: Vec<EdgeReport>,
    pub layout: BTreeMap<String, Point>,
    pub communities: BTreeMap<String, usize>,
}

impl AnalysisReport {
    /// Collect graph, metric, community and layout results into one report.
    ///
    /// Nodes missing from `communities` or `layout` get label 0 and the
    /// origin respectively.
    #[must_use]
    pub fn assemble(
        graph: &WeightedGraph,
        scores: &CentralityScores,
        communities: &Communities,
        layout: BTreeMap<String, Point>,
        weight_by: WeightBy,
    ) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| {
                let centrality = STRUCTURAL_METRICS
                    .iter()
                    .map(|&metric| {
                        let score = scores
                            .by_name(metric)
                            .and_then(|m| m.get(&node.id))
                            .copied()
                            .unwrap_or(0.0);
                        (metric.to_string(), score)
                    })
                    .collect();
                let position = layout.get(&node.id).copied().unwrap_or_default();

                NodeReport {
                    id: node.id.clone(),
                    name: node.name().to_string(),
                    degree: graph.degree(&node.id),
                    community: communities.label(&node.id).unwrap_or(0),
                    dialogue_count: node.count("dialogue_count"),
                    context_count: node.count("context_count"),
                    description: node.text("description").to_string(),
                    centrality,
                    x: position.x,
                    y: position.y,
                }
            })
            .collect();

        let edges = graph
            .edges()
            .into_iter()
            .map(|(source, target, weight)| EdgeReport {
                source: source.to_string(),
                target: target.to_string(),
                weight,
            })
            .collect();

        Self {
            metadata: ReportMetadata {
                total_characters: graph.node_count(),
                total_edges: graph.edge_count(),
                community_count: communities.count,
                weight_by,
                content_hash: content_hash(graph),
                eigenvector_converged: scores.eigenvector.converged,
                eigenvector_iterations: scores.eigenvector.iterations,
            },
            nodes,
            edges,
            layout,
            communities: communities
                .labels
                .iter()
                .map(|(id, label)| (id.clone(), *label))
                .collect(),
        }
    }

    /// Add (or overwrite) a caller-defined score on every node.
    ///
    /// Nodes absent from `scores` get 0.0, so every metric covers the cast.
    pub fn merge_scores(&mut self, metric: &str, scores: &HashMap<String, f64>) {
        for node in &mut self.nodes {
            let score = scores.get(&node.id).copied().unwrap_or(0.0);
            node.centrality.insert(metric.to_string(), score);
        }
    }

    #[must_use]
    pub const fn community_count(&self) -> usize {
        self.metadata.community_count
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&NodeReport> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Every metric recorded on the nodes, sorted.
    #[must_use]
    pub fn metric_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .nodes
            .iter()
            .flat_map(|n| n.centrality.keys().map(String::as_str))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Up to `n` nodes by descending `metric` score, ties by id ascending.
    ///
    /// Unknown metrics yield an empty list.
    #[must_use]
    pub fn top_by(&self, metric: &str, n: usize) -> Vec<&NodeReport> {
        let mut ranked: Vec<(&NodeReport, f64)> = self
            .nodes
            .iter()
            .filter_map(|node| node.score(metric).map(|s| (node, s)))
            .collect();

        ranked.sort_by(|(a, sa), (b, sb)| {
            sb.partial_cmp(sa)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        ranked.into_iter().take(n).map(|(node, _)| node).collect()
    }

    /// Like [`top_by`](Self::top_by) but rejects metrics no node carries.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnknownMetric`] when `metric` is not recorded.
    pub fn try_top_by(&self, metric: &str, n: usize) -> Result<Vec<&NodeReport>, AnalysisError> {
        if self.metric_names().contains(&metric) {
            Ok(self.top_by(metric, n))
        } else {
            Err(AnalysisError::UnknownMetric(metric.to_string()))
        }
    }
}
