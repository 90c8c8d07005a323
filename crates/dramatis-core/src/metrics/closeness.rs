//! Closeness centrality.
//!
//! `closeness(v) = (n - 1) / Σ d(v, u)` over every `u` reachable from `v`.
//! Unreachable nodes contribute nothing to the sum, and the numerator stays
//! `n - 1` even on a disconnected graph, so members of small components get
//! proportionally larger scores than a component-size-aware variant would
//! give them. Isolated nodes (sum 0) score exactly 0.

use std::collections::HashMap;

use tracing::instrument;

use crate::graph::{ShortestPathIndex, WeightedGraph};

/// Compute closeness centrality for every node.
#[must_use]
#[allow(clippy::cast_precision_loss)]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn closeness_centrality(graph: &WeightedGraph) -> HashMap<String, f64> {
    let n = graph.node_count();

    graph
        .indices()
        .map(|idx| {
            let total = ShortestPathIndex::from_source(graph, idx).distance_sum();
            let score = if total > 0 {
                (n - 1) as f64 / total as f64
            } else {
                0.0
            };
            (graph.id_at(idx).to_string(), score)
        })
        .collect()
}
