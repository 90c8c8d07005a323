//! Normalized degree centrality.

use std::collections::HashMap;

use crate::graph::WeightedGraph;

/// Degree centrality: `degree(v) / (n - 1)`.
///
/// Every score lies in `[0, 1]` because the graph has no self-loops or
/// parallel edges. All scores are 0 when the graph has at most one node.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(graph: &WeightedGraph) -> HashMap<String, f64> {
    let n = graph.node_count();
    if n <= 1 {
        return graph.ids().map(|id| (id.to_string(), 0.0)).collect();
    }

    let max_degree = (n - 1) as f64;
    graph
        .indices()
        .map(|idx| {
            let degree = graph.neighbor_indices(idx).count() as f64;
            (graph.id_at(idx).to_string(), degree / max_degree)
        })
        .collect()
}
