//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a character lies on shortest
//! paths between two others. High-betweenness characters connect circles
//! that would otherwise barely meet.
//!
//! # Algorithm
//!
//! Brandes' algorithm (2001) for unweighted graphs:
//!
//! 1. For each source `s`, build a [`ShortestPathIndex`] and derive the
//!    shortest-path counts `sigma` with [`path_counts`].
//! 2. Accumulate dependency scores in reverse BFS order (farthest first).
//! 3. Sum the dependencies across all sources.
//!
//! Complexity: O(V * E).
//!
//! # Normalization
//!
//! Sources range over every node, so each unordered pair `{s, t}` is seen
//! once as `s → t` and once as `t → s`. The ordered-pair sum is scaled by
//! `2 / ((n - 1)(n - 2))` when `n > 2` and left raw otherwise.
//!
//! [`betweenness_by_path_counting`] evaluates the textbook definition pair
//! by pair with [`count_paths_through`]. It is O(V⁴) and exists to check the
//! fast path on small graphs.

use std::collections::HashMap;

use tracing::instrument;

use crate::graph::{PathCounter, ShortestPathIndex, WeightedGraph, count_paths_through, path_counts};

/// Compute normalized betweenness centrality for every node.
///
/// Disconnected nodes and nodes with no shortest paths through them score
/// 0.0. An empty graph yields an empty map.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn betweenness_centrality(graph: &WeightedGraph) -> HashMap<String, f64> {
    let n = graph.node_count();
    let mut cb: Vec<f64> = vec![0.0; n];

    for s in graph.indices() {
        let index = ShortestPathIndex::from_source(graph, s);
        let sigma = path_counts(&index);
        let mut delta: Vec<f64> = vec![0.0; n];

        for &w in index.order().iter().rev() {
            let wi = w.index();
            for &v in index.predecessors(w) {
                let vi = v.index();
                if sigma[wi] > 0.0 {
                    delta[vi] += (sigma[vi] / sigma[wi]) * (1.0 + delta[wi]);
                }
            }
            if w != s {
                cb[wi] += delta[wi];
            }
        }
    }

    normalize(&mut cb);

    graph
        .indices()
        .map(|idx| (graph.id_at(idx).to_string(), cb[idx.index()]))
        .collect()
}

/// Betweenness from the pairwise definition: for every ordered pair
/// `(s, t)` and every other node `v`, add `paths_through(v) / paths(s, t)`.
///
/// Produces the same values as [`betweenness_centrality`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_by_path_counting(graph: &WeightedGraph) -> HashMap<String, f64> {
    let n = graph.node_count();
    let mut cb: Vec<f64> = vec![0.0; n];

    for s in graph.indices() {
        let from_source = ShortestPathIndex::from_source(graph, s);
        let mut counter = PathCounter::new(&from_source);

        for t in graph.indices().filter(|&t| t != s) {
            let paths = counter.count_paths(t);
            if paths == 0 {
                continue;
            }
            for v in graph.indices().filter(|&v| v != s && v != t) {
                let through = count_paths_through(graph, &from_source, t, v);
                cb[v.index()] += through as f64 / paths as f64;
            }
        }
    }

    normalize(&mut cb);

    graph
        .indices()
        .map(|idx| (graph.id_at(idx).to_string(), cb[idx.index()]))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn normalize(cb: &mut [f64]) {
    let n = cb.len();
    if n <= 2 {
        return;
    }
    let scale = 2.0 / ((n - 1) as f64 * (n - 2) as f64);
    for score in cb.iter_mut() {
        *score *= scale;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
