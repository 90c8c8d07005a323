//! Community detection as connected components.
//!
//! A community is a maximal connected component: there is no modularity
//! optimization and edge weights play no part. Labels are assigned in
//! discovery order starting at 0, scanning nodes in insertion order; a
//! label's value carries no meaning beyond equality.
//!
//! The flood fill uses an explicit stack so a single huge component cannot
//! exhaust the call stack.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::graph::WeightedGraph;

/// Community assignment for every node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Communities {
    /// Character id → community label.
    pub labels: HashMap<String, usize>,
    /// Number of communities (labels are `0..count`).
    pub count: usize,
}

impl Communities {
    /// Label of one character, if it is in the graph.
    #[must_use]
    pub fn label(&self, id: &str) -> Option<usize> {
        self.labels.get(id).copied()
    }

    /// Community sizes indexed by label.
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.count];
        for &label in self.labels.values() {
            sizes[label] += 1;
        }
        sizes
    }
}

/// Partition the graph into connected components.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn detect_communities(graph: &WeightedGraph) -> Communities {
    let n = graph.node_count();
    let mut label_of: Vec<Option<usize>> = vec![None; n];
    let mut count = 0;

    for start in graph.indices() {
        if label_of[start.index()].is_some() {
            continue;
        }

        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            if label_of[v.index()].is_some() {
                continue;
            }
            label_of[v.index()] = Some(count);
            stack.extend(
                graph
                    .neighbor_indices(v)
                    .filter(|w| label_of[w.index()].is_none()),
            );
        }
        count += 1;
    }

    let labels = graph
        .indices()
        .filter_map(|idx| label_of[idx.index()].map(|label| (graph.id_at(idx).to_string(), label)))
        .collect();

    debug!(communities = count, "communities detected");

    Communities { labels, count }
}
