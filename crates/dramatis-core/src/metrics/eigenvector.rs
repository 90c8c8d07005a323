//! Eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! Eigenvector centrality scores a character by the scores of the characters
//! they interact with: it approximates the dominant eigenvector of the
//! (unweighted) adjacency matrix.
//!
//! # Algorithm
//!
//! 1. Initialize every score to 1.0.
//! 2. For each node `v`: `score(v) = Σ score(u)` over neighbors `u`.
//! 3. Normalize the score vector to unit L2 norm (skipped when the norm is 0).
//! 4. Stop once the largest per-node change is below `tolerance`, or after
//!    `max_iter` iterations.
//!
//! Starting from a positive vector keeps every score non-negative. On a
//! connected, non-bipartite graph the iteration converges; bipartite graphs
//! (paths, even cycles with uneven start) can oscillate between two vectors,
//! so the iteration cap is the only guaranteed stop. Isolated nodes end at 0.

use std::collections::HashMap;

use tracing::{instrument, warn};

use crate::config::EigenvectorConfig;
use crate::graph::WeightedGraph;

/// Result of eigenvector centrality computation.
#[derive(Debug, Clone)]
pub struct EigenvectorResult {
    /// Eigenvector centrality scores: character id → score.
    pub scores: HashMap<String, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
}

/// Compute eigenvector centrality for every node.
#[must_use]
#[instrument(skip(graph, config), fields(nodes = graph.node_count()))]
pub fn eigenvector_centrality(graph: &WeightedGraph, config: &EigenvectorConfig) -> EigenvectorResult {
    let n = graph.node_count();

    if n == 0 {
        return EigenvectorResult {
            scores: HashMap::new(),
            iterations: 0,
            converged: true,
        };
    }

    let neighbors: Vec<Vec<usize>> = graph
        .indices()
        .map(|v| graph.neighbor_indices(v).map(|u| u.index()).collect())
        .collect();

    let mut scores: Vec<f64> = vec![1.0; n];
    let mut converged = false;
    let mut iterations = 0;

    for iter in 0..config.max_iter {
        iterations = iter + 1;

        let mut new_scores: Vec<f64> = neighbors
            .iter()
            .map(|nbrs| nbrs.iter().map(|&u| scores[u]).sum())
            .collect();

        let norm: f64 = new_scores.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for x in &mut new_scores {
                *x /= norm;
            }
        }

        let max_change = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0_f64, f64::max);

        scores = new_scores;

        if max_change < config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            iterations,
            "eigenvector centrality did not converge; returning last iterate"
        );
    }

    let scores = graph
        .indices()
        .map(|idx| (graph.id_at(idx).to_string(), scores[idx.index()]))
        .collect();

    EigenvectorResult {
        scores,
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
