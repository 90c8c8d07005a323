//! Runs every centrality metric over one graph snapshot.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::config::EigenvectorConfig;
use crate::graph::WeightedGraph;
use crate::metrics::betweenness::betweenness_centrality;
use crate::metrics::closeness::closeness_centrality;
use crate::metrics::degree::degree_centrality;
use crate::metrics::eigenvector::{EigenvectorResult, eigenvector_centrality};

/// Metric names as they appear in reports, in reporting order.
pub const STRUCTURAL_METRICS: [&str; 4] = ["degree", "betweenness", "closeness", "eigenvector"];

/// One independent score map per metric.
#[derive(Debug, Clone)]
pub struct CentralityScores {
    pub degree: HashMap<String, f64>,
    pub betweenness: HashMap<String, f64>,
    pub closeness: HashMap<String, f64>,
    pub eigenvector: EigenvectorResult,
}

impl CentralityScores {
    /// Score map for a metric by report name.
    #[must_use]
    pub fn by_name(&self, metric: &str) -> Option<&HashMap<String, f64>> {
        match metric {
            "degree" => Some(&self.degree),
            "betweenness" => Some(&self.betweenness),
            "closeness" => Some(&self.closeness),
            "eigenvector" => Some(&self.eigenvector.scores),
            _ => None,
        }
    }
}

/// Computes degree, betweenness, closeness and eigenvector centrality.
#[derive(Debug, Clone, Copy)]
pub struct CentralityEngine<'a> {
    graph: &'a WeightedGraph,
    eigenvector: &'a EigenvectorConfig,
}

impl<'a> CentralityEngine<'a> {
    #[must_use]
    pub const fn new(graph: &'a WeightedGraph, eigenvector: &'a EigenvectorConfig) -> Self {
        Self { graph, eigenvector }
    }

    #[must_use]
    pub fn degree(&self) -> HashMap<String, f64> {
        degree_centrality(self.graph)
    }

    #[must_use]
    pub fn betweenness(&self) -> HashMap<String, f64> {
        betweenness_centrality(self.graph)
    }

    #[must_use]
    pub fn closeness(&self) -> HashMap<String, f64> {
        closeness_centrality(self.graph)
    }

    #[must_use]
    pub fn eigenvector(&self) -> EigenvectorResult {
        eigenvector_centrality(self.graph, self.eigenvector)
    }

    /// Run all four metrics.
    #[must_use]
    #[instrument(skip(self), fields(nodes = self.graph.node_count(), edges = self.graph.edge_count()))]
    pub fn run(&self) -> CentralityScores {
        let scores = CentralityScores {
            degree: self.degree(),
            betweenness: self.betweenness(),
            closeness: self.closeness(),
            eigenvector: self.eigenvector(),
        };
        debug!(
            eigenvector_iterations = scores.eigenvector.iterations,
            eigenvector_converged = scores.eigenvector.converged,
            "centrality computed"
        );
        scores
    }
}
