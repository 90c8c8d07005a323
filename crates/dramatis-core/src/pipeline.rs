//! End-to-end analysis: build → centrality → communities → layout → report.

use std::collections::HashMap;

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::community::detect_communities;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::graph::WeightedGraph;
use crate::input::CastInput;
use crate::layout::ForceLayout;
use crate::metrics::CentralityEngine;
use crate::report::AnalysisReport;
use crate::timing::timed;

/// Share of all dialogue spoken by each character.
pub const DIALOGUE_METRIC: &str = "dialogue";
/// Sum of each character's co-occurrence counts.
pub const INTERACTION_STRENGTH_METRIC: &str = "interaction_strength";

/// Analyze extractor output.
///
/// Builds the graph with `config.weight_by`, runs every stage, and merges
/// the `dialogue` and `interaction_strength` scores into the report. The
/// layout draws its initial positions from `rng`.
///
/// # Errors
///
/// Returns [`AnalysisError::NoCharacters`] when the cast is empty.
#[instrument(skip_all, fields(characters = input.characters.len(), weight_by = %config.weight_by))]
pub fn analyze<R: Rng + ?Sized>(
    input: &CastInput,
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<AnalysisReport, AnalysisError> {
    if input.characters.is_empty() {
        return Err(AnalysisError::NoCharacters);
    }

    let graph = timed("build", || {
        WeightedGraph::from_input(input, config.weight_by, config.description_limit)
    });

    let mut report = analyze_graph(&graph, config, rng)?;

    timed("domain_scores", || {
        report.merge_scores(DIALOGUE_METRIC, &dialogue_shares(&graph));
        report.merge_scores(INTERACTION_STRENGTH_METRIC, &interaction_strengths(input));
    });

    info!(
        characters = report.metadata.total_characters,
        relationships = report.metadata.total_edges,
        communities = report.metadata.community_count,
        "analysis complete"
    );
    Ok(report)
}

/// Run centrality, communities and layout on an already built graph.
///
/// # Errors
///
/// Returns [`AnalysisError::NoCharacters`] when the graph has no nodes.
#[instrument(skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn analyze_graph<R: Rng + ?Sized>(
    graph: &WeightedGraph,
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<AnalysisReport, AnalysisError> {
    if graph.is_empty() {
        return Err(AnalysisError::NoCharacters);
    }

    let scores = timed("centrality", || CentralityEngine::new(graph, &config.eigenvector).run());
    let communities = timed("communities", || detect_communities(graph));
    let layout = timed("layout", || ForceLayout::new(graph, &config.layout).run(rng));
    debug!(positions = layout.len(), "layout finished");

    Ok(timed("report", || {
        AnalysisReport::assemble(graph, &scores, &communities, layout, config.weight_by)
    }))
}

/// `dialogue_count / total_dialogue`, treating a zero total as 1.
#[allow(clippy::cast_precision_loss)]
fn dialogue_shares(graph: &WeightedGraph) -> HashMap<String, f64> {
    let total = graph
        .nodes()
        .fold(0_u64, |acc, node| acc.saturating_add(node.count("dialogue_count")));
    let total = total.max(1) as f64;

    graph
        .nodes()
        .map(|node| (node.id.clone(), node.count("dialogue_count") as f64 / total))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn interaction_strengths(input: &CastInput) -> HashMap<String, f64> {
    input
        .characters
        .keys()
        .map(|id| (id.clone(), input.interaction_strength(id) as f64))
        .collect()
}
