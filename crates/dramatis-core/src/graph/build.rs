//! Graph construction from extractor output.
//!
//! # Overview
//!
//! Every character in [`CastInput::characters`] becomes a node, including
//! characters that never interact, so downstream metrics see the full cast.
//! Edges then come from the source selected by [`WeightBy`]:
//!
//! - `co_occurrence`: each `co_occurrences[a][b]` entry with `a < b`. The
//!   nested map is symmetric, so reading only one half avoids double counting.
//! - `interaction_frequency`: [`CastInput::interaction_tally`] pair counts.
//! - `edge_list`: the explicit `edges` triples, accumulated.
//!
//! All edges go through [`WeightedGraph::add_edge`], so references to
//! characters outside the cast and self-pairs are dropped silently.
//!
//! ## Content Hash
//!
//! [`content_hash`] is a BLAKE3 hash of the canonical edge list. Two runs
//! over the same interaction structure report the same hash.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::graph::weighted::WeightedGraph;
use crate::input::{CastInput, CharacterRecord, WeightBy};

impl WeightedGraph {
    /// Build a graph from extractor output.
    ///
    /// Descriptions longer than `description_limit` characters are truncated.
    #[must_use]
    #[instrument(skip(input), fields(characters = input.characters.len()))]
    pub fn from_input(input: &CastInput, weight_by: WeightBy, description_limit: usize) -> Self {
        let mut graph = Self::new();

        for (id, record) in &input.characters {
            graph.add_node(id.as_str(), node_attributes(record, description_limit));
        }

        let mut dropped = 0_usize;
        match weight_by {
            WeightBy::CoOccurrence => {
                for (a, row) in &input.co_occurrences {
                    for (b, weight) in row {
                        if a < b && !graph.add_edge(a, b, *weight) {
                            dropped += 1;
                        }
                    }
                }
            }
            WeightBy::InteractionFrequency => {
                for ((a, b), weight) in input.interaction_tally() {
                    if !graph.add_edge(a, b, weight) {
                        dropped += 1;
                    }
                }
            }
            WeightBy::EdgeList => {
                for edge in &input.edges {
                    if !graph.add_edge(&edge.source, &edge.target, edge.weight) {
                        dropped += 1;
                    }
                }
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            dropped,
            %weight_by,
            "character graph built"
        );

        graph
    }
}

/// Flatten a [`CharacterRecord`] into a node attribute bag.
fn node_attributes(record: &CharacterRecord, description_limit: usize) -> BTreeMap<String, Value> {
    let mut attributes = record.extra.clone();
    attributes.insert("name".to_string(), Value::from(record.name.as_str()));
    attributes.insert("dialogue_count".to_string(), Value::from(record.dialogue_count));
    attributes.insert("context_count".to_string(), Value::from(record.context_count));
    let description: String = record.description.chars().take(description_limit).collect();
    attributes.insert("description".to_string(), Value::from(description));
    attributes
}

/// Compute a BLAKE3 hash of the canonical edge list.
#[must_use]
pub fn content_hash(graph: &WeightedGraph) -> String {
    let mut hasher = blake3::Hasher::new();
    for (source, target, weight) in graph.edges() {
        hasher.update(source.as_bytes());
        hasher.update(b"\x00");
        hasher.update(target.as_bytes());
        hasher.update(b"\x00");
        hasher.update(&weight.to_le_bytes());
        hasher.update(b"\n");
    }
    format!("blake3:{}", hasher.finalize().to_hex())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::WeightedEdge;

    fn cast(ids: &[&str]) -> CastInput {
        let mut input = CastInput::default();
        for id in ids {
            input
                .characters
                .insert((*id).to_string(), CharacterRecord::named(id.to_uppercase()));
        }
        input
    }

    #[test]
    fn every_character_becomes_a_node() {
        let input = cast(&["a", "b", "c"]);
        let g = WeightedGraph::from_input(&input, WeightBy::CoOccurrence, 200);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.node("b").map(|n| n.name().to_string()), Some("B".to_string()));
    }

    #[test]
    fn co_occurrence_reads_each_pair_once() {
        let mut input = cast(&["a", "b"]);
        input
            .co_occurrences
            .insert("a".into(), BTreeMap::from([("b".to_string(), 4)]));
        input
            .co_occurrences
            .insert("b".into(), BTreeMap::from([("a".to_string(), 4)]));

        let g = WeightedGraph::from_input(&input, WeightBy::CoOccurrence, 200);
        assert_eq!(g.edge_weight("a", "b"), 4);
    }

    #[test]
    fn interaction_frequency_tallies_lists() {
        let mut input = cast(&["a", "b", "c"]);
        input
            .interactions
            .insert("a".into(), vec!["b".into(), "b".into(), "c".into()]);
        input.interactions.insert("b".into(), vec!["a".into()]);

        let g = WeightedGraph::from_input(&input, WeightBy::InteractionFrequency, 200);
        assert_eq!(g.edge_weight("a", "b"), 3);
        assert_eq!(g.edge_weight("a", "c"), 1);
        assert_eq!(g.edge_weight("b", "c"), 0);
    }

    #[test]
    fn edge_list_drops_unknown_and_self_edges() {
        let mut input = cast(&["a", "b"]);
        input.edges = vec![
            WeightedEdge { source: "a".into(), target: "b".into(), weight: 2 },
            WeightedEdge { source: "b".into(), target: "a".into(), weight: 1 },
            WeightedEdge { source: "a".into(), target: "a".into(), weight: 9 },
            WeightedEdge { source: "a".into(), target: "zed".into(), weight: 9 },
        ];

        let g = WeightedGraph::from_input(&input, WeightBy::EdgeList, 200);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge_weight("a", "b"), 3);
        assert_eq!(g.degree("a"), 1);
    }

    #[test]
    fn description_is_truncated() {
        let mut input = cast(&["a"]);
        if let Some(record) = input.characters.get_mut("a") {
            record.description = "x".repeat(500);
        }
        let g = WeightedGraph::from_input(&input, WeightBy::CoOccurrence, 200);
        assert_eq!(g.node("a").map(|n| n.text("description").len()), Some(200));
    }

    #[test]
    fn content_hash_ignores_insertion_order() {
        let mut g1 = WeightedGraph::new();
        let mut g2 = WeightedGraph::new();
        for id in ["a", "b", "c"] {
            g1.add_named_node(id, id);
        }
        for id in ["c", "b", "a"] {
            g2.add_named_node(id, id);
        }
        g1.add_edge("a", "b", 1);
        g1.add_edge("b", "c", 2);
        g2.add_edge("c", "b", 2);
        g2.add_edge("b", "a", 1);

        assert_eq!(content_hash(&g1), content_hash(&g2));
        assert!(content_hash(&g1).starts_with("blake3:"));

        g2.add_edge("a", "b", 1);
        assert_ne!(content_hash(&g1), content_hash(&g2), "weight change alters hash");
    }
}
