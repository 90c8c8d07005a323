//! Weighted undirected character graph.
//!
//! # Overview
//!
//! [`WeightedGraph`] wraps a petgraph [`UnGraph`] whose node weights are
//! [`CharacterNode`]s and whose edge weights are accumulated interaction
//! counts. A string-id → [`NodeIndex`] map gives O(1) lookups by character id.
//!
//! ## Invariants
//!
//! - No self-loops: `add_edge(a, a, _)` is a no-op.
//! - At most one edge per unordered pair: repeated `add_edge` calls add to
//!   the existing weight instead of creating a parallel edge.
//! - Every stored weight is ≥ 1.
//! - Adjacency is symmetric because the underlying graph is undirected.
//! - Nodes are never removed, so `NodeIndex` values are dense and stable and
//!   node iteration follows insertion order.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde_json::Value;

// ---------------------------------------------------------------------------
// CharacterNode
// ---------------------------------------------------------------------------

/// A character: an opaque id plus a free-form attribute bag.
///
/// The attribute bag conventionally carries `name` and domain counts such
/// as `dialogue_count`, but the graph itself never interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterNode {
    /// Unique character id within the graph.
    pub id: String,
    /// Caller-supplied attributes.
    pub attributes: BTreeMap<String, Value>,
}

impl CharacterNode {
    /// Display name from the `name` attribute, falling back to the id.
    #[must_use]
    pub fn name(&self) -> &str {
        self.attributes
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(&self.id)
    }

    /// Read a non-negative integer attribute, or 0 if missing or not a count.
    #[must_use]
    pub fn count(&self, key: &str) -> u64 {
        self.attributes.get(key).and_then(Value::as_u64).unwrap_or(0)
    }

    /// Read a string attribute, or `""` if missing.
    #[must_use]
    pub fn text(&self, key: &str) -> &str {
        self.attributes
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// WeightedGraph
// ---------------------------------------------------------------------------

/// Undirected graph of characters with accumulated edge weights.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    graph: UnGraph<CharacterNode, u64>,
    node_map: HashMap<String, NodeIndex>,
}

impl WeightedGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, or replace the attributes of an existing one.
    ///
    /// Idempotent: the node keeps its first position in iteration order
    /// and all of its edges.
    pub fn add_node(&mut self, id: impl Into<String>, attributes: BTreeMap<String, Value>) {
        let id = id.into();
        if let Some(&idx) = self.node_map.get(&id) {
            self.graph[idx].attributes = attributes;
            return;
        }

        let idx = self.graph.add_node(CharacterNode {
            id: id.clone(),
            attributes,
        });
        self.node_map.insert(id, idx);
    }

    /// Insert a node whose only attribute is its display `name`.
    pub fn add_named_node(&mut self, id: impl Into<String>, name: impl Into<String>) {
        let mut attributes = BTreeMap::new();
        attributes.insert("name".to_string(), Value::String(name.into()));
        self.add_node(id, attributes);
    }

    /// Accumulate `weight` into the unordered edge `{a, b}`.
    ///
    /// Silently ignored when either endpoint is unknown, when `a == b`, or
    /// when `weight` is 0. Returns `true` if the graph changed.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: u64) -> bool {
        if a == b || weight == 0 {
            return false;
        }
        let (Some(ia), Some(ib)) = (self.index_of(a), self.index_of(b)) else {
            return false;
        };

        if let Some(edge) = self.graph.find_edge(ia, ib) {
            self.graph[edge] = self.graph[edge].saturating_add(weight);
        } else {
            self.graph.add_edge(ia, ib, weight);
        }
        true
    }

    /// Number of distinct neighbors. Zero for isolated or unknown nodes.
    #[must_use]
    pub fn degree(&self, id: &str) -> usize {
        self.index_of(id)
            .map_or(0, |idx| self.graph.neighbors(idx).count())
    }

    /// Neighbor ids of `id` (empty for isolated or unknown nodes).
    #[must_use]
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        self.index_of(id).map_or_else(Vec::new, |idx| {
            self.graph
                .neighbors(idx)
                .map(|n| self.graph[n].id.as_str())
                .collect()
        })
    }

    /// Accumulated weight of `{a, b}`; 0 when no edge exists.
    #[must_use]
    pub fn edge_weight(&self, a: &str, b: &str) -> u64 {
        match (self.index_of(a), self.index_of(b)) {
            (Some(ia), Some(ib)) => self.weight_between(ia, ib),
            _ => 0,
        }
    }

    /// Return `true` if `id` is a node of this graph.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&CharacterNode> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    /// Return the number of nodes (characters) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of distinct undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Return `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &CharacterNode> + '_ {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Node ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes().map(|n| n.id.as_str())
    }

    /// Every edge exactly once as `(source, target, weight)` with
    /// `source < target`, sorted by `(source, target)`.
    #[must_use]
    pub fn edges(&self) -> Vec<(&str, &str, u64)> {
        let mut edges: Vec<(&str, &str, u64)> = self
            .graph
            .edge_references()
            .map(|e| {
                let a = self.graph[e.source()].id.as_str();
                let b = self.graph[e.target()].id.as_str();
                if a <= b {
                    (a, b, *e.weight())
                } else {
                    (b, a, *e.weight())
                }
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    // -----------------------------------------------------------------------
    // Index-level access for the metric and layout modules.
    // -----------------------------------------------------------------------

    /// Look up the `NodeIndex` for a character id.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// Return the character id for a node index.
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not belong to this graph.
    #[must_use]
    pub fn id_at(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].id
    }

    /// Neighbor indices of `idx`.
    pub fn neighbor_indices(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    /// Node indices in insertion order (`0..node_count`).
    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    /// Accumulated weight between two node indices, 0 if not adjacent.
    #[must_use]
    pub fn weight_between(&self, a: NodeIndex, b: NodeIndex) -> u64 {
        self.graph
            .find_edge(a, b)
            .map_or(0, |edge| self.graph[edge])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
