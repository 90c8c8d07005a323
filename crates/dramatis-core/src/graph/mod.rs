//! Character graph module.
//!
//! # Overview
//!
//! This module owns the weighted, undirected interaction graph and the
//! breadth-first path machinery that the centrality metrics run on.
//!
//! ## Pipeline
//!
//! ```text
//! CastInput
//!        ↓  build::WeightedGraph::from_input()
//! WeightedGraph (UnGraph, accumulated u64 edge weights)
//!        ↓  paths::ShortestPathIndex::from_source()   one BFS per source
//! distances + every shortest-path predecessor
//!        ↓  paths::PathCounter                        shortest-path counts
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use dramatis_core::graph::WeightedGraph;
//!
//! let mut g = WeightedGraph::new();
//! g.add_named_node("dorothea", "Dorothea Brooke");
//! g.add_named_node("casaubon", "Edward Casaubon");
//! g.add_edge("dorothea", "casaubon", 3);
//! g.add_edge("casaubon", "dorothea", 1);
//!
//! assert_eq!(g.edge_weight("casaubon", "dorothea"), 4);
//! assert_eq!(g.degree("dorothea"), 1);
//! ```

pub mod build;
pub mod paths;
pub mod weighted;

// Re-export primary types at module level for convenience.
pub use build::content_hash;
pub use paths::{PathCounter, ShortestPathIndex, count_paths_through, path_counts};
pub use weighted::{CharacterNode, WeightedGraph};
