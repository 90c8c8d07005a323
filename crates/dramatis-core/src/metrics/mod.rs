//! Centrality metrics for the character graph.
//!
//! # Overview
//!
//! Each metric answers a different question about a character's place in
//! the cast:
//!
//! - **Degree centrality** (`degree`): How many distinct characters does this
//!   one interact with, relative to the whole cast?
//! - **Betweenness centrality** (`betweenness`): Which characters bridge
//!   otherwise separate circles?
//! - **Closeness centrality** (`closeness`): Who is only a few hops from
//!   everyone else?
//! - **Eigenvector centrality** (`eigenvector`): Who is connected to other
//!   well-connected characters?
//!
//! All metrics treat the graph as unweighted: interaction weights only shape
//! the layout. Every metric is total: empty, single-node and disconnected
//! graphs produce well-defined (typically zero) scores rather than errors.
//!
//! # Usage
//!
//! ```rust
//! use dramatis_core::config::EigenvectorConfig;
//! use dramatis_core::graph::WeightedGraph;
//! use dramatis_core::metrics::CentralityEngine;
//!
//! let mut g = WeightedGraph::new();
//! for id in ["a", "b", "c"] {
//!     g.add_named_node(id, id);
//! }
//! g.add_edge("a", "b", 1);
//! g.add_edge("b", "c", 1);
//!
//! let scores = CentralityEngine::new(&g, &EigenvectorConfig::default()).run();
//! assert!(scores.betweenness["b"] > 0.0);
//! ```

pub mod betweenness;
pub mod closeness;
pub mod degree;
pub mod eigenvector;
pub mod engine;

pub use engine::{CentralityEngine, CentralityScores};
