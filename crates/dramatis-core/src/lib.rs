#![forbid(unsafe_code)]
//! dramatis-core library.
//!
//! Builds a weighted, undirected character-interaction graph from the output
//! of an upstream text extractor and computes the structural metrics used to
//! rank and draw a cast of characters.
//!
//! # Pipeline
//!
//! ```text
//! CastInput (characters + co-occurrences / interactions / edge list)
//!        ↓  WeightedGraph::from_input()
//! WeightedGraph
//!        ↓  CentralityEngine::run()         degree, betweenness, closeness, eigenvector
//!        ↓  detect_communities()            connected components
//!        ↓  ForceLayout::run()              2-D spring embedding
//! AnalysisReport
//! ```
//!
//! [`pipeline::analyze`] runs every stage in order.
//!
//! # Conventions
//!
//! - **Errors**: graph and metric code is total and never fails. Only the
//!   orchestration and I/O boundary returns [`error::AnalysisError`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod community;
pub mod config;
pub mod error;
pub mod graph;
pub mod input;
pub mod layout;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod timing;

pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use graph::WeightedGraph;
pub use input::{CastInput, WeightBy};
pub use pipeline::{analyze, analyze_graph};
pub use report::AnalysisReport;
