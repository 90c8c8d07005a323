//! Force-directed layout (spring embedder).
//!
//! # Overview
//!
//! A discrete-time simulation that places interacting characters near each
//! other and pushes everyone else apart:
//!
//! - Adjacent pairs are joined by a spring whose rest length
//!   `k / (1 + weight * weight_damping)` shrinks as the interaction weight
//!   grows, so frequent partners end up closer.
//! - Non-adjacent pairs repel with an inverse-square force scaled by
//!   `repulsion`.
//! - Each step's displacement is capped at `max_displacement` and then
//!   multiplied by a cooling factor that falls linearly from 1.0 to 0.0 over
//!   the run.
//!
//! Every step visits all ordered pairs, O(n²); casts are tens to low
//! hundreds of characters.
//!
//! Distances below `epsilon` are clamped to `epsilon` inside the force terms,
//! so coincident nodes never divide by zero and forces stay bounded.
//!
//! # Randomness
//!
//! Initial positions come from the caller's RNG. Pass a seeded
//! `rand::rngs::StdRng` for reproducible layouts.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::LayoutConfig;
use crate::graph::WeightedGraph;

/// A 2-D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Spring-embedder simulation over one graph.
#[derive(Debug, Clone, Copy)]
pub struct ForceLayout<'a> {
    graph: &'a WeightedGraph,
    config: &'a LayoutConfig,
}

impl<'a> ForceLayout<'a> {
    #[must_use]
    pub const fn new(graph: &'a WeightedGraph, config: &'a LayoutConfig) -> Self {
        Self { graph, config }
    }

    /// Uniform random positions in `[-bound, bound]²`, indexed like the graph.
    pub fn initial_positions<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Point> {
        let bound = self.config.bound;
        self.graph
            .indices()
            .map(|_| {
                if bound > 0.0 {
                    Point::new(rng.gen_range(-bound..=bound), rng.gen_range(-bound..=bound))
                } else {
                    Point::default()
                }
            })
            .collect()
    }

    /// Seed positions from `rng`, simulate, and return id → position.
    #[instrument(skip(self, rng), fields(nodes = self.graph.node_count(), iterations = self.config.iterations))]
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> BTreeMap<String, Point> {
        let mut positions = self.initial_positions(rng);
        self.simulate(&mut positions);
        self.graph
            .indices()
            .map(|idx| (self.graph.id_at(idx).to_string(), positions[idx.index()]))
            .collect()
    }

    /// Run the simulation in place from caller-supplied positions.
    ///
    /// `positions` is indexed like the graph (insertion order). Extra
    /// entries are left untouched; missing ones are treated as the origin.
    pub fn simulate(&self, positions: &mut Vec<Point>) {
        let n = self.graph.node_count();
        if positions.len() < n {
            positions.resize(n, Point::default());
        }
        if n == 0 || self.config.iterations == 0 {
            return;
        }

        let weights = self.weight_matrix();
        let cfg = self.config;
        let epsilon = cfg.epsilon.max(f64::MIN_POSITIVE);

        #[allow(clippy::cast_precision_loss)]
        let total = cfg.iterations as f64;
        let mut forces = vec![Point::default(); n];

        for iteration in 0..cfg.iterations {
            forces.fill(Point::default());

            for i in 0..n {
                let p1 = positions[i];
                for j in (0..n).filter(|&j| j != i) {
                    let p2 = positions[j];
                    let dx = p2.x - p1.x;
                    let dy = p2.y - p1.y;
                    let distance = dx.hypot(dy).max(epsilon);

                    let weight = weights[i * n + j];
                    if weight > 0 {
                        #[allow(clippy::cast_precision_loss)]
                        let target = cfg.k / (1.0 + weight as f64 * cfg.weight_damping);
                        let pull = (distance - target) / distance * cfg.spring;
                        forces[i].x += dx * pull;
                        forces[i].y += dy * pull;
                    } else {
                        let push = cfg.k * cfg.k / (distance * distance) * cfg.repulsion;
                        forces[i].x -= dx / distance * push;
                        forces[i].y -= dy / distance * push;
                    }
                }
            }

            #[allow(clippy::cast_precision_loss)]
            let cooling = 1.0 - iteration as f64 / total;
            for (p, f) in positions.iter_mut().zip(&forces) {
                let step = clamp_step(*f, cfg.max_displacement);
                p.x += step.x * cooling;
                p.y += step.y * cooling;
            }
        }
    }

    /// Dense `n × n` edge-weight lookup (0 = not adjacent).
    fn weight_matrix(&self) -> Vec<u64> {
        let n = self.graph.node_count();
        let mut weights = vec![0_u64; n * n];
        for (a, b, w) in self.graph.edges() {
            if let (Some(ia), Some(ib)) = (self.graph.index_of(a), self.graph.index_of(b)) {
                weights[ia.index() * n + ib.index()] = w;
                weights[ib.index() * n + ia.index()] = w;
            }
        }
        weights
    }
}

/// Scale `force` down to length `cap` when it is longer. `cap <= 0` is no cap.
fn clamp_step(force: Point, cap: f64) -> Point {
    let length = force.x.hypot(force.y);
    if cap > 0.0 && length > cap {
        let scale = cap / length;
        Point::new(force.x * scale, force.y * scale)
    } else {
        force
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn make_graph(nodes: &[&str], edges: &[(&str, &str, u64)]) -> WeightedGraph {
        let mut g = WeightedGraph::new();
        for id in nodes {
            g.add_named_node(*id, *id);
        }
        for (a, b, w) in edges {
            g.add_edge(a, b, *w);
        }
        g
    }

    fn dist(a: Point, b: Point) -> f64 {
        (a.x - b.x).hypot(a.y - b.y)
    }

    #[test]
    fn initial_positions_are_bounded() {
        let g = make_graph(&["a", "b", "c", "d"], &[]);
        let config = LayoutConfig {
            bound: 0.5,
            ..LayoutConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        for p in ForceLayout::new(&g, &config).initial_positions(&mut rng) {
            assert!((-0.5..=0.5).contains(&p.x));
            assert!((-0.5..=0.5).contains(&p.y));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let g = make_graph(&["a", "b", "c"], &[("a", "b", 2), ("b", "c", 1)]);
        let config = LayoutConfig::default();
        let layout = ForceLayout::new(&g, &config);

        let first = layout.run(&mut StdRng::seed_from_u64(42));
        let second = layout.run(&mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn coincident_start_stays_finite() {
        let g = make_graph(
            &["a", "b", "c", "d"],
            &[("a", "b", 1), ("c", "d", 9)],
        );
        let config = LayoutConfig::default();
        let mut positions = vec![Point::new(0.25, 0.25); 4];
        ForceLayout::new(&g, &config).simulate(&mut positions);

        assert!(positions.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn near_coincident_start_stays_finite() {
        let g = make_graph(&["a", "b", "c"], &[("a", "b", 1)]);
        let config = LayoutConfig::default();
        let mut positions = vec![
            Point::new(0.0, 0.0),
            Point::new(1e-300, 0.0),
            Point::new(0.0, 1e-300),
        ];
        ForceLayout::new(&g, &config).simulate(&mut positions);
        assert!(positions.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn heavy_edge_pulls_tighter_than_light_edge() {
        // Two disjoint pairs, identical start offsets; only weight differs.
        let g = make_graph(&["a", "b", "c", "d"], &[("a", "b", 50), ("c", "d", 1)]);
        let config = LayoutConfig {
            repulsion: 0.0,
            iterations: 200,
            ..LayoutConfig::default()
        };
        let mut positions = vec![
            Point::new(-1.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(-1.0, 10.0),
            Point::new(1.0, 10.0),
        ];
        ForceLayout::new(&g, &config).simulate(&mut positions);

        let heavy = dist(positions[0], positions[1]);
        let light = dist(positions[2], positions[3]);
        assert!(heavy < light, "heavy={heavy} light={light}");
    }

    #[test]
    fn empty_graph_produces_empty_layout() {
        let g = WeightedGraph::new();
        let config = LayoutConfig::default();
        let layout = ForceLayout::new(&g, &config).run(&mut StdRng::seed_from_u64(0));
        assert!(layout.is_empty());
    }

    #[test]
    fn zero_iterations_keeps_initial_positions() {
        let g = make_graph(&["a", "b"], &[("a", "b", 1)]);
        let config = LayoutConfig {
            iterations: 0,
            ..LayoutConfig::default()
        };
        let start = vec![Point::new(0.1, 0.2), Point::new(-0.3, 0.4)];
        let mut positions = start.clone();
        ForceLayout::new(&g, &config).simulate(&mut positions);
        assert_eq!(positions, start);
    }

    fn max_abs_coord(layout: &BTreeMap<String, Point>) -> f64 {
        layout
            .values()
            .map(|p| p.x.abs().max(p.y.abs()))
            .fold(0.0, f64::max)
    }

    #[test]
    fn crowded_hub_stays_drawable() {
        let leaves: Vec<String> = (0..80).map(|i| format!("leaf{i:02}")).collect();
        let mut g = WeightedGraph::new();
        g.add_named_node("hub", "hub");
        for leaf in &leaves {
            g.add_named_node(leaf.as_str(), leaf.as_str());
            g.add_edge("hub", leaf, 1);
        }

        let config = LayoutConfig::default();
        let layout = ForceLayout::new(&g, &config).run(&mut StdRng::seed_from_u64(1));
        let extent = max_abs_coord(&layout);
        assert!(extent < 100.0, "star layout spread to {extent}");
    }

    #[test]
    fn dense_clique_stays_drawable() {
        let ids: Vec<String> = (0..60).map(|i| format!("c{i:02}")).collect();
        let mut g = WeightedGraph::new();
        for id in &ids {
            g.add_named_node(id.as_str(), id.as_str());
        }
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                g.add_edge(a, b, 1);
            }
        }

        let config = LayoutConfig::default();
        let layout = ForceLayout::new(&g, &config).run(&mut StdRng::seed_from_u64(1));
        let extent = max_abs_coord(&layout);
        assert!(extent < 100.0, "clique layout spread to {extent}");
    }

    #[test]
    fn step_is_capped_before_cooling() {
        let capped = clamp_step(Point::new(30.0, 40.0), 2.0);
        assert!((capped.x - 1.2).abs() < 1e-12);
        assert!((capped.y - 1.6).abs() < 1e-12);

        let short = Point::new(0.3, 0.4);
        assert_eq!(clamp_step(short, 2.0), short);
        assert_eq!(clamp_step(Point::new(30.0, 40.0), 0.0), Point::new(30.0, 40.0));
    }
}
