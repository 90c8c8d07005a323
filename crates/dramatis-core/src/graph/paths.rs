//! Breadth-first shortest paths and shortest-path counting.
//!
//! # Overview
//!
//! Path length is the hop count: every edge has distance 1 regardless of its
//! interaction weight. [`ShortestPathIndex`] records, for one source, the
//! distance to every node and *every* predecessor that lies on some shortest
//! path into it. Those predecessor lists form a DAG rooted at the source.
//!
//! [`PathCounter`] counts shortest paths by walking that DAG backwards with
//! an explicit stack and a per-node memo, so long predecessor chains never
//! recurse. [`path_counts`] computes the same numbers for all targets in one
//! forward pass over BFS order, which is what Brandes' betweenness uses.

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;

use crate::graph::weighted::WeightedGraph;

// ---------------------------------------------------------------------------
// ShortestPathIndex
// ---------------------------------------------------------------------------

/// Single-source BFS result with all shortest-path predecessors.
#[derive(Debug, Clone)]
pub struct ShortestPathIndex {
    source: NodeIndex,
    /// `distance[v]`: hop count from the source, `None` if unreachable.
    distance: Vec<Option<usize>>,
    /// `predecessors[v]`: every `u` adjacent to `v` with `distance[u] + 1 == distance[v]`.
    predecessors: Vec<Vec<NodeIndex>>,
    /// Reachable nodes in BFS discovery order (non-decreasing distance).
    order: Vec<NodeIndex>,
}

impl ShortestPathIndex {
    /// Run a BFS from `source`.
    ///
    /// # Panics
    ///
    /// Panics if `source` does not belong to `graph`.
    #[must_use]
    pub fn from_source(graph: &WeightedGraph, source: NodeIndex) -> Self {
        let n = graph.node_count();
        let mut distance: Vec<Option<usize>> = vec![None; n];
        let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];
        let mut order: Vec<NodeIndex> = Vec::with_capacity(n);

        distance[source.index()] = Some(0);
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            order.push(v);
            let Some(dv) = distance[v.index()] else {
                continue;
            };

            for w in graph.neighbor_indices(v) {
                let wi = w.index();
                match distance[wi] {
                    None => {
                        distance[wi] = Some(dv + 1);
                        predecessors[wi].push(v);
                        queue.push_back(w);
                    }
                    Some(dw) if dw == dv + 1 => predecessors[wi].push(v),
                    Some(_) => {}
                }
            }
        }

        Self {
            source,
            distance,
            predecessors,
            order,
        }
    }

    /// Run a BFS from the node with id `source`, or `None` if it is unknown.
    #[must_use]
    pub fn from_id(graph: &WeightedGraph, source: &str) -> Option<Self> {
        graph
            .index_of(source)
            .map(|idx| Self::from_source(graph, idx))
    }

    /// The BFS root.
    #[must_use]
    pub const fn source(&self) -> NodeIndex {
        self.source
    }

    /// Hop distance from the source, `None` if unreachable.
    #[must_use]
    pub fn distance(&self, v: NodeIndex) -> Option<usize> {
        self.distance.get(v.index()).copied().flatten()
    }

    /// All shortest-path predecessors of `v`.
    #[must_use]
    pub fn predecessors(&self, v: NodeIndex) -> &[NodeIndex] {
        self.predecessors
            .get(v.index())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Reachable nodes in BFS order, the source first.
    #[must_use]
    pub fn order(&self) -> &[NodeIndex] {
        &self.order
    }

    /// Sum of finite distances to every reachable node.
    #[must_use]
    pub fn distance_sum(&self) -> usize {
        self.distance.iter().flatten().sum()
    }

    /// Whether `v` lies on some shortest path from the source to `target`,
    /// given a BFS index rooted at `v`.
    #[must_use]
    pub fn is_on_shortest_path(&self, from_v: &Self, target: NodeIndex) -> bool {
        match (
            self.distance(from_v.source),
            from_v.distance(target),
            self.distance(target),
        ) {
            (Some(d_sv), Some(d_vt), Some(d_st)) => d_sv + d_vt == d_st,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// PathCounter
// ---------------------------------------------------------------------------

/// Memoized shortest-path counter over one [`ShortestPathIndex`].
///
/// The memo is shared across queries, so counting paths to many targets
/// from the same source touches each predecessor edge at most once.
#[derive(Debug)]
pub struct PathCounter<'a> {
    index: &'a ShortestPathIndex,
    memo: Vec<Option<u64>>,
}

impl<'a> PathCounter<'a> {
    /// Create a counter for the source of `index`.
    #[must_use]
    pub fn new(index: &'a ShortestPathIndex) -> Self {
        Self {
            index,
            memo: vec![None; index.distance.len()],
        }
    }

    /// Number of distinct shortest paths from the source to `target`.
    ///
    /// Returns 1 for the source itself and 0 for unreachable targets.
    /// Counts saturate at `u64::MAX`.
    pub fn count_paths(&mut self, target: NodeIndex) -> u64 {
        let index = self.index;
        if index.distance(target).is_none() {
            return 0;
        }

        // Post-order walk of the predecessor DAG: a node is summed only after
        // every predecessor has a memo entry.
        let mut stack: Vec<(NodeIndex, bool)> = vec![(target, false)];
        while let Some((v, expanded)) = stack.pop() {
            let vi = v.index();
            if self.memo[vi].is_some() {
                continue;
            }
            if v == index.source {
                self.memo[vi] = Some(1);
                continue;
            }

            let preds = index.predecessors(v);
            if expanded {
                let total = preds
                    .iter()
                    .map(|p| self.memo[p.index()].unwrap_or(0))
                    .fold(0_u64, u64::saturating_add);
                self.memo[vi] = Some(total);
            } else {
                stack.push((v, true));
                stack.extend(
                    preds
                        .iter()
                        .filter(|p| self.memo[p.index()].is_none())
                        .map(|&p| (p, false)),
                );
            }
        }

        self.memo[target.index()].unwrap_or(0)
    }
}

/// Number of shortest `source → target` paths that pass through
/// `intermediate`, where `source` is the root of `from_source`.
///
/// Runs a second BFS rooted at `intermediate`. Returns
/// `paths(source, intermediate) * paths(intermediate, target)` when
/// `intermediate` lies on a shortest `source → target` path, otherwise 0.
/// This is the quadratic-per-query definition; [`path_counts`] plus
/// Brandes' accumulation is the fast path for whole-graph betweenness.
#[must_use]
pub fn count_paths_through(
    graph: &WeightedGraph,
    from_source: &ShortestPathIndex,
    target: NodeIndex,
    intermediate: NodeIndex,
) -> u64 {
    let from_intermediate = ShortestPathIndex::from_source(graph, intermediate);
    if !from_source.is_on_shortest_path(&from_intermediate, target) {
        return 0;
    }

    let first_leg = PathCounter::new(from_source).count_paths(intermediate);
    let second_leg = PathCounter::new(&from_intermediate).count_paths(target);
    first_leg.saturating_mul(second_leg)
}

/// Shortest-path counts from the source to every node (`sigma` in Brandes'
/// notation), computed in one pass over BFS order.
///
/// Unreachable nodes get 0. Counts are `f64` because they grow
/// exponentially on lattice-like graphs.
#[must_use]
pub fn path_counts(index: &ShortestPathIndex) -> Vec<f64> {
    let mut sigma = vec![0.0_f64; index.distance.len()];
    sigma[index.source.index()] = 1.0;

    for &v in index.order().iter().skip(1) {
        sigma[v.index()] = index
            .predecessors(v)
            .iter()
            .map(|p| sigma[p.index()])
            .sum();
    }

    sigma
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
