// fibbing-core: a requirement-to-LSA solver for central control over IGP forwarding
// Copyright 2024 fibbing-core contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The IGP graph: a weighted, directed multigraph over opaque router/destination
//! labels.
//!
//! Parallel edges are collapsed to a single slot holding every metric seen between
//! the two endpoints; anything that reads a single edge weight takes the minimum,
//! matching the requirement that the shortest-path oracle use the cheapest of any
//! parallel links.

use std::fmt::Debug;
use std::hash::Hash;

use petgraph::graphmap::DiGraphMap;

/// A node label: the only operations the core ever performs on a router or
/// destination identifier are equality, hashing, and ordering (the last needed
/// purely for deterministic output, see the tie-break design note).
pub trait NodeId: Copy + Eq + Hash + Ord + Debug {}
impl<T> NodeId for T where T: Copy + Eq + Hash + Ord + Debug {}

/// Link metric. Always strictly positive for real edges; see [`IgpGraph::add_edge`].
pub type Metric = u64;

/// A weighted directed multigraph over router/destination labels `N`.
///
/// Backed by [`petgraph::graphmap::DiGraphMap`], the same way the teacher's
/// `OspfDomain` keeps its link table as a plain map rather than an index-based
/// graph: node identity here is the label itself, not an opaque arena index.
#[derive(Debug, Clone, Default)]
pub struct IgpGraph<N: NodeId> {
    g: DiGraphMap<N, Vec<Metric>>,
}

impl<N: NodeId> IgpGraph<N> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self { g: DiGraphMap::new() }
    }

    /// Returns the nodes of the graph in arbitrary order.
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.g.nodes()
    }

    /// Returns whether `n` is known to the graph, as a source, target, or
    /// isolated vertex.
    pub fn contains_node(&self, n: N) -> bool {
        self.g.contains_node(n)
    }

    /// Adds an isolated node if not already present; a no-op otherwise.
    pub fn add_node(&mut self, n: N) {
        self.g.add_node(n);
    }

    /// Adds a directed edge `u -> v` with the given metric. If an edge already
    /// exists between `u` and `v`, the new metric is recorded alongside it as a
    /// parallel link rather than overwriting it.
    ///
    /// `metric` must be strictly positive; callers that cannot guarantee this
    /// (e.g. deserializing an externally supplied topology) should validate
    /// before calling.
    pub fn add_edge(&mut self, u: N, v: N, metric: Metric) {
        if let Some(metrics) = self.g.edge_weight_mut(u, v) {
            metrics.push(metric);
        } else {
            self.g.add_edge(u, v, vec![metric]);
        }
    }

    /// Removes every parallel edge between `u` and `v`.
    pub fn remove_edge(&mut self, u: N, v: N) {
        self.g.remove_edge(u, v);
    }

    /// The metric of `u -> v`, i.e. the minimum over any parallel links, or
    /// `None` if no such edge exists.
    pub fn metric(&self, u: N, v: N) -> Option<Metric> {
        self.g.edge_weight(u, v).and_then(|ms| ms.iter().copied().min())
    }

    /// All out-neighbors of `u`.
    pub fn successors(&self, u: N) -> impl Iterator<Item = N> + '_ {
        self.g.neighbors_directed(u, petgraph::Direction::Outgoing)
    }

    /// All in-neighbors of `u`.
    pub fn predecessors(&self, u: N) -> impl Iterator<Item = N> + '_ {
        self.g.neighbors_directed(u, petgraph::Direction::Incoming)
    }

    /// All edges `(u, v, metric)`, one entry per parallel link.
    pub fn edges(&self) -> impl Iterator<Item = (N, N, Metric)> + '_ {
        self.g.all_edges().flat_map(|(u, v, ms)| ms.iter().map(move |m| (u, v, *m)))
    }

    /// A deep, independent copy, used by the validation harness to augment a
    /// scratch copy of the topology without touching the caller's graph.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Number of vertices.
    pub fn node_count(&self) -> usize {
        self.g.node_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_edges_collapse_to_minimum_metric() {
        let mut g: IgpGraph<&str> = IgpGraph::new();
        g.add_edge("a", "b", 10);
        g.add_edge("a", "b", 4);
        g.add_edge("a", "b", 7);
        assert_eq!(g.metric("a", "b"), Some(4));
        assert_eq!(g.successors("a").collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn missing_edge_has_no_metric() {
        let g: IgpGraph<&str> = IgpGraph::new();
        assert_eq!(g.metric("a", "b"), None);
    }

    #[test]
    fn copy_is_independent() {
        let mut g: IgpGraph<&str> = IgpGraph::new();
        g.add_edge("a", "b", 1);
        let mut c = g.copy();
        c.add_edge("b", "a", 1);
        assert_eq!(g.metric("b", "a"), None);
        assert_eq!(c.metric("b", "a"), Some(1));
    }

    #[test]
    fn predecessors_and_successors() {
        let mut g: IgpGraph<&str> = IgpGraph::new();
        g.add_edge("a", "b", 1);
        g.add_edge("c", "b", 1);
        let mut preds: Vec<_> = g.predecessors("b").collect();
        preds.sort();
        assert_eq!(preds, vec!["a", "c"]);
    }
}
