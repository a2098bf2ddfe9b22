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

//! Requirement DAGs: the desired forwarding behavior for a single destination.
//!
//! A caller only has to specify forwarding for the nodes it cares about; nodes
//! left unconstrained get their IGP-default shortest-path behavior grafted on
//! by [`complete`]. [`ensure_destination`] and [`graft_destination`] handle the
//! common case where the destination itself is a virtual sink not already
//! present as a vertex, mirroring `ssu.add_dest_to_graph`'s two call sites in
//! the original solve loop (once for the requirement dag, once for the IGP
//! graph, with the latter's edges sourced from the dag's predecessors of the
//! destination).

use std::collections::HashSet;

use itertools::Itertools;
use petgraph::graphmap::DiGraphMap;

use crate::igp::{IgpGraph, Metric, NodeId};
use crate::spt::ShortestPaths;

/// A directed acyclic graph describing, for each node, which next hop(s)
/// traffic toward one destination must take.
#[derive(Debug, Clone, Default)]
pub struct RequirementDag<N: NodeId> {
    g: DiGraphMap<N, ()>,
}

impl<N: NodeId> RequirementDag<N> {
    /// An empty requirement DAG.
    pub fn new() -> Self {
        Self { g: DiGraphMap::new() }
    }

    /// Builds a requirement DAG from an edge list, the same shape the
    /// original gadget fixtures are written in.
    pub fn from_edges(edges: impl IntoIterator<Item = (N, N)>) -> Self {
        let mut dag = Self::new();
        for (u, v) in edges {
            dag.add_edge(u, v);
        }
        dag
    }

    /// Records that `u` must forward toward `v`.
    pub fn add_edge(&mut self, u: N, v: N) {
        self.g.add_edge(u, v, ());
    }

    /// Whether `n` appears in the DAG, as a source, target, or isolated node.
    pub fn contains_node(&self, n: N) -> bool {
        self.g.contains_node(n)
    }

    /// All nodes mentioned by the DAG.
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.g.nodes()
    }

    /// The required next hop(s) for `n`, sorted for determinism.
    pub fn successors(&self, n: N) -> Vec<N> {
        self.g.neighbors_directed(n, petgraph::Direction::Outgoing).sorted().collect()
    }

    /// The nodes required to forward toward `n`, sorted for determinism.
    pub fn predecessors(&self, n: N) -> Vec<N> {
        self.g.neighbors_directed(n, petgraph::Direction::Incoming).sorted().collect()
    }

    fn is_sink(&self, n: N) -> bool {
        self.g.neighbors_directed(n, petgraph::Direction::Outgoing).next().is_none()
    }

    /// Nodes of the DAG that currently have no outgoing edge.
    pub fn sinks(&self) -> Vec<N> {
        self.g.nodes().filter(|&n| self.is_sink(n)).sorted().collect()
    }

    /// Reverse topological order (destination first, sources last), or
    /// `None` if the DAG contains a cycle.
    pub fn reverse_topological_order(&self) -> Option<Vec<N>> {
        let mut order = petgraph::algo::toposort(&self.g, None).ok()?;
        order.reverse();
        Some(order)
    }
}

/// Adds `dest` to `dag` if it is not already present, by connecting every
/// current sink to it. A no-op if `dest` is already a vertex.
pub fn ensure_destination<N: NodeId>(dag: &mut RequirementDag<N>, dest: N) {
    if dag.contains_node(dest) {
        return;
    }
    for sink in dag.sinks() {
        dag.add_edge(sink, dest);
    }
}

/// Adds `dest` to `igp` if it is not already present, attaching it to every
/// node the requirement DAG says should forward directly to it, each via a
/// new edge of the given metric. Models a destination that is a prefix
/// announced by those routers rather than a transit router of its own.
pub fn graft_destination<N: NodeId>(
    igp: &mut IgpGraph<N>,
    dest: N,
    dag: &RequirementDag<N>,
    metric: Metric,
) {
    if igp.contains_node(dest) {
        return;
    }
    for pred in dag.predecessors(dest) {
        igp.add_edge(pred, dest, metric);
    }
}

/// Grafts the IGP-default shortest path onto every node of `igp` that `dag`
/// does not already constrain, except `dest` itself and any node in `skip`
/// (the set of all destinations being solved for, so that one destination's
/// completion pass never invents forwarding requirements for another).
pub fn complete<N: NodeId>(
    dag: &mut RequirementDag<N>,
    igp: &IgpGraph<N>,
    dest: N,
    oracle: &ShortestPaths<N>,
    skip: &HashSet<N>,
) {
    let candidates: Vec<N> = igp.nodes().collect();
    for node in candidates {
        if node == dest || dag.contains_node(node) || skip.contains(&node) {
            continue;
        }
        for nh in oracle.next_hops(igp, node) {
            dag.add_edge(node, nh);
        }
    }
}

/// Checks that every node the requirement DAG names (other than `dest`
/// itself) is actually a vertex of the IGP graph, before any completion or
/// grafting happens. A requirement that names an unknown router cannot be
/// satisfied by any solver and is a caller error, not a recoverable one.
pub fn validate_known_nodes<N: NodeId>(
    dag: &RequirementDag<N>,
    graph: &IgpGraph<N>,
    dest: N,
) -> Result<(), crate::error::SolverError<N>> {
    for node in dag.nodes() {
        if node != dest && !graph.contains_node(node) {
            return Err(crate::error::SolverError::UnknownNode { dest, node });
        }
    }
    Ok(())
}

/// Checks that a completed requirement DAG is solvable: every non-destination
/// node has at least one outgoing edge (no dead end), the DAG is acyclic, and
/// every node can actually reach `dest`.
pub fn solvable<N: NodeId>(dag: &RequirementDag<N>, dest: N) -> Result<(), crate::error::SolverError<N>> {
    use crate::error::SolverError;

    for node in dag.nodes() {
        if node != dest && dag.is_sink(node) {
            return Err(SolverError::DeadEnd { dest, node });
        }
    }

    let Some(order) = dag.reverse_topological_order() else {
        return Err(SolverError::NotADag { dest });
    };

    let mut reaches_dest: HashSet<N> = HashSet::new();
    reaches_dest.insert(dest);
    // `order` is dest-first; walking it in forward (source-first) order
    // guarantees every successor of `node` has already been classified.
    for &node in order.iter().rev() {
        if node == dest {
            continue;
        }
        if dag.successors(node).iter().any(|s| reaches_dest.contains(s)) {
            reaches_dest.insert(node);
        }
    }

    if dag.nodes().all(|n| reaches_dest.contains(&n)) {
        Ok(())
    } else {
        Err(SolverError::NotADag { dest })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_destination_connects_all_sinks() {
        let mut dag: RequirementDag<&str> = RequirementDag::from_edges([("a", "b")]);
        ensure_destination(&mut dag, "d");
        assert_eq!(dag.successors("b"), vec!["d"]);
    }

    #[test]
    fn ensure_destination_is_a_noop_when_present() {
        let mut dag: RequirementDag<&str> = RequirementDag::from_edges([("a", "d")]);
        ensure_destination(&mut dag, "d");
        assert_eq!(dag.predecessors("d"), vec!["a"]);
    }

    #[test]
    fn complete_grafts_igp_default_for_unconstrained_nodes() {
        let mut igp: IgpGraph<&str> = IgpGraph::new();
        igp.add_edge("a", "b", 1);
        igp.add_edge("b", "d", 1);
        igp.add_edge("c", "b", 1);
        let oracle = ShortestPaths::compute(&igp, "d");
        let mut dag: RequirementDag<&str> = RequirementDag::new();
        complete(&mut dag, &igp, "d", &oracle, &Default::default());
        assert_eq!(dag.successors("a"), vec!["b"]);
        assert_eq!(dag.successors("b"), vec!["d"]);
        assert_eq!(dag.successors("c"), vec!["b"]);
    }

    #[test]
    fn solvable_rejects_dead_end() {
        let dag: RequirementDag<&str> = RequirementDag::from_edges([("a", "b")]);
        assert!(matches!(
            solvable(&dag, "d"),
            Err(crate::error::SolverError::DeadEnd { node: "b", .. })
        ));
    }

    #[test]
    fn solvable_rejects_cycle() {
        let dag: RequirementDag<&str> = RequirementDag::from_edges([("a", "b"), ("b", "a")]);
        assert!(solvable(&dag, "d").is_err());
    }

    #[test]
    fn solvable_accepts_a_rooted_dag() {
        let dag: RequirementDag<&str> = RequirementDag::from_edges([("a", "b"), ("b", "d")]);
        assert!(solvable(&dag, "d").is_ok());
    }
}
