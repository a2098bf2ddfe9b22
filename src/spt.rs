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

//! The shortest-path oracle: per-destination distances and ECMP next-hop sets.
//!
//! Rather than tracking the set of equal-cost next hops while a single Dijkstra
//! run unfolds (the way the teacher's `calculate_intra_area_routes` keeps a
//! `fibs: BTreeSet<RouterId>` alongside each heap entry), this runs one plain
//! Dijkstra per destination on the *reversed* graph to get every node's
//! distance to that destination, then derives the equal-cost next-hop set for
//! any node with a local check against its real out-edges. This is simpler to
//! state against the `N*(u,d)` definition directly, and since the solver
//! already iterates destinations one at a time (see [`crate::solver`]), the
//! per-destination cost is the same order as the teacher's per-area routing
//! table build.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::igp::{IgpGraph, Metric, NodeId};

/// Distances to a single destination, plus derived equal-cost next-hop sets.
#[derive(Debug, Clone)]
pub struct ShortestPaths<N: NodeId> {
    dest: N,
    dist: HashMap<N, Metric>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
struct HeapEntry<N> {
    dist: Metric,
    node: N,
}

impl<N: Eq> Ord for HeapEntry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so `BinaryHeap`, a max-heap, pops the smallest distance first.
        other.dist.cmp(&self.dist)
    }
}

impl<N: Eq> PartialOrd for HeapEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: NodeId> ShortestPaths<N> {
    /// Computes every node's distance to `dest` by running Dijkstra on the
    /// reverse of `graph`, rooted at `dest`.
    pub fn compute(graph: &IgpGraph<N>, dest: N) -> Self {
        let mut dist = HashMap::new();
        let mut heap = BinaryHeap::new();
        heap.push(HeapEntry { dist: 0, node: dest });

        while let Some(HeapEntry { dist: d, node: u }) = heap.pop() {
            if dist.contains_key(&u) {
                continue;
            }
            dist.insert(u, d);

            for v in graph.predecessors(u) {
                let Some(w) = graph.metric(v, u) else { continue };
                let cand = d + w;
                if dist.get(&v).map_or(true, |&cur| cand < cur) {
                    heap.push(HeapEntry { dist: cand, node: v });
                }
            }
        }

        Self { dest, dist }
    }

    /// The destination this table was computed for.
    pub fn dest(&self) -> N {
        self.dest
    }

    /// The shortest distance from `u` to the destination, if reachable.
    pub fn dist(&self, u: N) -> Option<Metric> {
        self.dist.get(&u).copied()
    }

    /// `N*(u, dest)`: every neighbor `v` of `u` such that `w(u,v) + dist(v) ==
    /// dist(u)`, i.e. every next hop that lies on some shortest path. Returned
    /// sorted by node label for deterministic iteration.
    pub fn next_hops(&self, graph: &IgpGraph<N>, u: N) -> Vec<N> {
        let Some(du) = self.dist(u) else { return Vec::new() };
        let mut nhs: Vec<N> = graph
            .successors(u)
            .filter(|&v| {
                graph
                    .metric(u, v)
                    .zip(self.dist(v))
                    .is_some_and(|(w, dv)| w + dv == du)
            })
            .collect();
        nhs.sort();
        nhs
    }
}
