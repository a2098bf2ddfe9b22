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

//! Independent validation of a solver's output: inject the LSAs into a scratch
//! copy of the topology, recompute shortest paths, and check that every node's
//! realized forwarding matches the requirement DAG.
//!
//! A direct port of `check_fwd_dags`: `Global` LSAs get a phantom vertex and
//! two edges; `Local` LSAs get recorded as a per-`(node, dest)` override list
//! substituted in while walking each node's shortest path.

use std::collections::{HashMap, HashSet};

use crate::config::SolverConfig;
use crate::igp::{IgpGraph, NodeId};
use crate::lsa::Lsa;
use crate::requirement::{self, RequirementDag};
use crate::spt::ShortestPaths;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Aug<N> {
    Real(N),
    Phantom(u64),
}

/// Checks that `lsas`, injected into `graph`, realize every requirement in
/// `reqs`. Returns `true` iff every destination's DAG is enforced exactly:
/// matching successor sets everywhere, and matching predecessor sets at every
/// node that has at least one successor (the destination itself gains new
/// predecessors through the phantoms, which is expected and not a defect).
pub fn check_fwd_dags<N: NodeId>(
    reqs: &HashMap<N, RequirementDag<N>>,
    graph: &IgpGraph<N>,
    lsas: &[Lsa<N>],
    config: &SolverConfig,
) -> bool {
    // A requirement fixture is commonly written without its destination as
    // an explicit vertex (a chain of routers ending at a sink, with the
    // virtual destination left implicit). Graft it on both sides, the same
    // way the solver itself does before processing, so the comparison below
    // has a vertex to compare against.
    let mut topo = graph.clone();
    let mut dags: HashMap<N, RequirementDag<N>> = reqs.clone();
    for (&dest, dag) in dags.iter_mut() {
        requirement::ensure_destination(dag, dest);
        requirement::graft_destination(&mut topo, dest, dag, config.new_edge_metric);
    }

    let mut aug: IgpGraph<Aug<N>> = IgpGraph::new();
    for n in topo.nodes() {
        aug.add_node(Aug::Real(n));
    }
    for (u, v, m) in topo.edges() {
        aug.add_edge(Aug::Real(u), Aug::Real(v), m);
    }

    let mut local_overrides: HashMap<(N, N), Vec<N>> = HashMap::new();
    let mut next_phantom = 0u64;
    for lsa in lsas {
        match *lsa {
            Lsa::Global { node, fwd, cost, dest } => {
                let Some(w1) = topo.metric(node, fwd) else {
                    log::error!("global lsa at {node:?} names a non-edge to {fwd:?}");
                    return false;
                };
                let phantom = Aug::Phantom(next_phantom);
                next_phantom += 1;
                aug.add_edge(Aug::Real(node), phantom, w1);
                aug.add_edge(phantom, Aug::Real(dest), cost - w1);
                log::debug!(
                    "added globally-visible fake node behind {node:?}/{fwd:?} toward {dest:?}, cost {cost}"
                );
            }
            Lsa::Local { node, nh, dest } => {
                local_overrides.entry((node, dest)).or_default().push(nh);
                log::debug!("added locally-visible override {node:?} -> {nh:?}");
            }
        }
    }

    let mut correct = true;
    for (&dest, req_dag) in &dags {
        let oracle = ShortestPaths::compute(&aug, Aug::Real(dest));
        let mut realized: HashMap<N, HashSet<N>> = HashMap::new();

        for node in topo.nodes() {
            if dags.contains_key(&node) {
                continue;
            }
            let Some(overrides) = local_overrides.get(&(node, dest)) else {
                for nh in real_next_hop_after_phantoms(&oracle, &aug, node, dest) {
                    realized.entry(node).or_default().insert(nh);
                }
                continue;
            };
            for &nh in overrides {
                realized.entry(node).or_default().insert(nh);
            }
        }

        for node in req_dag.nodes() {
            let got: HashSet<N> = realized.get(&node).cloned().unwrap_or_default();
            let want: HashSet<N> = req_dag.successors(node).into_iter().collect();
            if got != want {
                log::error!(
                    "successor sets for {node:?} differ toward {dest:?}: required {want:?}, realized {got:?}"
                );
                correct = false;
            }

            if !got.is_empty() {
                let want_pred: HashSet<N> = req_dag.predecessors(node).into_iter().collect();
                let got_pred: HashSet<N> = topo
                    .nodes()
                    .filter(|&p| realized.get(&p).is_some_and(|s| s.contains(&node)))
                    .collect();
                if got_pred != want_pred {
                    log::error!(
                        "predecessor sets for {node:?} differ toward {dest:?}: required {want_pred:?}, realized {got_pred:?}"
                    );
                    correct = false;
                }
            }
        }
    }

    if correct {
        log::info!("all forwarding requirements are enforced");
    }
    correct
}

/// The real next hop(s) `node`'s shortest path toward `dest` resolves to,
/// after substituting any globally-visible phantom transited along the way
/// with the real neighbor it is attached behind.
fn real_next_hop_after_phantoms<N: NodeId>(
    oracle: &ShortestPaths<Aug<N>>,
    aug: &IgpGraph<Aug<N>>,
    node: N,
    dest: N,
) -> Vec<N> {
    oracle
        .next_hops(aug, Aug::Real(node))
        .into_iter()
        .filter_map(|hop| match hop {
            Aug::Real(n) => Some(n),
            // A direct phantom successor can only occur if `node` itself
            // originated it, in which case its real next hop is whatever
            // `node` forwards to behind the phantom: itself, by construction
            // a dead end here, since the phantom is injected as an edge from
            // `node`, not traversed by `node`'s own path. This never arises
            // in a well-formed lsa set because a node never requires
            // forwarding through its own fake advertisement.
            Aug::Phantom(_) => {
                log::warn!("{node:?} resolves directly to a phantom while routing to {dest:?}");
                None
            }
        })
        .collect()
}
