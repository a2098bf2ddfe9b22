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

//! The `Merger` solver: classify each node, prefer a globally-visible phantom
//! over a per-node override, and let the flooding nature of a `Global` LSA
//! merge several attracted nodes onto one advertisement for free.
//!
//! Rather than literally combining several `Lsa::Global` records into one (the
//! struct only ever names a single originating node, matching how a real OSPF
//! router can only attach a phantom behind one of its own links), merging
//! here falls out of processing nodes in reverse topological order against an
//! *incrementally updated* distance table: once a phantom is injected on
//! behalf of one node, every node still to be classified sees the new,
//! shorter distance through it, and if that alone already satisfies a later
//! node's requirement it needs no LSA of its own. The distance table is kept
//! current by maintaining a small internal graph, `Aug<N>`, that mirrors the
//! real topology plus one extra vertex per phantom injected so far; this
//! plays the same role as `check_fwd_dags`' scratch copy of the topology, just
//! kept around for the whole solve instead of built once at validation time.
//!
//! A node whose requirement has more than one next hop (an ECMP split) is not
//! special-cased into an automatic `Local` fallback: each next hop not
//! already part of the node's current default is still offered a `Global`
//! placement, just constrained so every fresh next hop lands on the same
//! advertised cost as the others (and, if part of the requirement is already
//! satisfied by the default, on that exact cost) — otherwise the result
//! wouldn't be a tied ECMP set at all. Only once that joint placement is
//! infeasible does the whole node fall back to one `Local` override per
//! required next hop.

use std::collections::HashSet;

use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::igp::{IgpGraph, Metric, NodeId};
use crate::lsa::Lsa;
use crate::requirement::{self, RequirementDag};
use crate::spt::ShortestPaths;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Aug<N> {
    Real(N),
    Phantom(u64),
}

fn augment<N: NodeId>(graph: &IgpGraph<N>) -> IgpGraph<Aug<N>> {
    let mut g = IgpGraph::new();
    for n in graph.nodes() {
        g.add_node(Aug::Real(n));
    }
    for (u, v, m) in graph.edges() {
        g.add_edge(Aug::Real(u), Aug::Real(v), m);
    }
    g
}

fn real_next_hops<N: NodeId>(
    oracle: &ShortestPaths<Aug<N>>,
    aug: &IgpGraph<Aug<N>>,
    node: N,
) -> Vec<N> {
    oracle
        .next_hops(aug, Aug::Real(node))
        .into_iter()
        .filter_map(|a| match a {
            Aug::Real(n) => Some(n),
            Aug::Phantom(_) => None,
        })
        .collect()
}

/// Whether `small` is a strict subset of `big` (both assumed sorted).
fn strict_subset<N: NodeId>(small: &[N], big: &[N]) -> bool {
    small.len() < big.len() && small.iter().all(|n| big.contains(n))
}

/// Solves a single destination's requirement DAG against `graph`, returning
/// the LSAs (a mix of `Global` and `Local`) needed to enforce it.
pub fn solve_destination<N: NodeId>(
    graph: &IgpGraph<N>,
    dest: N,
    mut dag: RequirementDag<N>,
    all_dests: &HashSet<N>,
    config: &SolverConfig,
) -> Result<Vec<Lsa<N>>, SolverError<N>> {
    requirement::validate_known_nodes(&dag, graph, dest)?;
    requirement::ensure_destination(&mut dag, dest);

    let mut real_graph = graph.clone();
    requirement::graft_destination(&mut real_graph, dest, &dag, config.new_edge_metric);

    let base_oracle = ShortestPaths::compute(&real_graph, dest);
    requirement::complete(&mut dag, &real_graph, dest, &base_oracle, all_dests);

    if let Err(e) = requirement::solvable(&dag, dest) {
        log::warn!("skipping requirement for destination {dest:?}: {e}");
        return Ok(Vec::new());
    }

    let order = dag
        .reverse_topological_order()
        .ok_or(SolverError::NotADag { dest })?;

    let mut aug = augment(&real_graph);
    let mut oracle = ShortestPaths::compute(&aug, Aug::Real(dest));
    let mut next_phantom = 0u64;
    let mut lsas = Vec::new();

    for node in order.into_iter().skip(1) {
        let req = dag.successors(node);
        let orig = real_next_hops(&oracle, &aug, node);

        if req == orig {
            log::debug!("{node:?} is unchanged toward {dest:?} ({req:?})");
            continue;
        }

        if strict_subset(&req, &orig) {
            log::debug!(
                "{node:?} requires restricting ecmp from {orig:?} down to {req:?}"
            );
            for nh in req {
                lsas.push(Lsa::Local { node, nh, dest });
            }
            continue;
        }

        // Divert: at least one required next hop isn't part of the current
        // default. `kept` is the part of `req` the IGP already gives us for
        // free; `fresh` is what still needs attracting. A node can only carry
        // explicit overrides for a destination as an all-or-nothing FIB
        // entry, so if any member of `fresh` can't be attracted with a
        // `Global` phantom, every member of `req` — `kept` included — falls
        // back to `Local`, otherwise the untouched members would silently
        // drop out of the realized next-hop set.
        let kept: Vec<N> = req.iter().copied().filter(|n| orig.contains(n)).collect();
        let fresh: Vec<N> = req.iter().copied().filter(|n| !orig.contains(n)).collect();

        // When something is already kept, every fresh next hop must tie
        // exactly at `node`'s current distance, since ECMP means every
        // member of the next-hop set is equally optimal. When nothing is
        // kept, all of `fresh` instead needs to beat the best real
        // alternative outside `req`, and must land on a shared cost so none
        // of them outranks the others.
        let tie_to = if kept.is_empty() {
            None
        } else {
            oracle.dist(Aug::Real(node))
        };

        match shared_global_target(&real_graph, &oracle, node, &fresh, &req, tie_to) {
            Some(cost) => {
                log::debug!(
                    "attracting {node:?} toward {dest:?} via {fresh:?}, shared cost {cost}"
                );
                for &nh in &fresh {
                    lsas.push(Lsa::Global { node, fwd: nh, cost, dest });
                    let w1 = real_graph
                        .metric(node, nh)
                        .expect("fresh only contains neighbors with a real edge");
                    let phantom = Aug::Phantom(next_phantom);
                    next_phantom += 1;
                    aug.add_edge(Aug::Real(node), phantom, w1);
                    aug.add_edge(phantom, Aug::Real(dest), cost - w1);
                }
                oracle = ShortestPaths::compute(&aug, Aug::Real(dest));
            }
            None => {
                log::debug!(
                    "no shared phantom cost ties {fresh:?} in at {node:?}; \
                     falling back to local overrides for all of {req:?}"
                );
                for nh in req {
                    lsas.push(Lsa::Local { node, nh, dest });
                }
            }
        }
    }
    Ok(lsas)
}

/// Computes a single phantom cost under which every next hop in `fresh`
/// becomes part of `node`'s next-hop set toward `dest`, or `None` if no such
/// cost exists (in which case the caller should fall back to `Local`
/// overrides for the whole requirement).
///
/// `tie_to`, when given, is the cost every member of `fresh` must match
/// exactly (because some other next hop already achieves it and all of
/// `req` must stay equally optimal for ECMP). Without it, every member of
/// `fresh` must instead beat `m`, the cheapest real alternative outside
/// `req`; the shared target is pushed as close to `m` as possible (one below
/// it) so the phantom attracts only `node` and not some cheaper-placed
/// spectator elsewhere in the network.
fn shared_global_target<N: NodeId>(
    real_graph: &IgpGraph<N>,
    oracle: &ShortestPaths<Aug<N>>,
    node: N,
    fresh: &[N],
    req: &[N],
    tie_to: Option<Metric>,
) -> Option<Metric> {
    let honest: Vec<Metric> = fresh
        .iter()
        .map(|&nh| {
            let w1 = real_graph.metric(node, nh)?;
            let delta_fwd = oracle.dist(Aug::Real(nh))?;
            Some(w1 + delta_fwd)
        })
        .collect::<Option<Vec<_>>>()?;
    let honest_max = *honest.iter().max()?;

    match tie_to {
        Some(target) => (target > honest_max).then_some(target),
        None => {
            let m = real_graph
                .successors(node)
                .filter(|v| !req.contains(v))
                .filter_map(|v| {
                    real_graph
                        .metric(node, v)
                        .zip(oracle.dist(Aug::Real(v)))
                        .map(|(w, d)| w + d)
                })
                .min();

            match m {
                None => Some(honest_max + 1),
                Some(m) if honest_max + 1 < m => Some(m - 1),
                Some(_) => None,
            }
        }
    }
}
