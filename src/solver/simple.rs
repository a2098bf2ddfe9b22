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

//! The `Simple` solver: one `Local` LSA per node whose required next-hop set
//! diverges from the IGP default.
//!
//! A direct port of `OSPFSimple.solve`'s inner loop: for every node other
//! than the destination, processed in reverse topological order, a fake node
//! is placed whenever the required next-hop set has more than one member,
//! the IGP-default next-hop set has more than one member, or the two sets
//! differ at all. This is deliberately conservative: unlike the `Merger`
//! solver it never tries to reuse the IGP's own ECMP behavior, so it can
//! place a `Local` override at a node whose default forwarding already
//! happens to match the requirement, as long as either set isn't a lone
//! element.

use std::collections::HashSet;

use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::igp::{IgpGraph, NodeId};
use crate::lsa::Lsa;
use crate::requirement::{self, RequirementDag};
use crate::spt::ShortestPaths;

/// Whether `node` needs a fake node placed, given its required and
/// IGP-default next-hop sets.
fn require_fake_node<N: NodeId>(req_nhs: &[N], original_nhs: &[N]) -> bool {
    req_nhs.len() > 1
        || original_nhs.len() > 1
        || req_nhs.iter().collect::<HashSet<_>>() != original_nhs.iter().collect::<HashSet<_>>()
}

/// Solves a single destination's requirement DAG against `graph`, returning
/// the `Local` LSAs needed to enforce it.
///
/// `dag` is taken by value since it is completed with IGP-default behavior
/// and possibly extended with an edge to `dest`, neither of which the caller
/// should see reflected in its own copy.
pub fn solve_destination<N: NodeId>(
    graph: &IgpGraph<N>,
    dest: N,
    mut dag: RequirementDag<N>,
    all_dests: &HashSet<N>,
    config: &SolverConfig,
) -> Result<Vec<Lsa<N>>, SolverError<N>> {
    requirement::validate_known_nodes(&dag, graph, dest)?;
    requirement::ensure_destination(&mut dag, dest);

    let mut graph = graph.clone();
    requirement::graft_destination(&mut graph, dest, &dag, config.new_edge_metric);

    let oracle = ShortestPaths::compute(&graph, dest);
    requirement::complete(&mut dag, &graph, dest, &oracle, all_dests);

    if let Err(e) = requirement::solvable(&dag, dest) {
        log::warn!("skipping requirement for destination {dest:?}: {e}");
        return Ok(Vec::new());
    }

    let order = dag
        .reverse_topological_order()
        .ok_or(SolverError::NotADag { dest })?;

    let mut lsas = Vec::new();
    for node in order.into_iter().skip(1) {
        let req_nhs = dag.successors(node);
        let original_nhs = oracle.next_hops(&graph, node);
        if !require_fake_node(&req_nhs, &original_nhs) {
            log::debug!(
                "{node:?} does not require a fake node ({req_nhs:?} - {original_nhs:?})"
            );
            continue;
        }
        for nh in req_nhs {
            log::debug!("placing a fake node at {node:?} for next hop {nh:?}");
            lsas.push(Lsa::Local { node, nh, dest });
        }
    }
    Ok(lsas)
}
