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

//! Entry point: turns a map of per-destination requirement DAGs into the LSAs
//! needed to enforce all of them.
//!
//! Modeled on `GlobalOspfCoordinator::update`'s prepare-then-perform pipeline:
//! each destination is solved independently against its own clone of the IGP
//! graph, and one destination's unsolvable requirement never stops the
//! others from being processed.

pub mod merger;
pub mod simple;

use std::collections::{HashMap, HashSet};

use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::igp::IgpGraph;
use crate::igp::NodeId;
use crate::lsa::Lsa;
use crate::requirement::RequirementDag;

/// Selects which algorithm [`solve`] runs per destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One `Local` override per diverging or ECMP-ambiguous node; see
    /// [`simple`].
    Simple,
    /// Prefers globally-visible phantoms, falling back to `Local` per node
    /// when no feasible cost exists; see [`merger`].
    Merger,
}

/// Solves every destination in `reqs` against `graph`, using `strategy`.
///
/// Destinations are processed in sorted order for determinism. A
/// destination whose requirement DAG is unsolvable (dead end or cycle after
/// completion) is logged and skipped, contributing no LSAs; any other error
/// aborts the whole call.
pub fn solve<N: NodeId>(
    graph: &IgpGraph<N>,
    reqs: &HashMap<N, RequirementDag<N>>,
    strategy: Strategy,
    config: &SolverConfig,
) -> Result<Vec<Lsa<N>>, SolverError<N>> {
    let all_dests: HashSet<N> = reqs.keys().copied().collect();

    let mut dests: Vec<N> = reqs.keys().copied().collect();
    dests.sort();

    let mut lsas = Vec::new();
    for dest in dests {
        let dag = reqs[&dest].clone();
        log::debug!("solving requirement dag for destination {dest:?}");
        let mut dest_lsas = match strategy {
            Strategy::Simple => simple::solve_destination(graph, dest, dag, &all_dests, config)?,
            Strategy::Merger => merger::solve_destination(graph, dest, dag, &all_dests, config)?,
        };
        lsas.append(&mut dest_lsas);
    }
    Ok(lsas)
}
