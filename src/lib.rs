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

#![deny(missing_docs, missing_debug_implementations)]

//! # fibbing-core
//!
//! Central control over IGP forwarding by computing the minimal set of fake
//! LSAs (Link-State Advertisements) that make an OSPF-style shortest-path
//! computation realize a caller-supplied forwarding DAG, one destination at a
//! time.
//!
//! The caller provides:
//! - An [`igp::IgpGraph`], the real weighted topology.
//! - One [`requirement::RequirementDag`] per destination, naming only the
//!   nodes whose forwarding it actually constrains; every other node keeps
//!   its IGP-default shortest path.
//!
//! and gets back a list of [`lsa::Lsa`] values: either a `Local` override
//! (invisible to every other router's distance computation, and scoped to a
//! single node) or a `Global` phantom advertisement (a fake vertex reachable
//! through exactly one of the originating router's real links, which genuinely
//! changes the distances every router computes).
//!
//! Two solvers are provided, selected via [`solver::Strategy`]:
//! - [`solver::simple`] places one `Local` override per node whose required
//!   and IGP-default next-hop sets disagree at all, a direct port of the
//!   original reference implementation's conservative algorithm.
//! - [`solver::merger`] prefers `Global` phantoms, relying on the fact that a
//!   flooded LSA changes every router's distance computation (not just the
//!   originator's) to let one phantom satisfy several attracted routers at
//!   once.
//!
//! [`validate::check_fwd_dags`] independently re-derives the forwarding that
//! a set of LSAs produces and compares it against the requirement, the same
//! check the reference test suite itself used to confirm a solver's output.
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use fibbing_core::config::SolverConfig;
//! use fibbing_core::igp::IgpGraph;
//! use fibbing_core::requirement::RequirementDag;
//! use fibbing_core::solver::{self, Strategy};
//!
//! let mut topo: IgpGraph<&str> = IgpGraph::new();
//! topo.add_edge("r1", "e1", 100);
//! topo.add_edge("e1", "r1", 100);
//! topo.add_edge("r1", "r2", 100);
//! topo.add_edge("r2", "r1", 100);
//! topo.add_edge("r2", "e2", 10);
//! topo.add_edge("e2", "r2", 10);
//! topo.add_edge("e1", "d", 10);
//! topo.add_edge("d", "e1", 10);
//! topo.add_edge("e2", "d", 10);
//! topo.add_edge("d", "e2", 10);
//!
//! let dag = RequirementDag::from_edges([("r1", "r2"), ("r2", "e2"), ("e2", "d")]);
//! let mut reqs = HashMap::new();
//! reqs.insert("prefix", dag);
//!
//! let lsas = solver::solve(&topo, &reqs, Strategy::Simple, &SolverConfig::default()).unwrap();
//! assert!(!lsas.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod igp;
pub mod lsa;
pub mod requirement;
pub mod solver;
pub mod spt;
#[cfg(test)]
mod test_util;
pub mod validate;
