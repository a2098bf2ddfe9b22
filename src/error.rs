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

//! Errors produced while solving or validating a set of requirement DAGs.

use std::fmt::Debug;

use crate::igp::NodeId;

/// Everything that can go wrong turning a requirement DAG into a set of LSAs.
///
/// Generic over the node label `N` so callers see the offending router or
/// destination directly rather than through an opaque index.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SolverError<N: NodeId> {
    /// A node in the requirement DAG has no outgoing edge and is not the
    /// destination itself: the DAG has a dead end.
    #[error("requirement dag for destination {dest:?} has a dead end at {node:?}")]
    DeadEnd {
        /// The destination whose requirement DAG is malformed.
        dest: N,
        /// The node with no path toward `dest`.
        node: N,
    },

    /// The completed requirement DAG is not rooted at the destination, or
    /// contains a cycle.
    #[error("requirement dag for destination {dest:?} is not a valid dag (not rooted, or cyclic)")]
    NotADag {
        /// The destination whose requirement DAG is malformed.
        dest: N,
    },

    /// A node referenced by a requirement DAG does not exist in the IGP
    /// graph.
    #[error("node {node:?} referenced by the requirement dag for {dest:?} is not in the igp graph")]
    UnknownNode {
        /// The destination whose requirement DAG references the node.
        dest: N,
        /// The unknown node.
        node: N,
    },

    /// No positive phantom cost satisfies the strict-inequality constraint
    /// for a `Global` LSA; the per-node classification fell through and the
    /// merger should have substituted a `Local` LSA instead of propagating
    /// this error. Seeing it escape `solve` indicates an internal bug.
    #[error("no feasible phantom cost for node {node:?}, destination {dest:?}")]
    Infeasible {
        /// The node for which the cost computation failed.
        node: N,
        /// The destination being solved for.
        dest: N,
    },

    /// The shortest-path oracle found no path from `node` to `dest` at all,
    /// even though the requirement DAG demands one. This means the IGP graph
    /// itself is disconnected for this destination.
    #[error("no igp path from {node:?} to {dest:?}")]
    NoPath {
        /// The origin node.
        node: N,
        /// The destination.
        dest: N,
    },
}
