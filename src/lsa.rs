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

//! Fake LSAs: the output of a solver.
//!
//! A `Local` LSA is a pure FIB override at a single node, invisible to every
//! other node's distance computation (its cost is a sentinel, never flooded).
//! A `Global` LSA injects a phantom vertex reachable from exactly one real
//! edge of `node`, genuinely changing the distances every node in the area
//! computes.

use crate::igp::{Metric, NodeId};

/// A single fake LSA to be injected into the IGP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(bound(
    serialize = "N: serde::Serialize",
    deserialize = "N: for<'a> serde::Deserialize<'a>"
))]
pub enum Lsa<N: NodeId> {
    /// A local FIB override: at `node`, traffic toward `dest` is forwarded to
    /// `nh` regardless of what the real SPF computation would pick. Does not
    /// change `node`'s advertised distance to `dest`.
    Local {
        /// The node whose FIB is overridden.
        node: N,
        /// The forced next hop.
        nh: N,
        /// The destination this override applies to.
        dest: N,
    },
    /// A globally-visible fake node advertised by `node`: a phantom vertex
    /// reachable only via `node`'s real edge to `fwd`, with total advertised
    /// cost `cost` toward `dest`. Changes every node's SPF distance to
    /// `dest` whenever a shortest path would route through the phantom.
    Global {
        /// The node originating the fake advertisement.
        node: N,
        /// The real neighbor the phantom vertex is attached behind.
        fwd: N,
        /// The total cost from `node` to `dest` via the phantom vertex.
        cost: Metric,
        /// The destination this advertisement attracts traffic toward.
        dest: N,
    },
}

impl<N: NodeId> Lsa<N> {
    /// The destination this LSA was issued for.
    pub fn dest(&self) -> N {
        match *self {
            Lsa::Local { dest, .. } | Lsa::Global { dest, .. } => dest,
        }
    }

    /// The node originating this LSA.
    pub fn node(&self) -> N {
        match *self {
            Lsa::Local { node, .. } | Lsa::Global { node, .. } => node,
        }
    }

    /// Whether this is a `Local` override.
    pub fn is_local(&self) -> bool {
        matches!(self, Lsa::Local { .. })
    }
}
