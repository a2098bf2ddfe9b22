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

//! Configuration records.
//!
//! [`SolverConfig`] is the only configuration [`crate::solver::solve`] actually
//! reads. [`RouterConfig`] and [`IfaceConfig`] are not consumed by the solver
//! at all; they exist so a caller assembling an [`crate::igp::IgpGraph`] from a
//! real topology description has a typed home for the per-router and
//! per-interface fields the original implementation kept in loosely typed
//! attribute dictionaries.

use serde::{Deserialize, Serialize};

use crate::igp::Metric;

/// Tunables for [`crate::solver::solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// The metric used when attaching a destination that is not already a
    /// vertex of the IGP graph to the routers that originate it. Large by
    /// convention, so that it never competes with a real transit link.
    pub new_edge_metric: Metric,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { new_edge_metric: 100_000 }
    }
}

/// Per-router configuration, unused by the solver itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Loopback-style router id, as would be advertised in a real OSPF LSA.
    pub router_id: String,
    /// Prefixes originated directly by this router.
    pub networks: Vec<String>,
    /// This router's interfaces.
    pub interfaces: Vec<IfaceConfig>,
}

/// Per-interface OSPF configuration, unused by the solver itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IfaceConfig {
    /// The interface's OSPF cost, i.e. the IGP edge metric it advertises.
    pub cost: u32,
    /// The OSPF area this interface belongs to.
    pub area: u32,
    /// Hello interval, in seconds.
    pub hello_int: u32,
    /// Router dead interval, in seconds.
    pub dead_int: u32,
}
