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

//! Shared gadget topologies and requirement DAGs, transcribed from the
//! reference test fixtures, for use across this crate's own test modules.

#![cfg(test)]

pub mod gadgets {
    use std::collections::HashMap;

    use crate::igp::IgpGraph;
    use crate::requirement::RequirementDag;

    fn bidirectional(g: &mut IgpGraph<&'static str>, a: &'static str, b: &'static str, metric: u64) {
        g.add_edge(a, b, metric);
        g.add_edge(b, a, metric);
    }

    /// `R1 --100-- E1 --10-+`, `R1 --100-- R2 --10-- E2 --10-+`, both `+` at `D`.
    pub fn trapezoid() -> IgpGraph<&'static str> {
        let mut g = IgpGraph::new();
        bidirectional(&mut g, "R1", "E1", 100);
        bidirectional(&mut g, "R1", "R2", 100);
        bidirectional(&mut g, "R2", "E2", 10);
        bidirectional(&mut g, "E1", "D", 10);
        bidirectional(&mut g, "E2", "D", 10);
        g
    }

    /// A -5- Y1 -10- X, A -10- Y2 -15- X, X -50- D, A -25- O, X -30- O, O -10- D.
    pub fn diamond() -> IgpGraph<&'static str> {
        let mut g = IgpGraph::new();
        bidirectional(&mut g, "A", "Y1", 5);
        bidirectional(&mut g, "Y1", "X", 10);
        bidirectional(&mut g, "A", "Y2", 10);
        bidirectional(&mut g, "Y2", "X", 15);
        bidirectional(&mut g, "X", "D", 50);
        bidirectional(&mut g, "A", "O", 25);
        bidirectional(&mut g, "X", "O", 30);
        bidirectional(&mut g, "D", "O", 10);
        g
    }

    /// A square: B1-B2=3, T1-B1=10, T2-T1=10, B2-T1=5, T2-B2=100, D1-B2=100,
    /// D2-B1=100.
    pub fn square() -> IgpGraph<&'static str> {
        let mut g = IgpGraph::new();
        bidirectional(&mut g, "B1", "B2", 3);
        bidirectional(&mut g, "T1", "B1", 10);
        bidirectional(&mut g, "T2", "T1", 10);
        bidirectional(&mut g, "B2", "T1", 5);
        bidirectional(&mut g, "T2", "B2", 100);
        bidirectional(&mut g, "D1", "B2", 100);
        bidirectional(&mut g, "D2", "B1", 100);
        g
    }

    /// The paper gadget: H1/H2/H3 and A1/A2 converging on X and Y.
    pub fn paper_gadget() -> IgpGraph<&'static str> {
        let mut g = IgpGraph::new();
        bidirectional(&mut g, "H1", "A1", 19);
        bidirectional(&mut g, "H1", "X", 10);
        bidirectional(&mut g, "A1", "Y", 2);
        bidirectional(&mut g, "X", "Y", 100);
        bidirectional(&mut g, "X", "H2", 2);
        bidirectional(&mut g, "X", "H3", 2);
        bidirectional(&mut g, "X", "A2", 8);
        bidirectional(&mut g, "H3", "A2", 6);
        bidirectional(&mut g, "H2", "A2", 6);
        bidirectional(&mut g, "Y", "A2", 17);
        g
    }

    /// A triangle with an apex: A-B=4, B-C=2, D-C=2, D-B=2, D-A=2.
    pub fn weird() -> IgpGraph<&'static str> {
        let mut g = IgpGraph::new();
        bidirectional(&mut g, "A", "B", 4);
        bidirectional(&mut g, "B", "C", 2);
        bidirectional(&mut g, "D", "C", 2);
        bidirectional(&mut g, "D", "B", 2);
        bidirectional(&mut g, "D", "A", 2);
        g
    }

    /// Two parallel tracks of routers, D at one end, D1/D2 joined at the other.
    pub fn parallel_tracks() -> IgpGraph<&'static str> {
        let mut g = IgpGraph::new();
        bidirectional(&mut g, "D", "A1", 2);
        bidirectional(&mut g, "D", "A2", 2);
        bidirectional(&mut g, "B2", "A2", 2);
        bidirectional(&mut g, "B1", "A1", 2);
        bidirectional(&mut g, "B1", "C1", 2);
        bidirectional(&mut g, "B2", "C2", 2);
        bidirectional(&mut g, "C2", "D2", 2);
        bidirectional(&mut g, "C1", "D1", 2);
        bidirectional(&mut g, "D2", "D1", 2);
        bidirectional(&mut g, "C2", "C1", 2);
        bidirectional(&mut g, "B2", "B1", 2);
        bidirectional(&mut g, "A2", "A1", 2);
        g
    }

    /// Two diamonds stacked behind a shared apex at D.
    pub fn double_diamond() -> IgpGraph<&'static str> {
        let mut g = IgpGraph::new();
        bidirectional(&mut g, "H1", "D", 19);
        bidirectional(&mut g, "H1", "Y1", 10);
        bidirectional(&mut g, "Y1", "X", 5);
        bidirectional(&mut g, "H1", "Y2", 15);
        bidirectional(&mut g, "Y2", "X", 10);
        bidirectional(&mut g, "A", "H2", 6);
        bidirectional(&mut g, "H2", "X", 2);
        bidirectional(&mut g, "A", "D", 17);
        bidirectional(&mut g, "X", "D", 100);
        g
    }

    /// Every named gadget paired with the requirement DAG(s) exercised against
    /// it, ready to be fed straight into [`crate::solver::solve`].
    pub fn all_scenarios(
    ) -> Vec<(IgpGraph<&'static str>, HashMap<&'static str, RequirementDag<&'static str>>)> {
        let mut scenarios = Vec::new();

        let mut reqs = HashMap::new();
        reqs.insert(
            "1_8",
            RequirementDag::from_edges([("R1", "R2"), ("R2", "E2"), ("E2", "D")]),
        );
        scenarios.push((trapezoid(), reqs));

        let mut reqs = HashMap::new();
        reqs.insert(
            "2_8",
            RequirementDag::from_edges([
                ("R1", "R2"),
                ("R2", "E2"),
                ("E2", "D"),
                ("E1", "D"),
                ("E1", "R1"),
            ]),
        );
        scenarios.push((trapezoid(), reqs));

        let mut reqs = HashMap::new();
        reqs.insert(
            "3_8",
            RequirementDag::from_edges([
                ("A", "Y1"),
                ("A", "Y2"),
                ("Y2", "X"),
                ("Y1", "X"),
                ("X", "D"),
                ("O", "D"),
            ]),
        );
        scenarios.push((diamond(), reqs));

        let mut reqs = HashMap::new();
        reqs.insert(
            "3_8",
            RequirementDag::from_edges([
                ("D2", "B1"),
                ("B1", "T1"),
                ("T1", "T2"),
                ("T2", "B2"),
                ("B2", "D1"),
            ]),
        );
        scenarios.push((square(), reqs));

        let mut reqs = HashMap::new();
        let fwd = RequirementDag::from_edges([
            ("D2", "B1"),
            ("B1", "T1"),
            ("T1", "T2"),
            ("T2", "B2"),
            ("B2", "D1"),
        ]);
        let rev = RequirementDag::from_edges([
            ("D1", "B2"),
            ("B2", "T2"),
            ("T2", "T1"),
            ("T1", "B1"),
            ("B1", "D2"),
        ]);
        reqs.insert("3_8", fwd);
        reqs.insert("8_3", rev);
        scenarios.push((square(), reqs));

        let mut reqs = HashMap::new();
        reqs.insert(
            "3_8",
            RequirementDag::from_edges([
                ("H1", "X"),
                ("H2", "X"),
                ("H3", "X"),
                ("X", "Y"),
                ("A1", "Y"),
                ("A2", "Y"),
            ]),
        );
        scenarios.push((paper_gadget(), reqs));

        let mut reqs = HashMap::new();
        reqs.insert(
            "3_8",
            RequirementDag::from_edges([("D", "C"), ("C", "B"), ("B", "A")]),
        );
        scenarios.push((weird(), reqs));

        let mut reqs = HashMap::new();
        reqs.insert(
            "3_8",
            RequirementDag::from_edges([
                ("A2", "B2"),
                ("B2", "C2"),
                ("C2", "D2"),
                ("D2", "D1"),
                ("D1", "C1"),
                ("C1", "B1"),
                ("B1", "A1"),
                ("A1", "D"),
            ]),
        );
        scenarios.push((parallel_tracks(), reqs));

        let mut reqs = HashMap::new();
        reqs.insert(
            "1_8",
            RequirementDag::from_edges([
                ("H1", "Y1"),
                ("H1", "Y2"),
                ("Y1", "X"),
                ("Y2", "X"),
                ("H2", "X"),
                ("X", "D"),
            ]),
        );
        scenarios.push((double_diamond(), reqs));

        scenarios
    }
}
