//! Shared test utilities for `qembed-core`.

use proptest::{collection::vec, prelude::*, test_runner::Config as ProptestConfig};
use qembed_test_support::ci::property_test_profile::ProptestRunProfile;
use test_strategy::Arbitrary;

use crate::graph::Graph;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROPTEST_CASES` and
/// `QEMBED_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Edge density family for generated graphs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(crate) enum Density {
    /// Up to one edge draw per node.
    Sparse,
    /// Up to three edge draws per node.
    Medium,
    /// Up to eight edge draws per node.
    Dense,
}

impl Density {
    fn edge_factor(self) -> usize {
        match self {
            Self::Sparse => 1,
            Self::Medium => 3,
            Self::Dense => 8,
        }
    }
}

/// Generates graphs of up to `max_nodes` nodes with at least one edge.
///
/// Self-loops drawn by the strategy are skipped rather than rejected so the
/// generated graph always builds.
pub(crate) fn graph_strategy(max_nodes: u32) -> impl Strategy<Value = Graph<u32>> {
    (2..=max_nodes, any::<Density>()).prop_flat_map(|(nodes, density)| {
        let edge_count = (nodes as usize) * density.edge_factor();
        vec((0..nodes, 0..nodes), 1..=edge_count).prop_map(move |pairs| {
            let mut graph = Graph::new();
            for (left, right) in pairs {
                if left != right {
                    let _ = graph.add_edge(left, right);
                }
            }
            if graph.edge_count() == 0 {
                let _ = graph.add_edge(0, nodes - 1);
            }
            graph
        })
    })
}
