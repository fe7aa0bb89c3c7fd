//! Unit tests for the bipartite/OCT decomposition.

use std::collections::BTreeSet;

use rand::{SeedableRng, rngs::SmallRng};
use rstest::{fixture, rstest};
use tracing_subscriber::layer::SubscriberExt;

use qembed_test_support::{graphs, tracing::RecordingLayer};

use crate::{QembedError, graph::Graph};

use super::{
    AttemptReport, DecomposerBuilder, bipartite_subgraph, decompose, is_bipartite_split,
};

#[fixture]
fn rng() -> SmallRng {
    SmallRng::seed_from_u64(42)
}

fn complete_bipartite() -> Graph<u32> {
    let edges = (1..=3).flat_map(|left| (4..=6).map(move |right| (left, right)));
    Graph::from_edges(edges).expect("K3,3 has no self-loops")
}

fn from_edges(edges: Vec<(u32, u32)>) -> Graph<u32> {
    Graph::from_edges(edges).expect("fixture graphs have no self-loops")
}

fn odd_cycle(len: u32) -> Graph<u32> {
    from_edges(graphs::cycle(len))
}

fn complete(len: u32) -> Graph<u32> {
    from_edges(graphs::complete(len))
}

fn petersen() -> Graph<u32> {
    from_edges(graphs::petersen())
}

#[rstest]
fn empty_graph_is_rejected(mut rng: SmallRng) {
    let err = decompose(&Graph::<u32>::new(), true, true, &mut rng)
        .expect_err("empty graph must fail");
    assert_eq!(err, QembedError::EmptyGraph);
}

#[rstest]
fn edgeless_graph_is_rejected(mut rng: SmallRng) {
    let mut graph = Graph::<u32>::new();
    graph.add_node(1);
    graph.add_node(2);
    let err = decompose(&graph, true, false, &mut rng).expect_err("edgeless graph must fail");
    assert_eq!(err, QembedError::EmptyGraph);
}

#[rstest]
fn complete_bipartite_splits_into_its_sides(mut rng: SmallRng) {
    let graph = complete_bipartite();
    let split = decompose(&graph, true, true, &mut rng).expect("decomposition must succeed");

    let mut sides = [split.left().to_vec(), split.right().to_vec()];
    sides.sort();
    assert_eq!(sides, [vec![1, 2, 3], vec![4, 5, 6]]);
    assert_eq!(split.oct(), Some(&[][..]));
    assert_eq!(split.attempts(), 1);
    assert_eq!(split.verified(), Some(true));
}

#[rstest]
#[case::triangle(odd_cycle(3))]
#[case::pentagon(odd_cycle(5))]
#[case::clique(complete(6))]
#[case::petersen(petersen())]
#[case::bipartite(complete_bipartite())]
fn split_partitions_the_node_set(#[case] graph: Graph<u32>, mut rng: SmallRng) {
    let split = decompose(&graph, true, true, &mut rng).expect("decomposition must succeed");
    let oct = split.oct().expect("OCT was requested");

    let left: BTreeSet<u32> = split.left().iter().copied().collect();
    let right: BTreeSet<u32> = split.right().iter().copied().collect();
    let leftover: BTreeSet<u32> = oct.iter().copied().collect();
    assert!(left.is_disjoint(&right));
    assert!(left.is_disjoint(&leftover));
    assert!(right.is_disjoint(&leftover));

    let union: BTreeSet<u32> = left.union(&right).chain(leftover.iter()).copied().collect();
    let nodes: BTreeSet<u32> = graph.nodes().collect();
    assert_eq!(union, nodes);
    assert!(is_bipartite_split(&graph, split.left(), split.right()));
}

#[rstest]
fn odd_cycle_needs_a_transversal(mut rng: SmallRng) {
    let split = decompose(&odd_cycle(7), true, true, &mut rng).expect("decomposition");
    assert!(!split.leftover().is_empty());
}

#[rstest]
fn outputs_are_sorted(mut rng: SmallRng) {
    let split = decompose(&petersen(), true, true, &mut rng).expect("decomposition");
    for set in [split.left(), split.right(), split.leftover()] {
        let mut resorted = set.to_vec();
        resorted.sort_unstable();
        assert_eq!(resorted, set);
    }
}

#[rstest]
fn oct_is_withheld_when_not_requested(mut rng: SmallRng) {
    let split = decompose(&odd_cycle(5), false, true, &mut rng).expect("decomposition");
    assert_eq!(split.oct(), None);
    assert_eq!(
        split.left().len() + split.right().len() + split.leftover().len(),
        5
    );
}

#[rstest]
fn disabled_ensurance_runs_one_unverified_attempt(mut rng: SmallRng) {
    let decomposer = DecomposerBuilder::new()
        .with_ensurance(false)
        .build()
        .expect("valid configuration");
    let mut reports: Vec<AttemptReport> = Vec::new();
    let split = decomposer
        .decompose_observed(&petersen(), &mut rng, |report| reports.push(*report))
        .expect("decomposition");

    assert_eq!(split.attempts(), 1);
    assert_eq!(split.verified(), None);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].attempt, 1);
    assert_eq!(reports[0].budget, 1);
}

#[rstest]
fn observer_sees_every_attempt(mut rng: SmallRng) {
    let decomposer = DecomposerBuilder::new()
        .with_retry_budget(3)
        .build()
        .expect("valid configuration");
    let mut reports = Vec::new();
    let split = decomposer
        .decompose_observed(&complete(4), &mut rng, |report| reports.push(*report))
        .expect("decomposition");

    assert_eq!(reports.len(), split.attempts());
    let last = reports.last().expect("at least one attempt");
    assert_eq!(last.budget, 3);
    assert_eq!(last.left, split.left().len());
    assert_eq!(last.right, split.right().len());
    assert_eq!(last.oct, split.leftover().len());
    assert!(last.bipartite);
}

#[rstest]
fn exhausted_budget_returns_last_unverified_split(mut rng: SmallRng) {
    let decomposer = DecomposerBuilder::new()
        .with_retry_budget(3)
        .build()
        .expect("valid configuration");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let mut reports = Vec::new();
    let split = tracing::subscriber::with_default(subscriber, || {
        decomposer.decompose_with(
            &complete_bipartite(),
            &mut rng,
            |report| reports.push(*report),
            |_, _, _| false,
        )
    })
    .expect("exhaustion is not an error");

    assert_eq!(split.attempts(), 3);
    assert_eq!(split.verified(), Some(false));
    let attempts: Vec<usize> = reports.iter().map(|report| report.attempt).collect();
    assert_eq!(attempts, [1, 2, 3]);
    assert!(reports.iter().all(|report| !report.bipartite && report.budget == 3));
    assert!(layer.has_message(
        tracing::Level::WARN,
        "retry budget exhausted; returning last split"
    ));
}

#[rstest]
fn passing_check_stops_the_retry_loop(mut rng: SmallRng) {
    let decomposer = DecomposerBuilder::new()
        .with_retry_budget(5)
        .build()
        .expect("valid configuration");
    let mut calls = 0;
    let split = decomposer
        .decompose_with(&petersen(), &mut rng, |_| {}, |_, _, _| {
            calls += 1;
            calls == 2
        })
        .expect("decomposition");

    assert_eq!(split.attempts(), 2);
    assert_eq!(split.verified(), Some(true));
}

#[test]
fn zero_retry_budget_is_rejected() {
    let err = DecomposerBuilder::new()
        .with_retry_budget(0)
        .build()
        .expect_err("zero budget must fail");
    assert_eq!(err, QembedError::InvalidRetryBudget);
}

#[test]
fn equal_seeds_reproduce_equal_splits() {
    let graph = petersen();
    let first = decompose(&graph, true, true, &mut SmallRng::seed_from_u64(5)).expect("first");
    let second = decompose(&graph, true, true, &mut SmallRng::seed_from_u64(5)).expect("second");
    assert_eq!(first, second);
}

#[rstest]
#[case::valid(&[1, 2, 3], &[4, 5, 6], true)]
#[case::edge_inside_left(&[1, 4], &[2, 3], false)]
#[case::edge_inside_right(&[1, 2], &[3, 6], false)]
#[case::empty_sides(&[], &[], true)]
fn bipartite_check_detects_internal_edges(
    #[case] left: &[u32],
    #[case] right: &[u32],
    #[case] expected: bool,
) {
    assert_eq!(
        is_bipartite_split(&complete_bipartite(), left, right),
        expected
    );
}

#[rstest]
fn bipartite_subgraph_drops_only_oct_nodes(mut rng: SmallRng) {
    let graph = odd_cycle(5);
    let split = decompose(&graph, true, true, &mut rng).expect("decomposition");
    let subgraph = bipartite_subgraph(&graph, &split);

    assert_eq!(
        subgraph.node_count(),
        split.left().len() + split.right().len()
    );
    assert!(split.leftover().iter().all(|node| !subgraph.contains_node(node)));
    assert!(is_bipartite_split(&subgraph, split.left(), split.right()));
}

#[rstest]
fn decompose_records_tracing_span(mut rng: SmallRng) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, || {
        decompose(&complete_bipartite(), true, true, &mut rng).expect("decomposition");
    });

    let span = layer
        .span("core.decompose")
        .expect("decompose span must be recorded");
    assert_eq!(span.field("nodes"), Some("6"));
    assert_eq!(span.field("edges"), Some("9"));
    assert!(layer.has_message(tracing::Level::INFO, "decomposition complete"));
}
