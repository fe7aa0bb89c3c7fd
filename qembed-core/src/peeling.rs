//! Greedy minimum-degree peeling for maximal independent sets.
//!
//! Each iteration selects a node of minimum degree (ties broken uniformly at
//! random), appends it to the result, and strips it together with its
//! neighbourhood from a private working copy of the graph. Removals go
//! through [`Graph::remove_node_preserving_ghosts`], so a node whose last
//! neighbour disappears stays behind as an isolated ghost and is picked up as
//! a degree-zero selection later instead of vanishing.
//!
//! Every iteration removes the selected node, so the loop finishes after at
//! most `|V|` iterations.

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};
use tracing::{debug, trace};

use crate::graph::{Graph, NodeId};

/// Seed used when callers do not provide their own random source.
pub const DEFAULT_RNG_SEED: u64 = 0x5EED_CAFE;

/// Extracts a maximal independent set by greedy minimum-degree peeling.
///
/// `graph` is consumed as the working copy; callers that need to keep their
/// instance pass a clone. The result lists nodes in selection order and
/// covers every input node either directly or through a selected neighbour.
///
/// # Examples
/// ```
/// use qembed_core::{Graph, independent_set};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let graph = Graph::from_edges([(1_u32, 2), (1, 3), (2, 4)]).expect("valid");
/// let mut rng = SmallRng::seed_from_u64(7);
/// let selected = independent_set(graph.clone(), &mut rng);
/// for (index, left) in selected.iter().enumerate() {
///     for right in &selected[index + 1..] {
///         assert!(!graph.has_edge(left, right));
///     }
/// }
/// ```
pub fn independent_set<N, R>(mut graph: Graph<N>, rng: &mut R) -> Vec<N>
where
    N: NodeId,
    R: Rng + ?Sized,
{
    let node_count = graph.node_count();
    let mut selected = Vec::new();
    let mut iterations = 0_usize;

    while let Some(chosen) = pick_min_degree(&graph, rng) {
        iterations += 1;
        let neighbourhood: Vec<N> = graph.neighbors(&chosen).collect();
        let ghosts = graph.remove_node_preserving_ghosts(&chosen);
        trace!(
            node = ?chosen,
            degree = neighbourhood.len(),
            ghosts = ghosts.len(),
            "selected minimum-degree node"
        );
        for neighbour in &neighbourhood {
            graph.remove_node_preserving_ghosts(neighbour);
        }
        selected.push(chosen);
    }

    #[cfg(feature = "metrics")]
    metrics::histogram!("qembed_peel_iterations")
        .record(f64::from(u32::try_from(iterations).unwrap_or(u32::MAX)));

    debug!(
        nodes = node_count,
        selected = selected.len(),
        iterations,
        "peeling pass complete"
    );
    selected
}

/// Runs [`independent_set`] with a [`SmallRng`] seeded from `seed`.
///
/// Equal seeds on equal graphs yield equal results.
#[must_use]
pub fn independent_set_seeded<N: NodeId>(graph: Graph<N>, seed: u64) -> Vec<N> {
    let mut rng = SmallRng::seed_from_u64(seed);
    independent_set(graph, &mut rng)
}

fn pick_min_degree<N, R>(graph: &Graph<N>, rng: &mut R) -> Option<N>
where
    N: NodeId,
    R: Rng + ?Sized,
{
    graph.min_degree_nodes().choose(rng).copied()
}
