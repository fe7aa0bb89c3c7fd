//! Random edge-list generation for quick experiments.
//!
//! Edges are drawn uniformly over the nodes `1..=nodes`. Draws that repeat an
//! existing edge (in either direction) or form a self-loop are redrawn; too
//! many consecutive redraws means the request cannot be satisfied. Requests
//! for more edges than the nodes can hold are refused before any draw.

use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;
use tracing::{debug, instrument};

/// Consecutive redraws allowed per edge when the caller does not choose.
pub const DEFAULT_ALLOWED_REDOS: usize = 2000;

/// Upper bound on the edge storage reserved before drawing.
const MAX_PREALLOCATED_EDGES: usize = 1 << 16;

/// Errors raised by [`random_edges`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// The node count was zero.
    #[error("number of nodes must be a non-zero integer")]
    ZeroNodes,
    /// The redraw allowance was zero.
    #[error("allowed redos must be a positive integer")]
    ZeroRedos,
    /// An edge could not be placed within the redraw allowance.
    #[error(
        "overbooked graph: cannot match edges and nodes with {allowed_redos} redos; \
         try fewer edges, more nodes or more redos"
    )]
    Overbooked {
        /// Redraws permitted per edge.
        allowed_redos: usize,
    },
}

impl GenerateError {
    /// Returns the stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ZeroNodes => "QEMBED_GENERATE_ZERO_NODES",
            Self::ZeroRedos => "QEMBED_GENERATE_ZERO_REDOS",
            Self::Overbooked { .. } => "QEMBED_OVERBOOKED_GRAPH",
        }
    }
}

/// Draws `edges` distinct undirected edges over the nodes `1..=nodes`.
///
/// # Errors
/// Returns [`GenerateError::ZeroNodes`] or [`GenerateError::ZeroRedos`] for
/// invalid arguments and [`GenerateError::Overbooked`] when more than
/// `allowed_redos` consecutive draws are rejected for a single edge, or
/// immediately when `edges` exceeds the number of distinct node pairs.
///
/// # Examples
/// ```
/// use qembed_cli::generate::{DEFAULT_ALLOWED_REDOS, random_edges};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(3);
/// let edges = random_edges(10, 12, DEFAULT_ALLOWED_REDOS, &mut rng).expect("room for 12 edges");
/// assert_eq!(edges.len(), 12);
/// assert!(edges.iter().all(|(u, v)| u != v && (1..=10).contains(u) && (1..=10).contains(v)));
/// ```
#[instrument(name = "cli.generate", err, skip(rng))]
pub fn random_edges<R: Rng + ?Sized>(
    nodes: u32,
    edges: usize,
    allowed_redos: usize,
    rng: &mut R,
) -> Result<Vec<(u32, u32)>, GenerateError> {
    if nodes == 0 {
        return Err(GenerateError::ZeroNodes);
    }
    if allowed_redos == 0 {
        return Err(GenerateError::ZeroRedos);
    }

    let possible = possible_edges(nodes);
    if u64::try_from(edges)
        .ok()
        .is_none_or(|requested| requested > possible)
    {
        debug!(requested = edges, possible, "edge request exceeds node pairs");
        return Err(GenerateError::Overbooked { allowed_redos });
    }

    let reserved = edges.min(MAX_PREALLOCATED_EDGES);
    let mut seen = HashSet::with_capacity(reserved);
    let mut drawn = Vec::with_capacity(reserved);
    let mut total_redos = 0_usize;
    for _ in 0..edges {
        let mut redos = 0;
        let edge = loop {
            let candidate = (rng.gen_range(1..=nodes), rng.gen_range(1..=nodes));
            if candidate.0 != candidate.1 && !seen.contains(&undirected(candidate)) {
                break candidate;
            }
            redos += 1;
            if redos > allowed_redos {
                return Err(GenerateError::Overbooked { allowed_redos });
            }
        };
        total_redos += redos;
        seen.insert(undirected(edge));
        drawn.push(edge);
    }

    debug!(edges = drawn.len(), total_redos, "random graph generated");
    Ok(drawn)
}

/// Number of distinct undirected edges without self-loops over `nodes` nodes.
fn possible_edges(nodes: u32) -> u64 {
    let count = u64::from(nodes);
    (count * count.saturating_sub(1)).div_euclid(2)
}

fn undirected((left, right): (u32, u32)) -> (u32, u32) {
    (left.min(right), left.max(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::{fixture, rstest};

    #[fixture]
    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(17)
    }

    #[rstest]
    fn draws_distinct_undirected_edges(mut rng: SmallRng) {
        let edges = random_edges(8, 20, DEFAULT_ALLOWED_REDOS, &mut rng).expect("fits");
        let unique: HashSet<(u32, u32)> = edges.iter().copied().map(undirected).collect();
        assert_eq!(unique.len(), 20);
        assert!(edges.iter().all(|(left, right)| left != right));
    }

    #[rstest]
    fn complete_graph_is_reachable(mut rng: SmallRng) {
        // K4 has exactly six edges; the last ones need many redraws.
        let edges = random_edges(4, 6, DEFAULT_ALLOWED_REDOS, &mut rng).expect("fits");
        assert_eq!(edges.len(), 6);
    }

    #[rstest]
    #[case::more_edges_than_pairs(4, 7)]
    #[case::single_node(1, 1)]
    #[case::unbounded_request(5, usize::MAX)]
    #[case::one_past_complete(100, 4_951)]
    fn impossible_requests_are_overbooked(
        #[case] nodes: u32,
        #[case] edges: usize,
        mut rng: SmallRng,
    ) {
        let err = random_edges(nodes, edges, 200, &mut rng).expect_err("cannot fit");
        assert_eq!(err, GenerateError::Overbooked { allowed_redos: 200 });
        assert_eq!(err.code(), "QEMBED_OVERBOOKED_GRAPH");
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 1)]
    #[case(4, 6)]
    #[case(u32::MAX, 9_223_372_030_412_324_865)]
    fn possible_edges_counts_node_pairs(#[case] nodes: u32, #[case] expected: u64) {
        assert_eq!(possible_edges(nodes), expected);
    }

    #[rstest]
    #[case::zero_nodes(0, 5, GenerateError::ZeroNodes)]
    #[case::zero_redos(5, 0, GenerateError::ZeroRedos)]
    fn invalid_arguments_are_rejected(
        #[case] nodes: u32,
        #[case] redos: usize,
        #[case] expected: GenerateError,
        mut rng: SmallRng,
    ) {
        assert_eq!(random_edges(nodes, 1, redos, &mut rng), Err(expected));
    }

    #[rstest]
    fn zero_edges_yield_an_empty_list(mut rng: SmallRng) {
        assert_eq!(random_edges(3, 0, 1, &mut rng), Ok(Vec::new()));
    }

    #[test]
    fn equal_seeds_reproduce_equal_graphs() {
        let first = random_edges(30, 40, 100, &mut SmallRng::seed_from_u64(5)).expect("fits");
        let second = random_edges(30, 40, 100, &mut SmallRng::seed_from_u64(5)).expect("fits");
        assert_eq!(first, second);
    }
}
