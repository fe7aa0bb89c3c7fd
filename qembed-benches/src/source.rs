//! Seeded random graphs for benchmarks.

use qembed_cli::generate::{DEFAULT_ALLOWED_REDOS, random_edges};
use qembed_core::Graph;
use rand::{SeedableRng, rngs::SmallRng};

use crate::{error::BenchSetupError, params::GraphBenchParams};

/// Builds a reproducible random graph of the requested size.
///
/// # Errors
/// Returns [`BenchSetupError::Generate`] when the requested degree cannot be
/// met and [`BenchSetupError::Core`] if graph construction fails.
pub fn random_graph(params: GraphBenchParams, seed: u64) -> Result<Graph<u32>, BenchSetupError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let edges = random_edges(
        params.nodes,
        params.edge_count(),
        DEFAULT_ALLOWED_REDOS,
        &mut rng,
    )?;
    Ok(Graph::from_edges(edges)?)
}
