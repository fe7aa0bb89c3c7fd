//! End-to-end orchestration: decompose, size the topology, embed.
//!
//! Provides the [`Qembed`] runtime entry point and the [`EmbeddingResult`]
//! it produces.

use rand::{SeedableRng, rngs::SmallRng};
use tracing::{info, instrument};

use crate::{
    Result,
    decompose::{AttemptReport, Decomposer, Decomposition},
    embed::{Embedding, embed_coordinates},
    graph::{Graph, NodeId},
    topology::{TopologyDimensions, fit_topology},
};

/// Entry point for running the full embedding pipeline.
///
/// # Examples
/// ```
/// use qembed_core::{Graph, QembedBuilder};
///
/// let graph = Graph::from_edges([(1_u32, 2), (2, 3), (3, 1)]).expect("valid");
/// let qembed = QembedBuilder::new().build().expect("builder must succeed");
/// let result = qembed.run(&graph).expect("run must succeed");
/// assert_eq!(result.embedding().len(), 3);
/// assert_eq!(result.decomposition().leftover().len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Qembed {
    decomposer: Decomposer,
    rng_seed: u64,
}

impl Qembed {
    pub(crate) fn new(decomposer: Decomposer, rng_seed: u64) -> Self {
        Self {
            decomposer,
            rng_seed,
        }
    }

    /// Returns the decomposition settings.
    #[must_use]
    pub fn decomposer(&self) -> &Decomposer {
        &self.decomposer
    }

    /// Returns the seed of the tie-breaking random source.
    #[must_use]
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Decomposes `graph` and embeds the result into the smallest topology.
    ///
    /// Every call starts from a fresh random source seeded with
    /// [`Self::rng_seed`], so repeated runs on the same graph agree.
    ///
    /// # Errors
    /// Returns [`crate::QembedError::EmptyGraph`] for a graph without edges
    /// and [`crate::QembedError::SizingFailure`] when the decomposition does
    /// not fit the topology ceiling.
    pub fn run<N: NodeId>(&self, graph: &Graph<N>) -> Result<EmbeddingResult<N>> {
        self.run_observed(graph, |_| {})
    }

    /// Runs the pipeline, forwarding decomposition progress to `observer`.
    ///
    /// # Errors
    /// See [`Self::run`].
    #[instrument(
        name = "core.run",
        err,
        skip_all,
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            seed = self.rng_seed,
        ),
    )]
    pub fn run_observed<N, F>(&self, graph: &Graph<N>, observer: F) -> Result<EmbeddingResult<N>>
    where
        N: NodeId,
        F: FnMut(&AttemptReport),
    {
        let mut rng = SmallRng::seed_from_u64(self.rng_seed);
        let decomposition = self
            .decomposer
            .decompose_observed(graph, &mut rng, observer)?;
        let dimensions = fit_topology(
            decomposition.leftover().len(),
            decomposition.left().len(),
            decomposition.right().len(),
        )?;
        let embedding = embed_coordinates(
            decomposition.left(),
            decomposition.right(),
            decomposition.leftover(),
            dimensions,
        )?;
        info!(%dimensions, placed = embedding.len(), "pipeline complete");
        Ok(EmbeddingResult {
            decomposition,
            dimensions,
            embedding,
        })
    }
}

/// Output of [`Qembed::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingResult<N: NodeId> {
    decomposition: Decomposition<N>,
    dimensions: TopologyDimensions,
    embedding: Embedding<N>,
}

impl<N: NodeId> EmbeddingResult<N> {
    /// Returns the `L`/`R`/`OCT` split.
    #[must_use]
    pub fn decomposition(&self) -> &Decomposition<N> {
        &self.decomposition
    }

    /// Returns the fitted topology dimensions.
    #[must_use]
    pub fn dimensions(&self) -> TopologyDimensions {
        self.dimensions
    }

    /// Returns the node-to-coordinate mapping.
    #[must_use]
    pub fn embedding(&self) -> &Embedding<N> {
        &self.embedding
    }
}
