//! Qembed core library.
//!
//! Splits a graph into two independent sets plus an odd cycle transversal,
//! sizes a bipartite grid topology to hold the split, and assigns every node
//! a `(row, column, shore, offset)` coordinate.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod decompose;
mod embed;
mod error;
mod graph;
mod peeling;
mod pipeline;
mod topology;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::QembedBuilder,
    decompose::{
        AttemptReport, DEFAULT_RETRY_BUDGET, Decomposer, DecomposerBuilder, Decomposition,
        bipartite_subgraph, decompose, is_bipartite_split,
    },
    embed::{Coordinate, Embedding, Placement, Shore, embed_coordinates},
    error::{ErrorKind, QembedError, QembedErrorCode, Result},
    graph::{Graph, NodeId},
    peeling::{DEFAULT_RNG_SEED, independent_set, independent_set_seeded},
    pipeline::{EmbeddingResult, Qembed},
    topology::{
        BASE_CAPACITY, MAX_AXIS_SLOTS, MAX_GRID_SIDE, MAX_SEARCH_CAPACITY, TopologyDimensions,
        fit_topology,
    },
};
