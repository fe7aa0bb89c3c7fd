//! Greedy bipartite/OCT decomposition.
//!
//! A first peeling pass over the whole graph yields the left set `L`. The
//! graph is then reduced by removing `L` (ghosts preserved) and a second pass
//! yields the right set `R`. Whatever neither pass selected forms the
//! approximate odd-cycle transversal `OCT`.
//!
//! With ensurance enabled the split is checked for the bipartite property (no
//! edge inside `L`, no edge inside `R`) and recomputed from scratch with fresh
//! random draws until it passes or the retry budget runs out. Exhausting the
//! budget is not an error: the last split is returned and flagged.

use std::{collections::BTreeSet, num::NonZeroUsize};

use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{QembedError, Result},
    graph::{Graph, NodeId},
    peeling::independent_set,
};

/// Number of ensurance attempts made when callers do not choose a budget.
pub const DEFAULT_RETRY_BUDGET: usize = 100;

/// Outcome of a decomposition: sorted, pairwise disjoint `L`, `R` and `OCT`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decomposition<N: NodeId> {
    left: Vec<N>,
    right: Vec<N>,
    oct: Vec<N>,
    oct_requested: bool,
    attempts: usize,
    verified: Option<bool>,
}

impl<N: NodeId> Decomposition<N> {
    /// Returns the left independent set in ascending order.
    #[must_use]
    #[rustfmt::skip]
    pub fn left(&self) -> &[N] { &self.left }

    /// Returns the right independent set in ascending order.
    #[must_use]
    #[rustfmt::skip]
    pub fn right(&self) -> &[N] { &self.right }

    /// Returns the OCT set in ascending order when it was requested.
    #[must_use]
    pub fn oct(&self) -> Option<&[N]> {
        self.oct_requested.then_some(self.oct.as_slice())
    }

    /// Returns the nodes outside `L` and `R`, whether or not OCT was requested.
    #[must_use]
    #[rustfmt::skip]
    pub fn leftover(&self) -> &[N] { &self.oct }

    /// Returns the number of decomposition attempts performed.
    #[must_use]
    #[rustfmt::skip]
    pub fn attempts(&self) -> usize { self.attempts }

    /// Returns the bipartite check outcome, or `None` when ensurance was off.
    #[must_use]
    #[rustfmt::skip]
    pub fn verified(&self) -> Option<bool> { self.verified }
}

/// Progress snapshot handed to decomposition observers after each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttemptReport {
    /// One-based attempt number.
    pub attempt: usize,
    /// Maximum number of attempts allowed.
    pub budget: usize,
    /// Size of `L` produced by this attempt.
    pub left: usize,
    /// Size of `R` produced by this attempt.
    pub right: usize,
    /// Size of `OCT` produced by this attempt.
    pub oct: usize,
    /// Whether the split passed the bipartite check.
    pub bipartite: bool,
}

/// Configures and constructs [`Decomposer`] instances.
///
/// # Examples
/// ```
/// use qembed_core::DecomposerBuilder;
///
/// let decomposer = DecomposerBuilder::new()
///     .with_retry_budget(5)
///     .with_ensurance(true)
///     .build()
///     .expect("budget is non-zero");
/// assert_eq!(decomposer.retry_budget().get(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct DecomposerBuilder {
    want_oct: bool,
    ensurance: bool,
    retry_budget: usize,
}

impl Default for DecomposerBuilder {
    fn default() -> Self {
        Self {
            want_oct: true,
            ensurance: true,
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }
}

impl DecomposerBuilder {
    /// Creates a builder that reports OCT and runs ensurance with the default budget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses whether the OCT set is reported.
    #[must_use]
    pub fn with_oct(mut self, want_oct: bool) -> Self {
        self.want_oct = want_oct;
        self
    }

    /// Enables or disables the bipartite check and retry loop.
    #[must_use]
    pub fn with_ensurance(mut self, ensurance: bool) -> Self {
        self.ensurance = ensurance;
        self
    }

    /// Overrides the maximum number of ensurance attempts.
    #[must_use]
    pub fn with_retry_budget(mut self, retry_budget: usize) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    /// Validates the configuration and constructs a [`Decomposer`].
    ///
    /// # Errors
    /// Returns [`QembedError::InvalidRetryBudget`] when the budget is zero.
    pub fn build(self) -> Result<Decomposer> {
        let retry_budget =
            NonZeroUsize::new(self.retry_budget).ok_or(QembedError::InvalidRetryBudget)?;
        Ok(Decomposer {
            want_oct: self.want_oct,
            ensurance: self.ensurance,
            retry_budget,
        })
    }
}

/// Runs the two-pass decomposition with a fixed configuration.
#[derive(Clone, Copy, Debug)]
pub struct Decomposer {
    want_oct: bool,
    ensurance: bool,
    retry_budget: NonZeroUsize,
}

impl Decomposer {
    /// Returns whether the OCT set is reported.
    #[must_use]
    #[rustfmt::skip]
    pub fn want_oct(&self) -> bool { self.want_oct }

    /// Returns whether the bipartite check and retry loop run.
    #[must_use]
    #[rustfmt::skip]
    pub fn ensurance(&self) -> bool { self.ensurance }

    /// Returns the maximum number of ensurance attempts.
    #[must_use]
    #[rustfmt::skip]
    pub fn retry_budget(&self) -> NonZeroUsize { self.retry_budget }

    /// Decomposes `graph` into `L`, `R` and `OCT`.
    ///
    /// # Errors
    /// Returns [`QembedError::EmptyGraph`] when `graph` has no edges.
    pub fn decompose<N, R>(&self, graph: &Graph<N>, rng: &mut R) -> Result<Decomposition<N>>
    where
        N: NodeId,
        R: Rng + ?Sized,
    {
        self.decompose_observed(graph, rng, |_| {})
    }

    /// Decomposes `graph`, calling `observer` after every attempt.
    ///
    /// The observer only sees progress; it cannot influence the result.
    ///
    /// # Errors
    /// Returns [`QembedError::EmptyGraph`] when `graph` has no edges.
    #[instrument(
        name = "core.decompose",
        err,
        skip_all,
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            ensurance = self.ensurance,
            budget = self.retry_budget.get(),
        ),
    )]
    pub fn decompose_observed<N, R, F>(
        &self,
        graph: &Graph<N>,
        rng: &mut R,
        observer: F,
    ) -> Result<Decomposition<N>>
    where
        N: NodeId,
        R: Rng + ?Sized,
        F: FnMut(&AttemptReport),
    {
        self.decompose_with(graph, rng, observer, is_bipartite_split::<N>)
    }

    /// Runs the retry loop, accepting a split when `check` passes.
    fn decompose_with<N, R, F, C>(
        &self,
        graph: &Graph<N>,
        rng: &mut R,
        mut observer: F,
        mut check: C,
    ) -> Result<Decomposition<N>>
    where
        N: NodeId,
        R: Rng + ?Sized,
        F: FnMut(&AttemptReport),
        C: FnMut(&Graph<N>, &[N], &[N]) -> bool,
    {
        if graph.edge_count() == 0 {
            warn!(nodes = graph.node_count(), "graph has no edges, returning error");
            return Err(QembedError::EmptyGraph);
        }

        let budget = if self.ensurance {
            self.retry_budget.get()
        } else {
            1
        };

        let mut attempt = 0;
        loop {
            attempt += 1;
            let (left, right, oct) = split_once(graph, rng);
            let bipartite = !self.ensurance || check(graph, &left, &right);

            #[cfg(feature = "metrics")]
            metrics::counter!("qembed_decompose_attempts").increment(1);

            let report = AttemptReport {
                attempt,
                budget,
                left: left.len(),
                right: right.len(),
                oct: oct.len(),
                bipartite,
            };
            debug!(?report, "decomposition attempt finished");
            observer(&report);

            if bipartite || attempt >= budget {
                if !bipartite {
                    warn!(
                        attempts = attempt,
                        "retry budget exhausted; returning last split"
                    );
                }
                info!(
                    left = left.len(),
                    right = right.len(),
                    oct = oct.len(),
                    attempts = attempt,
                    "decomposition complete"
                );
                return Ok(Decomposition {
                    left,
                    right,
                    oct,
                    oct_requested: self.want_oct,
                    attempts: attempt,
                    verified: self.ensurance.then_some(bipartite),
                });
            }
        }
    }
}

/// Decomposes `graph` with the default retry budget.
///
/// `want_oct` controls whether [`Decomposition::oct`] is reported and
/// `ensurance` enables the bipartite check with bounded retries.
///
/// # Errors
/// Returns [`QembedError::EmptyGraph`] when `graph` has no edges.
///
/// # Examples
/// ```
/// use qembed_core::{Graph, decompose};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let graph = Graph::from_edges([(1_u32, 2), (2, 3), (3, 1)]).expect("valid");
/// let mut rng = SmallRng::seed_from_u64(1);
/// let split = decompose(&graph, true, true, &mut rng).expect("graph has edges");
/// assert_eq!(split.left().len() + split.right().len() + split.leftover().len(), 3);
/// assert_eq!(split.oct().map(<[u32]>::len), Some(1));
/// ```
pub fn decompose<N, R>(
    graph: &Graph<N>,
    want_oct: bool,
    ensurance: bool,
    rng: &mut R,
) -> Result<Decomposition<N>>
where
    N: NodeId,
    R: Rng + ?Sized,
{
    DecomposerBuilder::new()
        .with_oct(want_oct)
        .with_ensurance(ensurance)
        .build()?
        .decompose(graph, rng)
}

/// Returns `true` when no edge of `graph` lies inside `left` or inside `right`.
#[must_use]
pub fn is_bipartite_split<N: NodeId>(graph: &Graph<N>, left: &[N], right: &[N]) -> bool {
    let left: BTreeSet<N> = left.iter().copied().collect();
    let right: BTreeSet<N> = right.iter().copied().collect();
    graph.edges().all(|(source, target)| {
        let inside_left = left.contains(&source) && left.contains(&target);
        let inside_right = right.contains(&source) && right.contains(&target);
        !inside_left && !inside_right
    })
}

/// Returns the subgraph of `graph` left after deleting the OCT nodes.
///
/// Nodes of `L` and `R` are all kept, including those that end up isolated.
#[must_use]
pub fn bipartite_subgraph<N: NodeId>(graph: &Graph<N>, split: &Decomposition<N>) -> Graph<N> {
    let mut reduced = graph.clone();
    for node in split.leftover() {
        reduced.remove_node(node);
    }
    reduced
}

fn split_once<N, R>(graph: &Graph<N>, rng: &mut R) -> (Vec<N>, Vec<N>, Vec<N>)
where
    N: NodeId,
    R: Rng + ?Sized,
{
    let mut left = independent_set(graph.clone(), rng);
    let reduced = graph.without_nodes(&left);
    let mut right = independent_set(reduced, rng);

    let chosen: BTreeSet<N> = left.iter().chain(right.iter()).copied().collect();
    let oct: Vec<N> = graph.nodes().filter(|node| !chosen.contains(node)).collect();

    left.sort_unstable();
    right.sort_unstable();
    (left, right, oct)
}

#[cfg(test)]
mod tests;
