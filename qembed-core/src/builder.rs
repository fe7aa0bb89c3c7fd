//! Builder utilities for configuring the embedding pipeline.
//!
//! Validates decomposition settings before constructing [`Qembed`] instances.

use crate::{
    Result,
    decompose::{DEFAULT_RETRY_BUDGET, DecomposerBuilder},
    peeling::DEFAULT_RNG_SEED,
    pipeline::Qembed,
};

/// Configures and constructs [`Qembed`] instances.
///
/// # Examples
/// ```
/// use qembed_core::QembedBuilder;
///
/// let qembed = QembedBuilder::new()
///     .with_retry_budget(10)
///     .with_rng_seed(7)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(qembed.decomposer().retry_budget().get(), 10);
/// assert_eq!(qembed.rng_seed(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct QembedBuilder {
    ensurance: bool,
    retry_budget: usize,
    rng_seed: u64,
}

impl Default for QembedBuilder {
    fn default() -> Self {
        Self {
            ensurance: true,
            retry_budget: DEFAULT_RETRY_BUDGET,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

impl QembedBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use qembed_core::QembedBuilder;
    ///
    /// let builder = QembedBuilder::new();
    /// assert!(builder.ensurance());
    /// assert_eq!(builder.retry_budget(), 100);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the bipartite check and retry loop.
    #[must_use]
    pub fn with_ensurance(mut self, ensurance: bool) -> Self {
        self.ensurance = ensurance;
        self
    }

    /// Returns whether the bipartite check is enabled.
    #[must_use]
    pub fn ensurance(&self) -> bool {
        self.ensurance
    }

    /// Overrides the maximum number of decomposition attempts.
    #[must_use]
    pub fn with_retry_budget(mut self, retry_budget: usize) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    /// Returns the configured retry budget.
    #[must_use]
    pub fn retry_budget(&self) -> usize {
        self.retry_budget
    }

    /// Seeds the random source used for tie-breaking.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Returns the configured seed.
    #[must_use]
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Validates the configuration and constructs a [`Qembed`] instance.
    ///
    /// # Errors
    /// Returns [`crate::QembedError::InvalidRetryBudget`] when the retry
    /// budget is zero.
    ///
    /// # Examples
    /// ```
    /// use qembed_core::{QembedBuilder, QembedError};
    ///
    /// let err = QembedBuilder::new().with_retry_budget(0).build().unwrap_err();
    /// assert_eq!(err, QembedError::InvalidRetryBudget);
    /// ```
    pub fn build(self) -> Result<Qembed> {
        let decomposer = DecomposerBuilder::new()
            .with_oct(true)
            .with_ensurance(self.ensurance)
            .with_retry_budget(self.retry_budget)
            .build()?;
        Ok(Qembed::new(decomposer, self.rng_seed))
    }
}
