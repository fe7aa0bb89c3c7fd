//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of `.expect()`.

use qembed_cli::generate::GenerateError;
use qembed_core::QembedError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Random graph generation failed.
    #[error("graph generation failed: {0}")]
    Generate(#[from] GenerateError),
    /// Graph construction or the pipeline failed.
    #[error("qembed operation failed: {0}")]
    Core(#[from] QembedError),
}
