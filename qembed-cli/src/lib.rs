//! Support library for the qembed CLI binary.
//!
//! Exposes the command pipeline, the random graph generator and logging
//! setup so doctests and unit tests can exercise them without forking a
//! subprocess.

pub mod cli;
pub mod generate;
pub mod logging;
