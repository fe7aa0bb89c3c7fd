//! Shared test utilities used across qembed crates.

pub mod ci;
pub mod graphs;
pub mod tracing;
