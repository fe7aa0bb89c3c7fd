//! Benchmark support crate for qembed.
//!
//! Provides seeded graph sources and parameter types used by the Criterion
//! benchmarks for independent-set peeling and the full embedding pipeline.

pub mod error;
pub mod params;
pub mod source;
