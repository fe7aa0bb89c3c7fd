//! Command-line interface orchestration for qembed.
//!
//! The `run` command loads a graph, either from an edge-list file or from
//! the random generator, and executes the decomposition and embedding
//! pipeline.

mod commands;
mod edge_list;

pub use commands::{
    Cli, CliError, Command, EdgesArgs, ExecutionSummary, RandomArgs, RunCommand, RunSource,
    render_summary, run_cli,
};
pub use edge_list::{EdgeListError, parse_edge_list};

#[cfg(test)]
mod test_helpers;
