//! Small helpers shared across CLI tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use super::commands::run_command;
use super::{Cli, CliError, Command, EdgesArgs, RandomArgs, RunCommand, RunSource, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_edge_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

pub(super) fn run_with(source: RunSource) -> RunCommand {
    RunCommand {
        no_ensurance: false,
        retry_budget: 100,
        seed: 7,
        source,
    }
}

pub(super) fn edges_cli(path: PathBuf) -> Cli {
    Cli {
        command: Command::Run(run_with(RunSource::Edges(EdgesArgs { path }))),
    }
}

pub(super) fn random_source(nodes: u32, edges: usize, redos: usize) -> RunSource {
    RunSource::Random(RandomArgs {
        nodes,
        edges,
        redos,
    })
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn run_command_expecting_error(cmd: RunCommand, panic_msg: &str) -> CliError {
    match run_command(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
