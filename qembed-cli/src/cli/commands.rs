//! Command definitions and execution for the qembed CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use qembed_core::{
    DEFAULT_RETRY_BUDGET, DEFAULT_RNG_SEED, EmbeddingResult, Graph, Qembed, QembedBuilder,
    QembedError,
};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::edge_list::{EdgeListError, parse_edge_list};
use crate::generate::{DEFAULT_ALLOWED_REDOS, GenerateError, random_edges};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "qembed",
    about = "Split a graph into bipartite sides plus an odd cycle transversal and embed it."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Decompose a graph and embed it into the smallest grid topology.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Skip the bipartite check and its retry loop.
    #[arg(long = "no-ensurance", global = true)]
    pub no_ensurance: bool,

    /// Maximum number of decomposition attempts when the check is enabled.
    #[arg(long = "retry-budget", default_value_t = DEFAULT_RETRY_BUDGET, global = true)]
    pub retry_budget: usize,

    /// Seed for the tie-breaking random source and the generator.
    #[arg(long, default_value_t = DEFAULT_RNG_SEED, global = true)]
    pub seed: u64,

    /// Graph source.
    #[command(subcommand)]
    pub source: RunSource,
}

/// Graph sources supported by `run`.
#[derive(Debug, Subcommand, Clone)]
pub enum RunSource {
    /// Read a UTF-8 edge list, one `u v` pair per line.
    Edges(EdgesArgs),
    /// Generate a random graph.
    Random(RandomArgs),
}

/// Edge-list ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct EdgesArgs {
    /// Path to the edge-list file.
    pub path: PathBuf,
}

/// Random graph generation arguments.
#[derive(Debug, Args, Clone)]
pub struct RandomArgs {
    /// Number of nodes, labelled `1..=N`.
    #[arg(long)]
    pub nodes: u32,

    /// Number of distinct edges to draw.
    #[arg(long)]
    pub edges: usize,

    /// Consecutive redraws allowed per edge before giving up.
    #[arg(long, default_value_t = DEFAULT_ALLOWED_REDOS)]
    pub redos: usize,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The input file was not a valid edge list.
    #[error("failed to parse `{path}`: {source}")]
    EdgeList {
        /// Path of the offending file.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: EdgeListError,
    },
    /// Random graph generation failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),
    /// Decomposition or embedding failed.
    #[error(transparent)]
    Core(#[from] QembedError),
}

impl CliError {
    /// Returns the stable machine-readable code, when the failure has one.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Core(core) => Some(core.code().as_str()),
            Self::Generate(generate) => Some(generate.code()),
            Self::Io { .. } | Self::EdgeList { .. } => None,
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Human-readable description of the graph source.
    pub source: String,
    /// Decomposition, topology and coordinates produced by the pipeline.
    pub result: EmbeddingResult<u32>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the graph or running the pipeline fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use qembed_cli::cli::{Cli, Command, EdgesArgs, RunCommand, RunSource, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "1 4\n1 5\n2 4\n2 5\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         no_ensurance: false,
///         retry_budget: 10,
///         seed: 1,
///         source: RunSource::Edges(EdgesArgs {
///             path: file.path().to_path_buf(),
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert!(summary.result.decomposition().leftover().is_empty());
/// assert_eq!(summary.result.embedding().len(), 4);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        source = field::Empty,
        ensurance = !command.no_ensurance,
        retry_budget = command.retry_budget,
        seed = command.seed,
    ),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let qembed = QembedBuilder::new()
        .with_ensurance(!command.no_ensurance)
        .with_retry_budget(command.retry_budget)
        .with_rng_seed(command.seed)
        .build()?;

    let span = Span::current();
    let summary = match command.source {
        RunSource::Edges(args) => {
            span.record("source", field::display("edges"));
            run_edges(&qembed, args)?
        }
        RunSource::Random(args) => {
            span.record("source", field::display("random"));
            run_random(&qembed, args, command.seed)?
        }
    };

    info!(
        source = summary.source.as_str(),
        oct = summary.result.decomposition().leftover().len(),
        dims = %summary.result.dimensions(),
        "command completed"
    );
    Ok(summary)
}

#[instrument(name = "cli.run_edges", err, skip(qembed, args), fields(path = field::Empty))]
pub(super) fn run_edges(qembed: &Qembed, args: EdgesArgs) -> Result<ExecutionSummary, CliError> {
    let EdgesArgs { path } = args;
    Span::current().record("path", field::display(path.display()));
    let edges = load_edges(&path)?;
    let graph = Graph::from_edges(edges)?;
    let result = qembed.run(&graph)?;
    Ok(ExecutionSummary {
        source: path.display().to_string(),
        result,
    })
}

#[instrument(name = "cli.run_random", err, skip(qembed))]
pub(super) fn run_random(
    qembed: &Qembed,
    args: RandomArgs,
    seed: u64,
) -> Result<ExecutionSummary, CliError> {
    let RandomArgs {
        nodes,
        edges,
        redos,
    } = args;
    let mut rng = SmallRng::seed_from_u64(seed);
    let drawn = random_edges(nodes, edges, redos, &mut rng)?;
    let graph = Graph::from_edges(drawn)?;
    let result = qembed.run(&graph)?;
    Ok(ExecutionSummary {
        source: format!("random graph ({nodes} nodes, {edges} edges, seed {seed})"),
        result,
    })
}

pub(super) fn load_edges(path: &Path) -> Result<Vec<(u32, u32)>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_edge_list(BufReader::new(file)).map_err(|source| CliError::EdgeList {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders `summary` to `writer` in a line-oriented text format.
///
/// The header lists the three node sets, the attempt count and the topology;
/// every anchor coordinate follows as `node<TAB>(row, column, shore, offset)`.
/// Connectors contribute two lines.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use qembed_cli::cli::{ExecutionSummary, render_summary};
/// # use qembed_core::{Graph, QembedBuilder};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let graph = Graph::from_edges([(1_u32, 2)])?;
/// let result = QembedBuilder::new().build()?.run(&graph)?;
/// let summary = ExecutionSummary { source: "demo".into(), result };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains("topology: 1x1x1"));
/// assert_eq!(text.lines().count(), 8);
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let split = summary.result.decomposition();
    writeln!(writer, "source: {}", summary.source)?;
    write_nodes(&mut writer, "left", split.left())?;
    write_nodes(&mut writer, "right", split.right())?;
    write_nodes(&mut writer, "oct", split.leftover())?;
    writeln!(writer, "attempts: {}", split.attempts())?;
    writeln!(writer, "topology: {}", summary.result.dimensions())?;
    for (node, coordinate) in summary.result.embedding().coordinates() {
        writeln!(writer, "{node}\t{coordinate}")?;
    }
    Ok(())
}

fn write_nodes(writer: &mut impl Write, label: &str, nodes: &[u32]) -> io::Result<()> {
    write!(writer, "{label}:")?;
    for node in nodes {
        write!(writer, " {node}")?;
    }
    writeln!(writer)
}
