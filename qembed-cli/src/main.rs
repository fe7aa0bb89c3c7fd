//! `qembed` binary.
//!
//! `qembed run edges <PATH>` embeds a graph read from an edge-list file and
//! `qembed run random --nodes N --edges E` embeds a freshly generated one.
//! Either way the graph is split into `L`, `R` and `OCT`, sized onto the
//! grid topology and given coordinates; the text summary goes to stdout and
//! diagnostics go to stderr through `tracing`. Failures log their
//! `QEMBED_*` code and exit non-zero.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use qembed_cli::{
    cli::{Cli, CliError, ExecutionSummary, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn embed_and_print() -> Result<()> {
    let summary = run_cli(Cli::parse()).context("failed to embed graph")?;
    print_summary(&summary)
}

fn print_summary(summary: &ExecutionSummary) -> Result<()> {
    let mut stdout = BufWriter::new(io::stdout().lock());
    render_summary(summary, &mut stdout).context("failed to write embedding summary")?;
    stdout.flush().context("failed to flush embedding summary")
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match embed_and_print() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Only generator and core failures carry a stable code.
            let code = err.downcast_ref::<CliError>().and_then(CliError::code);
            error!(
                error = %format_args!("{err:#}"),
                code = code.map(field::display),
                "qembed run failed"
            );
            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is not installed yet, so stderr is the only channel"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("qembed: failed to initialize logging: {err}");
}
