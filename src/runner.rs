use std::fmt::Display;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::config::{self, Options};
use crate::mkdir::{CreateOptions, DirCreator, OsDirCreator, ensure_path_exists};
use crate::report::{ConsoleReporter, Reporter};

pub const PROGRAM_NAME: &str = "md";

pub fn run(cli: Cli) -> ExitCode {
    execute(&cli, &mut io::stderr().lock())
}

fn execute(cli: &Cli, diagnostics: &mut impl Write) -> ExitCode {
    let options = match load_options(cli) {
        Ok(options) => options,
        Err(err) => {
            report_failure(diagnostics, format_args!("{err:#}"));
            return ExitCode::FAILURE;
        }
    };
    debug!(?options, operands = cli.directories.len(), "starting");

    let mut reporter = ConsoleReporter::stdout(PROGRAM_NAME, options.verbosity);
    let failures = create_all(
        &cli.directories,
        &options.create,
        &OsDirCreator,
        &mut reporter,
        diagnostics,
    );

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_options(cli: &Cli) -> Result<Options> {
    let config = config::load(cli.config.clone())?;
    Ok(Options::merge(&config, cli))
}

/// Write `md: <err>` to `diagnostics`; a failed write is only logged.
fn report_failure(diagnostics: &mut impl Write, err: impl Display) {
    if let Err(write_err) = writeln!(diagnostics, "{PROGRAM_NAME}: {err}") {
        warn!("failed to write diagnostic: {write_err}");
    }
}

/// Process every operand in order and return how many failed. A failure is
/// written to `diagnostics` and does not stop the remaining operands.
pub fn create_all(
    operands: &[PathBuf],
    options: &CreateOptions,
    creator: &impl DirCreator,
    reporter: &mut impl Reporter,
    diagnostics: &mut impl Write,
) -> usize {
    let mut failures = 0;
    for operand in operands {
        if let Err(err) = ensure_path_exists(operand, options, creator, reporter) {
            debug!(
                operand = %operand.display(),
                segment = %err.path().display(),
                error = ?err,
                "operand failed"
            );
            report_failure(diagnostics, &err);
            failures += 1;
        }
    }
    failures
}
