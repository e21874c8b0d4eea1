use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::mkdir::SegmentOutcome;

/// Receives the outcome of every prefix walked by
/// [`ensure_path_exists`](crate::mkdir::ensure_path_exists).
///
/// Implementations must not fail; reporting never changes the result of a
/// creation.
pub trait Reporter {
    fn segment(&mut self, path: &Path, outcome: SegmentOutcome);
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Verbosity {
    #[default]
    Quiet,
    /// One line per created directory.
    Normal,
    /// Like `Normal`, plus the working directory it was created in.
    Explicit,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, explicit: bool) -> Self {
        match (verbose, explicit) {
            (false, _) => Verbosity::Quiet,
            (true, false) => Verbosity::Normal,
            (true, true) => Verbosity::Explicit,
        }
    }
}

/// Prints `md: created directory '...'` lines for created segments.
pub struct ConsoleReporter<W: Write> {
    program: &'static str,
    verbosity: Verbosity,
    out: W,
    cwd: Option<PathBuf>,
    cwd_lookup: fn() -> io::Result<PathBuf>,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(program: &'static str, verbosity: Verbosity) -> Self {
        Self::new(program, verbosity, io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(program: &'static str, verbosity: Verbosity, out: W) -> Self {
        Self {
            program,
            verbosity,
            out,
            cwd: None,
            cwd_lookup: std::env::current_dir,
        }
    }

    #[cfg(test)]
    fn with_cwd_lookup(mut self, lookup: fn() -> io::Result<PathBuf>) -> Self {
        self.cwd_lookup = lookup;
        self
    }

    fn working_dir(&mut self) -> Option<&Path> {
        if self.cwd.is_none() {
            match (self.cwd_lookup)() {
                Ok(dir) => self.cwd = Some(dir),
                Err(err) => warn!("could not determine the current working directory: {err}"),
            }
        }
        self.cwd.as_deref()
    }

    fn write_created(&mut self, path: &Path) -> io::Result<()> {
        let program = self.program;
        let line = match self.verbosity {
            Verbosity::Quiet => return Ok(()),
            Verbosity::Normal => {
                format!("{program}: created directory '{}'", path.display())
            }
            Verbosity::Explicit => match self.working_dir() {
                Some(cwd) => format!(
                    "{program}: created directory '{}' in: '{}'",
                    path.display(),
                    cwd.display()
                ),
                None => format!("{program}: created directory '{}'", path.display()),
            },
        };
        writeln!(self.out, "{line}")
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn segment(&mut self, path: &Path, outcome: SegmentOutcome) {
        debug!(path = %path.display(), ?outcome, "segment");
        if outcome != SegmentOutcome::Created {
            return;
        }
        if let Err(err) = self.write_created(path) {
            warn!("failed to write verbose output: {err}");
        }
    }
}
