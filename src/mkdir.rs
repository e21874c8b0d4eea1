use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::CreateError;
use crate::mode::Mode;
use crate::path::DirPath;
use crate::report::Reporter;

/// How a single operand is materialised.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CreateOptions {
    /// Create missing prefixes and accept directories that already exist.
    pub parents: bool,
    /// Mode for the final directory; intermediates get [`Mode::DEFAULT`].
    pub mode: Mode,
}

/// What happened to one prefix of an operand.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SegmentOutcome {
    Created,
    AlreadyExisted,
}

/// Filesystem primitives used by [`ensure_path_exists`].
pub trait DirCreator {
    /// Create exactly one directory. Must fail with
    /// `io::ErrorKind::AlreadyExists` when `path` is already present.
    fn create_dir(&self, path: &Path, mode: Mode) -> io::Result<()>;

    fn is_dir(&self, path: &Path) -> bool;
}

/// [`DirCreator`] backed by `mkdir(2)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsDirCreator;

impl DirCreator for OsDirCreator {
    fn create_dir(&self, path: &Path, mode: Mode) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode.bits());
        }
        #[cfg(not(unix))]
        let _ = mode;
        builder.create(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Make sure the directory named by `raw` exists.
///
/// Without `parents` the full path is created in one step and an existing
/// entry is an error. With `parents` every prefix is created in order; a
/// prefix that already exists as a directory is skipped, and the first other
/// failure stops the walk. Directories created before a failure are left in
/// place.
pub fn ensure_path_exists(
    raw: &Path,
    options: &CreateOptions,
    creator: &impl DirCreator,
    reporter: &mut impl Reporter,
) -> Result<(), CreateError> {
    let dir = DirPath::parse(raw)?;

    if !options.parents {
        let target = dir.as_path();
        create_segment(creator, target, options.mode)?;
        reporter.segment(target, SegmentOutcome::Created);
        return Ok(());
    }

    let last = dir.prefixes().len() - 1;
    for (index, prefix) in dir.prefixes().enumerate() {
        let mode = if index == last {
            options.mode
        } else {
            Mode::DEFAULT
        };
        match create_segment(creator, prefix, mode) {
            Ok(()) => reporter.segment(prefix, SegmentOutcome::Created),
            Err(err) if err.is_already_exists() && creator.is_dir(prefix) => {
                debug!(path = %prefix.display(), "already exists");
                reporter.segment(prefix, SegmentOutcome::AlreadyExisted);
            }
            // Something other than a directory sits where a parent must go.
            Err(CreateError::AlreadyExists { path, source }) if index != last => {
                return Err(CreateError::NotADirectory { path, source });
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn create_segment(creator: &impl DirCreator, path: &Path, mode: Mode) -> Result<(), CreateError> {
    debug!(path = %path.display(), %mode, "mkdir");
    creator
        .create_dir(path, mode)
        .map_err(|source| CreateError::from_io(path, source))
}
