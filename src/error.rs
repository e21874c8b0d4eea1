use std::io;
use std::path::{Path, PathBuf};

use snafu::Snafu;

/// Why a single operand could not be materialised.
///
/// Every variant except `InvalidPath` wraps the `io::Error` returned by the
/// create-directory primitive for the prefix named in `path`.
#[derive(Debug, Snafu)]
pub enum CreateError {
    /// The operand is empty, only separators, or otherwise unusable.
    #[snafu(display("invalid directory name '{}': {reason}", path.display()))]
    InvalidPath { path: PathBuf, reason: &'static str },

    #[snafu(display("cannot create directory '{}': {source}", path.display()))]
    AlreadyExists { path: PathBuf, source: io::Error },

    #[snafu(display("cannot create directory '{}': {source}", path.display()))]
    PermissionDenied { path: PathBuf, source: io::Error },

    #[snafu(display("cannot create directory '{}': {source}", path.display()))]
    NoSuchParent { path: PathBuf, source: io::Error },

    #[snafu(display("cannot create directory '{}': {source}", path.display()))]
    NotADirectory { path: PathBuf, source: io::Error },

    #[snafu(display("cannot create directory '{}': {source}", path.display()))]
    OutOfSpace { path: PathBuf, source: io::Error },

    #[snafu(display("cannot create directory '{}': {source}", path.display()))]
    Other { path: PathBuf, source: io::Error },
}

impl CreateError {
    /// Classify a failed create-directory call on `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::AlreadyExists => CreateError::AlreadyExists { path, source },
            io::ErrorKind::PermissionDenied => CreateError::PermissionDenied { path, source },
            io::ErrorKind::NotFound => CreateError::NoSuchParent { path, source },
            io::ErrorKind::NotADirectory => CreateError::NotADirectory { path, source },
            io::ErrorKind::StorageFull => CreateError::OutOfSpace { path, source },
            _ => CreateError::Other { path, source },
        }
    }

    /// The path segment the failure refers to.
    pub fn path(&self) -> &Path {
        match self {
            CreateError::InvalidPath { path, .. }
            | CreateError::AlreadyExists { path, .. }
            | CreateError::PermissionDenied { path, .. }
            | CreateError::NoSuchParent { path, .. }
            | CreateError::NotADirectory { path, .. }
            | CreateError::OutOfSpace { path, .. }
            | CreateError::Other { path, .. } => path,
        }
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, CreateError::AlreadyExists { .. })
    }
}
