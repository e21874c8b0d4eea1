use std::path::{Component, Path, PathBuf};

use crate::error::CreateError;

/// A validated directory operand.
///
/// Built from the raw argument by walking its components, which drops
/// trailing and repeated separators: `a/b/`, `a//b` and `a/b` are the same
/// `DirPath`. A leading root is kept as part of every prefix but is never a
/// prefix of its own.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirPath {
    prefixes: Vec<PathBuf>,
}

impl DirPath {
    pub fn parse(raw: &Path) -> Result<Self, CreateError> {
        let invalid = |reason| CreateError::InvalidPath {
            path: raw.to_path_buf(),
            reason,
        };

        if raw.as_os_str().is_empty() {
            return Err(invalid("empty name"));
        }
        if raw.as_os_str().as_encoded_bytes().contains(&0) {
            return Err(invalid("contains a NUL byte"));
        }

        let mut current = PathBuf::new();
        let mut prefixes = Vec::new();
        for component in raw.components() {
            current.push(component.as_os_str());
            match component {
                Component::Prefix(_) | Component::RootDir => {}
                Component::CurDir | Component::ParentDir | Component::Normal(_) => {
                    prefixes.push(current.clone());
                }
            }
        }

        if prefixes.is_empty() {
            return Err(invalid("no directory component"));
        }
        Ok(Self { prefixes })
    }

    /// The normalized full path.
    pub fn as_path(&self) -> &Path {
        // `parse` guarantees at least one prefix.
        self.prefixes.last().map_or(Path::new(""), PathBuf::as_path)
    }

    /// Every prefix from the first segment to the full path, in order.
    pub fn prefixes(&self) -> impl ExactSizeIterator<Item = &Path> {
        self.prefixes.iter().map(PathBuf::as_path)
    }
}
