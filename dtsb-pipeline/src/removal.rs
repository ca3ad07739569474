//! Best-effort path removal with an explicit outcome.

use std::{io, path::Path};

/// Outcome of removing one path.
///
/// Removal never aborts a pass; callers inspect the outcome instead.
#[derive(Debug)]
pub enum Removal {
    /// The path existed and was removed.
    Removed,
    /// Nothing was at the path (counts as success).
    AlreadyGone,
    /// The path could not be removed.
    Failed(io::Error),
}

impl Removal {
    pub fn from_result(result: io::Result<()>) -> Self {
        match result {
            Ok(()) => Removal::Removed,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Removal::AlreadyGone,
            Err(e) => Removal::Failed(e),
        }
    }

    /// Returns true unless the removal failed.
    pub fn is_success(&self) -> bool {
        !self.is_failure()
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Removal::Failed(_))
    }

    /// The error, if the removal failed.
    pub fn error(&self) -> Option<&io::Error> {
        match self {
            Removal::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Remove a file, symlink or directory tree at `path`.
///
/// Directories are removed recursively; symlinks are removed themselves and
/// never followed.
pub async fn remove_path(path: &Path) -> Removal {
    let result = match tokio::fs::symlink_metadata(path).await {
        Ok(meta) if meta.is_dir() => tokio::fs::remove_dir_all(path).await,
        Ok(_) => tokio::fs::remove_file(path).await,
        Err(e) => Err(e),
    };
    Removal::from_result(result)
}
