//! Point-in-time listings of a directory tree.

use std::{io, path::Path};

use walkdir::WalkDir;

use crate::{PathSet, absolute};

/// List every file and folder below `root`, recursively, as absolute paths.
///
/// The root itself is not part of the snapshot. Symlinks are recorded but
/// not followed. A missing root is an error; see [`snapshot_or_empty`] for
/// the tolerant variant.
pub fn snapshot(root: impl AsRef<Path>) -> io::Result<PathSet> {
    let root = absolute(root)?;
    let mut paths = PathSet::new();
    for entry in WalkDir::new(&root).min_depth(1).follow_links(false) {
        let entry = entry?;
        paths.insert(entry.into_path());
    }
    Ok(paths)
}

/// Like [`snapshot`], but a root that does not exist yields an empty set.
pub fn snapshot_or_empty(root: impl AsRef<Path>) -> io::Result<PathSet> {
    let root = root.as_ref();
    match std::fs::symlink_metadata(root) {
        Ok(_) => snapshot(root),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(PathSet::new()),
        Err(e) => Err(e),
    }
}
