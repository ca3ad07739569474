//! Absolute path sets and before/after directory state.

use std::{
    collections::BTreeSet,
    io,
    path::{Component, Path, PathBuf},
};

use serde::Serialize;

/// Resolve `path` to an absolute, lexically normalized path.
///
/// `.` components are dropped and `..` pops the previous component. The
/// filesystem is not consulted, so the path does not need to exist.
pub fn absolute(path: impl AsRef<Path>) -> io::Result<PathBuf> {
    let path = std::path::absolute(path.as_ref())?;
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

/// An ordered set of absolute filesystem paths.
///
/// Ordering is by path components, so a directory always sorts directly
/// before everything nested inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathSet(BTreeSet<PathBuf>);

impl PathSet {
    /// Create an empty path set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path, returning whether it was newly added.
    pub fn insert(&mut self, path: impl Into<PathBuf>) -> bool {
        self.0.insert(path.into())
    }

    /// Check whether the set contains `path`.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.0.contains(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the paths in order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }

    /// Paths in `self` that are not in `other`.
    pub fn difference(&self, other: &PathSet) -> PathSet {
        self.0.difference(&other.0).cloned().collect()
    }

    /// Collapse the set to its top-most entries.
    ///
    /// A path is dropped when one of its ancestors is also in the set, since
    /// removing the ancestor recursively already removes it.
    pub fn roots(&self) -> PathSet {
        let mut roots = PathSet::new();
        let mut last_root: Option<&Path> = None;
        for path in self.iter() {
            // Descendants sort contiguously after their ancestor.
            if last_root.is_some_and(|root| path.starts_with(root)) {
                continue;
            }
            roots.insert(path);
            last_root = Some(path);
        }
        roots
    }
}

impl FromIterator<PathBuf> for PathSet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a Path> for PathSet {
    fn from_iter<I: IntoIterator<Item = &'a Path>>(iter: I) -> Self {
        Self(iter.into_iter().map(Path::to_path_buf).collect())
    }
}

impl IntoIterator for PathSet {
    type Item = PathBuf;
    type IntoIter = std::collections::btree_set::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Contents of an output directory before and after compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryState {
    pub before: PathSet,
    pub after: PathSet,
}

impl DirectoryState {
    pub fn new(before: PathSet, after: PathSet) -> Self {
        Self { before, after }
    }

    /// Intermediate artifacts to remove once the bundle is written.
    ///
    /// Every path present after compilation that was not present before,
    /// excluding the bundle itself.
    pub fn deletion_set(&self, bundle: &Path) -> PathSet {
        self.after
            .iter()
            .filter(|path| *path != bundle && !self.before.contains(path))
            .collect()
    }
}
