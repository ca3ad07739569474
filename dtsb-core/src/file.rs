use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Write `content` to `path` as a single buffer.
///
/// Missing parent directories are created first. The content lands in a
/// temporary sibling file that is renamed over `path` once fully written, so
/// readers never observe a partially written file.
///
/// The result has the permissions `std::fs::write` would give it: those of
/// the file being replaced, or the default mode under the process umask.
pub fn write_file(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;
    let existing = std::fs::metadata(path)
        .ok()
        .filter(|meta| meta.is_file())
        .map(|meta| meta.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".dtsb-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Same creation mode as `File::create`; the umask still applies.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// The merged declaration file produced by a pass.
#[derive(Debug, Clone)]
pub struct Bundle {
    path: PathBuf,
    content: String,
}

impl Bundle {
    /// Create a bundle for the given path and merged content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the bundle path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the merged content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the bundle exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the bundle, replacing any previous file at its path.
    pub fn write(&self) -> io::Result<()> {
        write_file(&self.path, &self.content)
    }
}
