use std::path::{Path, PathBuf};

use crate::{BundleConfig, Manifest, Overrides, Result};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "dtsb.toml";

/// Represents a dtsb.toml file with both raw content and parsed manifest.
pub struct DtsbToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl DtsbToml {
    /// Open and parse a dtsb.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Directory that relative paths in the file resolve against.
    pub fn base_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Combine the file with command-line overrides into a validated config.
    pub fn configure(&self, overrides: &Overrides) -> Result<BundleConfig> {
        self.manifest.configure(self.base_dir(), overrides)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::Error;

    #[test]
    fn test_open_and_configure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "[bundle]\nin_dir = \"src\"\nout_dir = \"dist\"\nout_file_name = \"index\"\n",
        )
        .unwrap();

        let file = DtsbToml::open(&path).unwrap();
        let config = file.configure(&Overrides::default()).unwrap();

        assert_eq!(file.path(), path);
        assert!(file.content().contains("[bundle]"));
        assert_eq!(file.base_dir(), temp.path());
        assert_eq!(config.bundle_path(), temp.path().join("dist/index.d.ts"));
    }

    #[test]
    fn test_open_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = DtsbToml::open(temp.path().join(CONFIG_FILE_NAME))
            .err()
            .unwrap();
        assert!(matches!(*err, Error::Io { .. }));
    }

    #[test]
    fn test_base_dir_of_bare_file_name() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "").unwrap();
        let mut file = DtsbToml::open(&path).unwrap();
        file.path = PathBuf::from(CONFIG_FILE_NAME);

        assert_eq!(file.base_dir(), Path::new("."));
    }
}
