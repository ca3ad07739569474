//! Configuration lookup.

use std::path::{Path, PathBuf};

use dtsbundle_manifest::{BundleConfig, CONFIG_FILE_NAME, DtsbToml, Manifest, Overrides, Result};

/// A validated configuration and the file it came from.
#[derive(Debug)]
pub struct LoadedConfig {
    /// The dtsb.toml that was read, if any.
    pub source: Option<PathBuf>,
    pub config: BundleConfig,
}

/// Resolve the configuration for one invocation.
///
/// An explicit `path` must exist. Without one, `./dtsb.toml` is used when
/// present; otherwise everything comes from `overrides`.
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<LoadedConfig> {
    let default_path = Path::new(CONFIG_FILE_NAME);
    let path = match path {
        Some(path) => Some(path),
        None if default_path.is_file() => Some(default_path),
        None => None,
    };

    match path {
        Some(path) => {
            let file = DtsbToml::open(path)?;
            Ok(LoadedConfig {
                source: Some(file.path().to_path_buf()),
                config: file.configure(overrides)?,
            })
        }
        None => Ok(LoadedConfig {
            source: None,
            config: Manifest::default().configure(Path::new("."), overrides)?,
        }),
    }
}
