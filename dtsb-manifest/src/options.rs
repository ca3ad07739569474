//! Invocation options and the validated bundle configuration.

use std::path::{Path, PathBuf};

use dtsbundle_core::{DECLARATION_SUFFIX, absolute};
use serde::{Deserialize, Serialize};

use crate::{CleanPolicy, Error, Result};

/// Bundle base name used when no `out_file_name` is given.
pub const DEFAULT_BUNDLE_NAME: &str = "types";

/// Options for one bundling pass, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Options {
    /// Directory holding the TypeScript sources.
    pub in_dir: PathBuf,
    /// Directory the declarations and the bundle are written to.
    pub out_dir: PathBuf,
    /// Bundle base name, without the `.d.ts` suffix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_file_name: Option<String>,
}

impl Options {
    pub fn new(in_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            in_dir: in_dir.into(),
            out_dir: out_dir.into(),
            out_file_name: None,
        }
    }

    /// Set the bundle base name.
    pub fn out_file_name(mut self, name: impl Into<String>) -> Self {
        self.out_file_name = Some(name.into());
        self
    }

    /// Validate with the default pre-clean policy and compiler.
    pub fn validate(&self) -> Result<BundleConfig> {
        BundleConfig::new(self, CleanPolicy::default(), CompilerSettings::default())
    }
}

/// How the declaration compiler is launched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerSettings {
    /// Program to execute (e.g. `tsc`, or `npx` with `args = ["tsc"]`).
    pub program: String,
    /// Arguments placed before the fixed declaration flags.
    pub args: Vec<String>,
}

impl CompilerSettings {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append prefix arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self::new("tsc")
    }
}

/// Validated, immutable configuration for one pass.
///
/// Directories are absolute and the bundle path is resolved, so nothing
/// downstream needs to fill in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleConfig {
    in_dir: PathBuf,
    out_dir: PathBuf,
    bundle_path: PathBuf,
    clean: CleanPolicy,
    compiler: CompilerSettings,
}

impl BundleConfig {
    /// Validate `options` together with the pre-clean policy and compiler.
    pub fn new(
        options: &Options,
        clean: CleanPolicy,
        compiler: CompilerSettings,
    ) -> Result<Self> {
        if options.in_dir.as_os_str().is_empty() {
            return Err(Box::new(Error::EmptyOption { name: "in_dir" }));
        }
        if options.out_dir.as_os_str().is_empty() {
            return Err(Box::new(Error::EmptyOption { name: "out_dir" }));
        }
        if compiler.program.trim().is_empty() {
            return Err(Box::new(Error::EmptyOption {
                name: "compiler.program",
            }));
        }

        let file_name = bundle_file_name(options.out_file_name.as_deref())?;
        let in_dir = resolve(&options.in_dir)?;
        let out_dir = resolve(&options.out_dir)?;

        if clean == CleanPolicy::OutDir && in_dir.starts_with(&out_dir) {
            return Err(Box::new(Error::OutDirContainsInput { out_dir, in_dir }));
        }

        let bundle_path = out_dir.join(file_name);
        Ok(Self {
            in_dir,
            out_dir,
            bundle_path,
            clean,
            compiler,
        })
    }

    pub fn in_dir(&self) -> &Path {
        &self.in_dir
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Absolute path of the bundle: `out_dir/<name>.d.ts`.
    pub fn bundle_path(&self) -> &Path {
        &self.bundle_path
    }

    pub fn clean(&self) -> CleanPolicy {
        self.clean
    }

    pub fn compiler(&self) -> &CompilerSettings {
        &self.compiler
    }
}

fn resolve(path: &Path) -> Result<PathBuf> {
    absolute(path).map_err(|source| {
        Box::new(Error::Resolve {
            path: path.to_path_buf(),
            source,
        })
    })
}

/// Check a bundle base name, returning the reason it is rejected.
pub fn validate_file_name(name: &str) -> Option<&'static str> {
    let stem = name.strip_suffix(DECLARATION_SUFFIX).unwrap_or(name);
    if stem.trim().is_empty() {
        return Some("the bundle name is empty");
    }
    if stem.contains(['/', '\\']) {
        return Some("use a plain file name; the bundle is always written to out_dir");
    }
    if stem == "." || stem == ".." {
        return Some("'.' and '..' are not file names");
    }
    if stem.contains('\0') {
        return Some("the bundle name contains a NUL byte");
    }
    None
}

/// The bundle file name: the base name plus the declaration suffix.
///
/// A name that already ends in `.d.ts` is used as is.
fn bundle_file_name(name: Option<&str>) -> Result<String> {
    let name = name.unwrap_or(DEFAULT_BUNDLE_NAME);
    if let Some(reason) = validate_file_name(name) {
        return Err(Box::new(Error::InvalidFileName {
            name: name.to_string(),
            reason: reason.to_string(),
        }));
    }
    let stem = name.strip_suffix(DECLARATION_SUFFIX).unwrap_or(name);
    Ok(format!("{}{}", stem, DECLARATION_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bundle_path() {
        let config = Options::new("/project/src", "/project/dist").validate().unwrap();

        assert_eq!(config.bundle_path(), Path::new("/project/dist/types.d.ts"));
        assert_eq!(config.in_dir(), Path::new("/project/src"));
        assert_eq!(config.out_dir(), Path::new("/project/dist"));
        assert_eq!(config.clean(), CleanPolicy::OutDir);
        assert_eq!(config.compiler().program, "tsc");
    }

    #[test]
    fn test_custom_bundle_name() {
        let config = Options::new("/p/src", "/p/dist")
            .out_file_name("index")
            .validate()
            .unwrap();

        assert_eq!(config.bundle_path(), Path::new("/p/dist/index.d.ts"));
    }

    #[test]
    fn test_bundle_name_with_suffix_is_not_doubled() {
        let config = Options::new("/p/src", "/p/dist")
            .out_file_name("index.d.ts")
            .validate()
            .unwrap();

        assert_eq!(config.bundle_path(), Path::new("/p/dist/index.d.ts"));
    }

    #[test]
    fn test_relative_directories_become_absolute() {
        let config = Options::new("src", "dist/types").validate().unwrap();
        let cwd = std::env::current_dir().unwrap();

        assert_eq!(config.in_dir(), cwd.join("src"));
        assert_eq!(config.bundle_path(), cwd.join("dist/types/types.d.ts"));
    }

    #[test]
    fn test_rejects_bundle_name_with_separator() {
        let err = Options::new("/p/src", "/p/dist")
            .out_file_name("../escape")
            .validate()
            .unwrap_err();

        assert!(matches!(*err, Error::InvalidFileName { .. }));
    }

    #[test]
    fn test_rejects_empty_bundle_name() {
        for name in ["", "  ", ".d.ts"] {
            let err = Options::new("/p/src", "/p/dist")
                .out_file_name(name)
                .validate()
                .unwrap_err();
            assert!(matches!(*err, Error::InvalidFileName { .. }), "{name:?}");
        }
    }

    #[test]
    fn test_rejects_empty_directories() {
        let err = Options::new("", "/p/dist").validate().unwrap_err();
        assert!(matches!(*err, Error::EmptyOption { name: "in_dir" }));

        let err = Options::new("/p/src", "").validate().unwrap_err();
        assert!(matches!(*err, Error::EmptyOption { name: "out_dir" }));
    }

    #[test]
    fn test_rejects_empty_compiler_program() {
        let err = BundleConfig::new(
            &Options::new("/p/src", "/p/dist"),
            CleanPolicy::OutDir,
            CompilerSettings::new(" "),
        )
        .unwrap_err();

        assert!(matches!(
            *err,
            Error::EmptyOption {
                name: "compiler.program"
            }
        ));
    }

    #[test]
    fn test_out_dir_clean_refuses_to_contain_sources() {
        let err = Options::new("/p/src", "/p").validate().unwrap_err();
        assert!(matches!(*err, Error::OutDirContainsInput { .. }));

        let err = Options::new("/p/src", "/p/src").validate().unwrap_err();
        assert!(matches!(*err, Error::OutDirContainsInput { .. }));
    }

    #[test]
    fn test_other_policies_allow_shared_directories() {
        let config = BundleConfig::new(
            &Options::new("/p/src", "/p"),
            CleanPolicy::Bundle,
            CompilerSettings::default(),
        )
        .unwrap();

        assert_eq!(config.bundle_path(), Path::new("/p/types.d.ts"));
    }

    #[test]
    fn test_sibling_directories_are_not_nested() {
        let config = Options::new("/p/src", "/p/src-types").validate().unwrap();
        assert_eq!(config.out_dir(), Path::new("/p/src-types"));
    }

    #[test]
    fn test_compiler_settings_args() {
        let settings = CompilerSettings::new("npx").args(["tsc"]);
        assert_eq!(settings.program, "npx");
        assert_eq!(settings.args, vec!["tsc".to_string()]);
    }

    #[test]
    fn test_options_deserialize_without_file_name() {
        let options: Options = toml::from_str("in_dir = \"src\"\nout_dir = \"dist\"").unwrap();
        assert_eq!(options, Options::new("src", "dist"));
    }
}
