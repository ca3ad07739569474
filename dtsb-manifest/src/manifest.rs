//! The dtsb.toml schema and how it combines with command-line overrides.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::{
    BundleConfig, CleanPolicy, CompilerSettings, Error, Options, Result,
    error::SourceContext, options::validate_file_name,
};

/// Root schema for dtsb.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Where declarations come from and where the bundle goes
    #[serde(default)]
    pub bundle: BundleSection,

    /// How the declaration compiler is launched
    #[serde(default)]
    pub compiler: CompilerSettings,
}

/// The `[bundle]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleSection {
    pub in_dir: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub out_file_name: Option<String>,
    pub clean: Option<CleanPolicy>,
}

/// Values given on the command line, taking precedence over dtsb.toml.
///
/// Relative paths here resolve against the working directory, while
/// relative paths in the file resolve against the file's directory.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub in_dir: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub out_file_name: Option<String>,
    pub clean: Option<CleanPolicy>,
    /// Replaces both the compiler program and its prefix arguments.
    pub program: Option<String>,
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "dtsb.toml")
    }
}

impl Manifest {
    /// Parse dtsb.toml content with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let source_ctx = SourceContext::new(content, filename);
        let manifest: Manifest =
            toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
        manifest.validate(&source_ctx)?;
        Ok(manifest)
    }

    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        if let Some(name) = &self.bundle.out_file_name
            && let Some(reason) = validate_file_name(name)
        {
            return Err(ctx.validation_error_at_key(
                format!("invalid bundle file name: {}", reason),
                "out_file_name",
            ));
        }
        for (key, value) in [("in_dir", &self.bundle.in_dir), ("out_dir", &self.bundle.out_dir)] {
            if value.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                return Err(ctx.validation_error_at_key(format!("{} must not be empty", key), key));
            }
        }
        if self.compiler.program.trim().is_empty() {
            return Err(ctx.validation_error_at_key("compiler program must not be empty", "program"));
        }
        Ok(())
    }

    /// Combine this manifest with `overrides` into a validated configuration.
    ///
    /// `base_dir` is the directory relative paths from the file resolve
    /// against.
    pub fn configure(&self, base_dir: &Path, overrides: &Overrides) -> Result<BundleConfig> {
        let from_file = |path: &Option<PathBuf>| path.as_ref().map(|p| base_dir.join(p));

        let in_dir = overrides
            .in_dir
            .clone()
            .or_else(|| from_file(&self.bundle.in_dir))
            .ok_or_else(|| {
                Box::new(Error::MissingOption {
                    name: "in_dir",
                    flag: "in-dir",
                })
            })?;
        let out_dir = overrides
            .out_dir
            .clone()
            .or_else(|| from_file(&self.bundle.out_dir))
            .ok_or_else(|| {
                Box::new(Error::MissingOption {
                    name: "out_dir",
                    flag: "out-dir",
                })
            })?;
        let out_file_name = overrides
            .out_file_name
            .clone()
            .or_else(|| self.bundle.out_file_name.clone());

        let clean = overrides.clean.or(self.bundle.clean).unwrap_or_default();
        let compiler = match &overrides.program {
            Some(program) => CompilerSettings::new(program.clone()),
            None => self.compiler.clone(),
        };

        let options = Options {
            in_dir,
            out_dir,
            out_file_name,
        };
        BundleConfig::new(&options, clean, compiler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = Manifest::from_str(
            r#"
            [bundle]
            in_dir = "src"
            out_dir = "dist/types"
            out_file_name = "index"
            clean = "bundle"

            [compiler]
            program = "npx"
            args = ["tsc"]
            "#,
        )
        .unwrap();

        assert_eq!(manifest.bundle.in_dir, Some(PathBuf::from("src")));
        assert_eq!(manifest.bundle.out_file_name.as_deref(), Some("index"));
        assert_eq!(manifest.bundle.clean, Some(CleanPolicy::Bundle));
        assert_eq!(manifest.compiler, CompilerSettings::new("npx").args(["tsc"]));
    }

    #[test]
    fn test_parse_empty_manifest_uses_defaults() {
        let manifest = Manifest::from_str("").unwrap();
        assert!(manifest.bundle.in_dir.is_none());
        assert_eq!(manifest.compiler, CompilerSettings::default());
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let err = Manifest::from_str("[bundle]\nindir = \"src\"\n").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_parse_rejects_unknown_compiler_fields() {
        let err = Manifest::from_str("[compiler]\nprogam = \"npx\"\n").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_parse_rejects_unknown_clean_policy() {
        let err = Manifest::from_str("[bundle]\nclean = \"sometimes\"\n").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_validate_bundle_name_with_span() {
        let err = Manifest::from_str("[bundle]\nout_file_name = \"a/b\"\n").unwrap_err();
        match *err {
            Error::Validation { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_empty_program() {
        let err = Manifest::from_str("[compiler]\nprogram = \"\"\n").unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_configure_resolves_against_base_dir() {
        let manifest =
            Manifest::from_str("[bundle]\nin_dir = \"src\"\nout_dir = \"dist\"\n").unwrap();

        let config = manifest
            .configure(Path::new("/project"), &Overrides::default())
            .unwrap();

        assert_eq!(config.in_dir(), Path::new("/project/src"));
        assert_eq!(config.bundle_path(), Path::new("/project/dist/types.d.ts"));
    }

    #[test]
    fn test_configure_overrides_take_precedence() {
        let manifest = Manifest::from_str(
            "[bundle]\nin_dir = \"src\"\nout_dir = \"dist\"\nout_file_name = \"a\"\nclean = \"none\"\n\n[compiler]\nprogram = \"npx\"\nargs = [\"tsc\"]\n",
        )
        .unwrap();
        let overrides = Overrides {
            out_dir: Some(PathBuf::from("/elsewhere")),
            out_file_name: Some("b".into()),
            clean: Some(CleanPolicy::Bundle),
            program: Some("/usr/local/bin/tsc".into()),
            ..Overrides::default()
        };

        let config = manifest.configure(Path::new("/project"), &overrides).unwrap();

        assert_eq!(config.in_dir(), Path::new("/project/src"));
        assert_eq!(config.bundle_path(), Path::new("/elsewhere/b.d.ts"));
        assert_eq!(config.clean(), CleanPolicy::Bundle);
        assert_eq!(config.compiler(), &CompilerSettings::new("/usr/local/bin/tsc"));
    }

    #[test]
    fn test_configure_missing_directories() {
        let err = Manifest::default()
            .configure(Path::new("/project"), &Overrides::default())
            .unwrap_err();

        assert!(matches!(*err, Error::MissingOption { name: "in_dir", .. }));
    }
}
