//! Declaration compiler invocation.
//!
//! The compiler is an external collaborator: the pipeline only needs it to
//! populate the output directory with one declaration file per source. The
//! [`DeclarationCompiler`] trait is the seam; [`Tsc`] runs the TypeScript
//! compiler.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use dtsbundle_manifest::CompilerSettings;
use tokio::process::Command;
use walkdir::WalkDir;

use crate::Error;

/// Flags that make `tsc` emit declarations only.
pub const DECLARATION_FLAGS: &[&str] = &[
    "--emitDeclarationOnly",
    "--declaration",
    "--allowJs",
    "--emitDecoratorMetadata",
    "--experimentalDecorators",
    "--moduleResolution",
    "node",
];

/// Something that emits declaration files for a source tree.
#[async_trait]
pub trait DeclarationCompiler: Send + Sync {
    /// Name used in logs and reports.
    fn name(&self) -> &str;

    /// Emit declarations for the sources in `in_dir` into `out_dir`.
    ///
    /// Returns the compiler's output text on success.
    ///
    /// # Errors
    ///
    /// Any error aborts the pass; no bundle is written and nothing is
    /// deleted.
    async fn compile(&self, in_dir: &Path, out_dir: &Path) -> Result<String, Error>;
}

/// The TypeScript compiler.
#[derive(Debug, Clone, Default)]
pub struct Tsc {
    settings: CompilerSettings,
}

impl Tsc {
    pub fn new(settings: CompilerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    /// Full argument list: prefix args, declaration flags, `--outDir`, sources.
    pub fn args(&self, out_dir: &Path, sources: &[PathBuf]) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.settings.args.iter().map(OsString::from).collect();
        args.extend(DECLARATION_FLAGS.iter().map(OsString::from));
        args.push("--outDir".into());
        args.push(out_dir.as_os_str().to_owned());
        args.extend(sources.iter().map(|p| p.as_os_str().to_owned()));
        args
    }

    /// Render the command line for display.
    pub fn display_command(&self, out_dir: &Path, in_dir: &Path) -> String {
        let mut parts = vec![self.settings.program.clone()];
        parts.extend(self.settings.args.iter().cloned());
        parts.extend(DECLARATION_FLAGS.iter().map(|s| s.to_string()));
        parts.push("--outDir".to_string());
        parts.push(out_dir.display().to_string());
        parts.push(format!("{}/**/*.ts", in_dir.display()));
        parts.join(" ")
    }
}

/// Every `.ts` file below `in_dir`, sorted. `node_modules` is skipped.
pub fn find_sources(in_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    let walker = WalkDir::new(in_dir)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| e.file_name() != "node_modules");
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "ts")
        {
            sources.push(entry.into_path());
        }
    }
    sources.sort();
    Ok(sources)
}

#[async_trait]
impl DeclarationCompiler for Tsc {
    fn name(&self) -> &str {
        &self.settings.program
    }

    async fn compile(&self, in_dir: &Path, out_dir: &Path) -> Result<String, Error> {
        let dir = in_dir.to_path_buf();
        let sources = tokio::task::spawn_blocking(move || find_sources(&dir))
            .await?
            .map_err(|source| Error::List {
                path: in_dir.to_path_buf(),
                source,
            })?;
        if sources.is_empty() {
            return Err(Error::NoSources {
                in_dir: in_dir.to_path_buf(),
            });
        }

        tracing::debug!(
            program = %self.settings.program,
            sources = sources.len(),
            "running declaration compiler"
        );
        let output = Command::new(&self.settings.program)
            .args(self.args(out_dir, &sources))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| Error::Spawn {
                program: self.settings.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(Error::Compile {
                status: output.status,
                output: format!("{}{}", stdout, stderr),
            });
        }

        Ok(if stdout.is_empty() {
            stderr.into_owned()
        } else {
            stdout.into_owned()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_args_order() {
        let tsc = Tsc::new(CompilerSettings::new("npx").args(["tsc"]));
        let args = tsc.args(
            Path::new("/p/dist"),
            &[PathBuf::from("/p/src/a.ts"), PathBuf::from("/p/src/b.ts")],
        );

        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "tsc",
                "--emitDeclarationOnly",
                "--declaration",
                "--allowJs",
                "--emitDecoratorMetadata",
                "--experimentalDecorators",
                "--moduleResolution",
                "node",
                "--outDir",
                "/p/dist",
                "/p/src/a.ts",
                "/p/src/b.ts",
            ]
        );
    }

    #[test]
    fn test_display_command() {
        let tsc = Tsc::default();
        assert_eq!(tsc.name(), "tsc");
        assert_eq!(
            tsc.display_command(Path::new("/p/dist"), Path::new("/p/src")),
            "tsc --emitDeclarationOnly --declaration --allowJs --emitDecoratorMetadata \
             --experimentalDecorators --moduleResolution node --outDir /p/dist /p/src/**/*.ts"
        );
    }

    #[test]
    fn test_find_sources() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("lib")).unwrap();
        fs::create_dir_all(root.join("node_modules/dep")).unwrap();
        fs::write(root.join("index.ts"), "").unwrap();
        fs::write(root.join("lib/util.ts"), "").unwrap();
        fs::write(root.join("lib/legacy.js"), "").unwrap();
        fs::write(root.join("node_modules/dep/index.ts"), "").unwrap();

        let sources = find_sources(root).unwrap();

        assert_eq!(sources, vec![root.join("index.ts"), root.join("lib/util.ts")]);
    }

    #[tokio::test]
    async fn test_compile_without_sources() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        let err = Tsc::default()
            .compile(src.path(), out.path())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoSources { .. }));
    }

    #[tokio::test]
    async fn test_compile_missing_program() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(src.path().join("index.ts"), "export const a = 1;").unwrap();

        let err = Tsc::new(CompilerSettings::new("dtsb-no-such-compiler"))
            .compile(src.path(), out.path())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_compile_nonzero_exit() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(src.path().join("index.ts"), "export const a = 1;").unwrap();

        let err = Tsc::new(CompilerSettings::new("false"))
            .compile(src.path(), out.path())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Compile { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_compile_returns_output() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(src.path().join("index.ts"), "export const a = 1;").unwrap();

        let output = Tsc::new(CompilerSettings::new("echo"))
            .compile(src.path(), out.path())
            .await
            .unwrap();

        assert!(output.starts_with("--emitDeclarationOnly"));
    }
}
