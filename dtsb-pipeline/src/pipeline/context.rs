//! Per-pass state passed through pipeline phases.

use std::path::{Path, PathBuf};

use dtsbundle_core::{Bundle, PathSet};
use dtsbundle_manifest::BundleConfig;

use super::diagnostic::{Diagnostic, Severity};
use crate::Removal;

/// Context passed through all pipeline phases.
///
/// Created fresh for every pass and dropped (or reported) when it ends.
/// Phases fill in their slot in execution order.
#[derive(Debug)]
pub struct ReconcileContext {
    /// The validated configuration for this pass.
    pub config: BundleConfig,
    /// Outcome of the pre-clean (populated by CleanPhase, unless disabled).
    pub pre_clean: Option<Removal>,
    /// Output directory contents before compilation.
    pub before: Option<PathSet>,
    /// Output directory contents after the bundle was written.
    pub after: Option<PathSet>,
    /// Text the compiler printed on success.
    pub compiler_output: Option<String>,
    /// Declaration files merged into the bundle, in merge order.
    pub declarations: Vec<PathBuf>,
    /// The written bundle (populated by MergePhase).
    pub bundle: Option<Bundle>,
    /// Outcome of every intermediate removal, sorted by path.
    pub removals: Vec<(PathBuf, Removal)>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ReconcileContext {
    pub fn new(config: BundleConfig) -> Self {
        Self {
            config,
            pre_clean: None,
            before: None,
            after: None,
            compiler_output: None,
            declarations: Vec::new(),
            bundle: None,
            removals: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn bundle_path(&self) -> &Path {
        self.config.bundle_path()
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Intermediates that were scheduled and are gone now.
    pub fn removed(&self) -> impl Iterator<Item = &Path> {
        self.removals
            .iter()
            .filter(|(_, removal)| removal.is_success())
            .map(|(path, _)| path.as_path())
    }

    /// Intermediates that could not be removed.
    pub fn failed_removals(&self) -> impl Iterator<Item = (&Path, &Removal)> {
        self.removals
            .iter()
            .filter(|(_, removal)| removal.is_failure())
            .map(|(path, removal)| (path.as_path(), removal))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use dtsbundle_manifest::Options;

    use super::*;

    fn make_context() -> ReconcileContext {
        let config = Options::new("/p/src", "/p/dist").validate().unwrap();
        ReconcileContext::new(config)
    }

    #[test]
    fn test_context_creation() {
        let ctx = make_context();

        assert!(ctx.before.is_none());
        assert!(ctx.after.is_none());
        assert!(ctx.bundle.is_none());
        assert!(ctx.diagnostics.is_empty());
        assert_eq!(ctx.bundle_path(), Path::new("/p/dist/types.d.ts"));
    }

    #[test]
    fn test_context_diagnostics() {
        let mut ctx = make_context();

        ctx.add_warning("prune", "could not remove");
        ctx.add_diagnostic(Diagnostic::info("merge", "bundle written").at("/p/dist/types.d.ts"));

        assert!(ctx.has_warnings());
        assert_eq!(ctx.diagnostics.len(), 2);
        assert_eq!(ctx.warning_count(), 1);
        assert_eq!(ctx.warnings().count(), 1);
    }

    #[test]
    fn test_removal_partition() {
        let mut ctx = make_context();
        ctx.removals = vec![
            (PathBuf::from("/p/dist/a.d.ts"), Removal::Removed),
            (PathBuf::from("/p/dist/b.d.ts"), Removal::AlreadyGone),
            (
                PathBuf::from("/p/dist/c.d.ts"),
                Removal::Failed(io::Error::from(io::ErrorKind::PermissionDenied)),
            ),
        ];

        assert_eq!(ctx.removed().count(), 2);
        let failed: Vec<_> = ctx.failed_removals().map(|(p, _)| p).collect();
        assert_eq!(failed, vec![Path::new("/p/dist/c.d.ts")]);
    }
}
