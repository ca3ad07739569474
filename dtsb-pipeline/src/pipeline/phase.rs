//! Pipeline phase trait.

use async_trait::async_trait;
use eyre::Result;

use super::ReconcileContext;

/// Information about a pipeline phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseInfo {
    /// The phase name.
    pub name: &'static str,
    /// A human-readable description.
    pub description: &'static str,
}

/// A phase in the reconciliation pipeline.
///
/// Phases are executed in order by the pipeline. Each phase reads what
/// earlier phases left in the context and fills in its own slot.
///
/// Built-in phases:
/// - `CleanPhase` - removes stale output according to the clean policy
/// - `SnapshotPhase::before` - records the output directory before compiling
/// - `CompilePhase` - runs the declaration compiler
/// - `MergePhase` - merges the emitted declarations and writes the bundle
/// - `SnapshotPhase::after` - records the output directory after the write
/// - `PrunePhase` - removes every new path except the bundle
#[async_trait]
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the pass context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally; later phases do not
    /// run. Non-fatal issues should be recorded as diagnostics instead.
    async fn run(&self, ctx: &mut ReconcileContext) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
