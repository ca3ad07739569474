//! Pipeline plugin trait for extensibility.

use eyre::Result;

use super::ReconcileContext;

/// A plugin that can hook into the reconciliation pipeline.
///
/// Plugins receive callbacks before and after each phase runs, allowing
/// them to inspect or modify the pass context. A host build tool uses this
/// seam to observe a pass; [`TracingPlugin`](super::TracingPlugin) is the
/// built-in example.
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called before a phase runs.
    ///
    /// # Errors
    ///
    /// Return an error to abort the pass.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut ReconcileContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes successfully.
    ///
    /// # Errors
    ///
    /// Return an error to abort the pass.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut ReconcileContext) -> Result<()> {
        Ok(())
    }
}
