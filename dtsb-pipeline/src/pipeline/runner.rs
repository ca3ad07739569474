//! Pipeline orchestrator.

use std::sync::Arc;

use dtsbundle_manifest::BundleConfig;
use eyre::Result;

use super::{
    Phase, PhaseInfo, Plugin, ReconcileContext,
    phases::{CleanPhase, CompilePhase, MergePhase, PrunePhase, SnapshotPhase},
};
use crate::{DeclarationCompiler, Tsc};

/// The reconciliation pipeline orchestrator.
///
/// Runs the built-in phases followed by any user phases, calling plugin
/// hooks before and after each phase. The first fatal error stops the pass;
/// since pruning is the last built-in phase, a failed compile or merge never
/// deletes anything.
///
/// # Example
///
/// ```ignore
/// let ctx = Pipeline::new()
///     .plugin(TracingPlugin::new())
///     .run(config)
///     .await?;
/// ```
pub struct Pipeline {
    compiler: Option<Arc<dyn DeclarationCompiler>>,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a pipeline that compiles with the configured `tsc` settings.
    pub fn new() -> Self {
        Self {
            compiler: None,
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Use `compiler` instead of the configured one.
    pub fn compiler(mut self, compiler: impl DeclarationCompiler + 'static) -> Self {
        self.compiler = Some(Arc::new(compiler));
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Names and descriptions of the built-in phases, in execution order.
    pub fn builtin_phases() -> Vec<PhaseInfo> {
        Self::builtins(Arc::new(Tsc::default()))
            .iter()
            .map(|phase| phase.info())
            .collect()
    }

    fn builtins(compiler: Arc<dyn DeclarationCompiler>) -> Vec<Box<dyn Phase>> {
        vec![
            Box::new(CleanPhase),
            Box::new(SnapshotPhase::before()),
            Box::new(CompilePhase::new(compiler)),
            Box::new(MergePhase),
            Box::new(SnapshotPhase::after()),
            Box::new(PrunePhase),
        ]
    }

    /// Run one pass for `config`.
    ///
    /// Executes all phases in order:
    /// 1. CleanPhase - removes stale output per the clean policy
    /// 2. SnapshotPhase::before - records the output directory
    /// 3. CompilePhase - emits declarations
    /// 4. MergePhase - writes the bundle
    /// 5. SnapshotPhase::after - records the output directory again
    /// 6. PrunePhase - removes the intermediates
    /// 7. User phases (if any)
    ///
    /// # Errors
    ///
    /// Returns an error if any phase or plugin hook fails fatally.
    pub async fn run(&self, config: BundleConfig) -> Result<ReconcileContext> {
        let compiler: Arc<dyn DeclarationCompiler> = match &self.compiler {
            Some(compiler) => Arc::clone(compiler),
            None => Arc::new(Tsc::new(config.compiler().clone())),
        };
        let mut ctx = ReconcileContext::new(config);

        let builtin_phases = Self::builtins(compiler);
        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx).await?;
        }

        Ok(ctx)
    }

    async fn run_phase(&self, phase: &dyn Phase, ctx: &mut ReconcileContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx).await?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
