//! Clean phase - removes output left over from a previous pass.

use async_trait::async_trait;
use dtsbundle_manifest::CleanPolicy;
use eyre::Result;

use crate::{
    pipeline::{Diagnostic, Phase, ReconcileContext},
    remove_path,
};

/// Phase that removes stale output before anything is snapshotted.
///
/// Failure never aborts the pass; the outcome is stored on the context and
/// a failed removal is reported as a warning.
pub struct CleanPhase;

#[async_trait]
impl Phase for CleanPhase {
    fn name(&self) -> &'static str {
        "clean"
    }

    fn description(&self) -> &'static str {
        "Remove stale output"
    }

    async fn run(&self, ctx: &mut ReconcileContext) -> Result<()> {
        let target = match ctx.config.clean() {
            CleanPolicy::OutDir => ctx.config.out_dir().to_path_buf(),
            CleanPolicy::Bundle => ctx.config.bundle_path().to_path_buf(),
            CleanPolicy::None => return Ok(()),
        };

        let removal = remove_path(&target).await;
        if let Some(error) = removal.error() {
            tracing::warn!(path = %target.display(), %error, "pre-clean failed");
            ctx.add_diagnostic(
                Diagnostic::warning(self.name(), format!("could not remove stale output: {error}"))
                    .at(&target),
            );
        } else {
            tracing::debug!(path = %target.display(), ?removal, "pre-clean");
        }
        ctx.pre_clean = Some(removal);
        Ok(())
    }
}
