//! Prune phase - removes intermediate artifacts.

use std::path::PathBuf;

use async_trait::async_trait;
use dtsbundle_core::DirectoryState;
use eyre::{Result, bail};
use tokio::task::JoinSet;

use crate::{
    Error, Removal,
    pipeline::{Diagnostic, Phase, ReconcileContext},
    remove_path,
};

/// Phase that deletes every path created since the `before` snapshot,
/// except the bundle.
///
/// Nested entries are collapsed into their top-most scheduled ancestor, and
/// each root is removed independently. A failed removal is a warning, never
/// an error.
pub struct PrunePhase;

#[async_trait]
impl Phase for PrunePhase {
    fn name(&self) -> &'static str {
        "prune"
    }

    fn description(&self) -> &'static str {
        "Remove intermediate declaration files"
    }

    async fn run(&self, ctx: &mut ReconcileContext) -> Result<()> {
        let (Some(before), Some(after)) = (ctx.before.take(), ctx.after.take()) else {
            bail!("prune requires both directory snapshots");
        };
        let state = DirectoryState::new(before, after);
        let roots = state.deletion_set(ctx.bundle_path()).roots();
        tracing::debug!(entries = roots.len(), "removing intermediates");

        let mut tasks = JoinSet::new();
        for path in roots {
            tasks.spawn(async move {
                let removal = remove_path(&path).await;
                (path, removal)
            });
        }

        let mut removals: Vec<(PathBuf, Removal)> = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            removals.push(joined.map_err(Error::from)?);
        }
        removals.sort_by(|a, b| a.0.cmp(&b.0));

        for (path, removal) in &removals {
            if let Some(error) = removal.error() {
                tracing::warn!(path = %path.display(), %error, "could not remove intermediate");
                ctx.add_diagnostic(
                    Diagnostic::warning(self.name(), format!("could not remove: {error}"))
                        .at(path),
                );
            }
        }

        ctx.before = Some(state.before);
        ctx.after = Some(state.after);
        ctx.removals = removals;
        Ok(())
    }
}
