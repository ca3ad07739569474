//! Bundle operation - one reconciliation pass.

use dtsbundle_pipeline::pipeline::{Pipeline, TracingPlugin};
use eyre::{Context, Result};

use super::LoadedConfig;
use crate::reports::{BundleReport, FailedRemoval};

/// Execute the bundle operation.
///
/// Runs the pipeline for the loaded configuration and summarizes the pass.
pub async fn bundle(loaded: LoadedConfig) -> Result<BundleReport> {
    let bundle_path = loaded.config.bundle_path().to_path_buf();
    let ctx = Pipeline::new()
        .plugin(TracingPlugin::new())
        .run(loaded.config)
        .await
        .wrap_err_with(|| format!("Failed to bundle {}", bundle_path.display()))?;

    let warnings = ctx
        .warnings()
        .map(|diag| match &diag.path {
            Some(path) => format!("{} ({})", diag.message, path.display()),
            None => diag.message.clone(),
        })
        .collect();
    let removed = ctx.removed().map(|path| path.to_path_buf()).collect();
    let failed = ctx
        .failed_removals()
        .map(|(path, removal)| FailedRemoval {
            path: path.to_path_buf(),
            error: removal
                .error()
                .map(ToString::to_string)
                .unwrap_or_default(),
        })
        .collect();

    Ok(BundleReport {
        config_path: loaded.source,
        bundle_path,
        declarations: ctx.declarations,
        removed,
        failed,
        warnings,
        compiler_output: ctx.compiler_output.filter(|out| !out.trim().is_empty()),
    })
}
