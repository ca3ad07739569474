//! Merge phase - combines emitted declarations into the bundle.

use std::path::PathBuf;

use async_trait::async_trait;
use dtsbundle_core::{Bundle, DeclarationArtifact, find_declarations, merge};
use eyre::Result;
use tokio::task::JoinSet;

use crate::{
    Error,
    pipeline::{Diagnostic, Phase, ReconcileContext},
};

/// Phase that reads every declaration file, merges them and writes the
/// bundle.
///
/// Files are read concurrently but merged in sorted path order. A bundle left
/// over from an earlier pass (present in the `before` snapshot) is not an
/// input; a declaration the compiler emitted under the bundle name is. Any
/// read or write failure aborts the pass.
pub struct MergePhase;

#[async_trait]
impl Phase for MergePhase {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn description(&self) -> &'static str {
        "Merge declarations and write the bundle"
    }

    async fn run(&self, ctx: &mut ReconcileContext) -> Result<()> {
        let out_dir = ctx.config.out_dir().to_path_buf();
        let bundle_path = ctx.bundle_path().to_path_buf();

        let mut paths = list_declarations(out_dir).await?;
        let stale_bundle = ctx
            .before
            .as_ref()
            .is_some_and(|before| before.contains(&bundle_path));
        if stale_bundle {
            paths.retain(|path| *path != bundle_path);
        }
        if paths.is_empty() {
            tracing::warn!(out_dir = %ctx.config.out_dir().display(), "no declaration files were emitted");
            ctx.add_warning(self.name(), "no declaration files were emitted; the bundle is empty");
        }

        let artifacts = read_all(&paths).await?;
        let bundle = Bundle::new(&bundle_path, merge(&artifacts));

        let written = bundle.clone();
        tokio::task::spawn_blocking(move || written.write())
            .await
            .map_err(Error::from)?
            .map_err(|source| Error::Write {
                path: bundle_path,
                source,
            })?;

        tracing::info!(
            bundle = %bundle.path().display(),
            declarations = paths.len(),
            bytes = bundle.content().len(),
            "bundle written"
        );
        ctx.add_diagnostic(
            Diagnostic::info(
                self.name(),
                format!("bundle written from {} declaration files", paths.len()),
            )
            .at(bundle.path()),
        );
        ctx.declarations = paths;
        ctx.bundle = Some(bundle);
        Ok(())
    }
}

/// Declaration files under `out_dir`; a missing directory has none.
async fn list_declarations(out_dir: PathBuf) -> Result<Vec<PathBuf>, Error> {
    let exists = tokio::fs::try_exists(&out_dir)
        .await
        .map_err(|source| Error::List {
            path: out_dir.clone(),
            source,
        })?;
    if !exists {
        return Ok(Vec::new());
    }
    let root = out_dir.clone();
    tokio::task::spawn_blocking(move || find_declarations(&root))
        .await?
        .map_err(|source| Error::List {
            path: out_dir,
            source,
        })
}

/// Read every file concurrently, returning artifacts in the order of `paths`.
async fn read_all(paths: &[PathBuf]) -> Result<Vec<DeclarationArtifact>, Error> {
    let mut tasks = JoinSet::new();
    for (index, path) in paths.iter().cloned().enumerate() {
        tasks.spawn(async move {
            let content = tokio::fs::read_to_string(&path).await;
            (index, path, content)
        });
    }

    let mut slots: Vec<Option<DeclarationArtifact>> = vec![None; paths.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, path, content) = joined?;
        let content = content.map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?;
        slots[index] = Some(DeclarationArtifact::new(path, content));
    }
    Ok(slots.into_iter().flatten().collect())
}
