//! Snapshot phases - record the output directory contents.

use async_trait::async_trait;
use dtsbundle_core::{snapshot, snapshot_or_empty};
use eyre::Result;

use crate::{
    Error,
    pipeline::{Phase, ReconcileContext},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Moment {
    Before,
    After,
}

/// Phase that lists the output directory into the context.
///
/// The `before` listing treats a missing directory as empty; the `after`
/// listing runs once the bundle exists, so a missing directory is an error.
pub struct SnapshotPhase {
    moment: Moment,
}

impl SnapshotPhase {
    pub fn before() -> Self {
        Self {
            moment: Moment::Before,
        }
    }

    pub fn after() -> Self {
        Self {
            moment: Moment::After,
        }
    }
}

#[async_trait]
impl Phase for SnapshotPhase {
    fn name(&self) -> &'static str {
        match self.moment {
            Moment::Before => "snapshot-before",
            Moment::After => "snapshot-after",
        }
    }

    fn description(&self) -> &'static str {
        match self.moment {
            Moment::Before => "Record the output directory before compiling",
            Moment::After => "Record the output directory after writing the bundle",
        }
    }

    async fn run(&self, ctx: &mut ReconcileContext) -> Result<()> {
        let out_dir = ctx.config.out_dir().to_path_buf();
        let moment = self.moment;
        let root = out_dir.clone();
        let paths = tokio::task::spawn_blocking(move || match moment {
            Moment::Before => snapshot_or_empty(&root),
            Moment::After => snapshot(&root),
        })
        .await
        .map_err(Error::from)?
        .map_err(|source| Error::Snapshot {
            path: out_dir,
            source,
        })?;

        tracing::debug!(phase = self.name(), entries = paths.len(), "snapshot taken");
        match self.moment {
            Moment::Before => ctx.before = Some(paths),
            Moment::After => ctx.after = Some(paths),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use dtsbundle_manifest::Options;
    use tempfile::TempDir;

    use super::*;

    fn context(temp: &TempDir) -> ReconcileContext {
        let config = Options::new(temp.path().join("src"), temp.path().join("dist"))
            .validate()
            .unwrap();
        ReconcileContext::new(config)
    }

    #[tokio::test]
    async fn test_before_tolerates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let mut ctx = context(&temp);

        SnapshotPhase::before().run(&mut ctx).await.unwrap();

        assert!(ctx.before.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_after_requires_directory() {
        let temp = TempDir::new().unwrap();
        let mut ctx = context(&temp);

        let err = SnapshotPhase::after().run(&mut ctx).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Snapshot { .. })
        ));
        assert!(ctx.after.is_none());
    }

    #[tokio::test]
    async fn test_after_records_entries() {
        let temp = TempDir::new().unwrap();
        let dist = temp.path().join("dist");
        fs::create_dir_all(dist.join("lib")).unwrap();
        fs::write(dist.join("lib/a.d.ts"), "").unwrap();
        let mut ctx = context(&temp);

        SnapshotPhase::after().run(&mut ctx).await.unwrap();

        let after = ctx.after.unwrap();
        assert_eq!(after.len(), 2);
        assert!(after.contains(dist.join("lib/a.d.ts")));
    }
}
