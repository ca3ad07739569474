//! Bundle command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

/// Report data from one bundling pass.
#[derive(Debug, Serialize)]
pub struct BundleReport {
    /// The dtsb.toml that was read, if any.
    pub config_path: Option<PathBuf>,
    pub bundle_path: PathBuf,
    /// Declaration files merged into the bundle, in merge order.
    pub declarations: Vec<PathBuf>,
    /// Intermediates that are gone.
    pub removed: Vec<PathBuf>,
    /// Intermediates that could not be removed.
    pub failed: Vec<FailedRemoval>,
    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,
    /// Compiler output, when it printed anything.
    pub compiler_output: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FailedRemoval {
    pub path: PathBuf,
    pub error: String,
}

impl Report for BundleReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        if let Some(output) = &self.compiler_output {
            out.preformatted(output.trim_end());
            out.newline();
        }

        let count = self.declarations.len();
        out.preformatted(&format!(
            "✓ Bundled {} declaration file{}",
            count,
            if count == 1 { "" } else { "s" }
        ));
        out.added_item(&self.bundle_path.display().to_string());

        if !self.removed.is_empty() {
            out.newline();
            out.section(&format!("Removed ({})", self.removed.len()));
            for path in &self.removed {
                out.removed_item(&path.display().to_string());
            }
        }

        if !self.failed.is_empty() {
            out.newline();
            out.section(&format!("Could not remove ({})", self.failed.len()));
            for failed in &self.failed {
                out.key_value_indented(&failed.path.display().to_string(), &failed.error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    fn report() -> BundleReport {
        BundleReport {
            config_path: None,
            bundle_path: PathBuf::from("/p/dist/types.d.ts"),
            declarations: vec![PathBuf::from("/p/dist/a.d.ts")],
            removed: vec![PathBuf::from("/p/dist/a.d.ts")],
            failed: vec![FailedRemoval {
                path: PathBuf::from("/p/dist/lib"),
                error: "permission denied".into(),
            }],
            warnings: vec!["could not remove: permission denied (/p/dist/lib)".into()],
            compiler_output: None,
        }
    }

    #[test]
    fn test_render() {
        let mut out = RecordingOutput::default();

        report().render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "warning: could not remove: permission denied (/p/dist/lib)",
                "✓ Bundled 1 declaration file",
                "  + /p/dist/types.d.ts",
                "",
                "Removed (1):",
                "  - /p/dist/a.d.ts",
                "",
                "Could not remove (1):",
                "  /p/dist/lib: permission denied",
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(report()).unwrap();

        assert_eq!(value["bundle_path"], "/p/dist/types.d.ts");
        assert_eq!(value["failed"][0]["error"], "permission denied");
        assert!(value["config_path"].is_null());
    }
}
