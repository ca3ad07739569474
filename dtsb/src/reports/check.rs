//! Check command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

/// Report data from configuration validation.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// The dtsb.toml that was read, if any.
    pub config_path: Option<PathBuf>,
    pub in_dir: PathBuf,
    pub out_dir: PathBuf,
    pub bundle_path: PathBuf,
    /// Pre-clean policy identifier.
    pub clean: String,
    /// The compiler command line, with the source glob unexpanded.
    pub command: String,
    /// Number of `.ts` sources, if the source directory could be listed.
    pub source_count: Option<usize>,
    /// Phase names and descriptions in execution order.
    pub phases: Vec<String>,
    pub warnings: Vec<String>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.warnings.is_empty() {
            out.newline();
        }

        match &self.config_path {
            Some(path) => out.preformatted(&format!("✓ {} is valid", path.display())),
            None => out.preformatted("✓ configuration is valid (no dtsb.toml)"),
        }
        out.newline();

        out.key_value_indented("sources", &self.in_dir.display().to_string());
        if let Some(count) = self.source_count {
            out.key_value_indented("source files", &count.to_string());
        }
        out.key_value_indented("output", &self.out_dir.display().to_string());
        out.key_value_indented("bundle", &self.bundle_path.display().to_string());
        out.key_value_indented("clean", &self.clean);
        out.key_value_indented("compiler", &self.command);
        out.newline();

        out.section("Phases");
        for (index, phase) in self.phases.iter().enumerate() {
            out.numbered_item(index + 1, phase);
        }
    }
}
