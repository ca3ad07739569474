//! Check operation - configuration validation.

use dtsbundle_pipeline::{Tsc, find_sources, pipeline::Pipeline};

use super::LoadedConfig;
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Only reads the source tree; nothing is compiled, written or removed.
pub fn check(loaded: &LoadedConfig) -> CheckReport {
    let config = &loaded.config;
    let mut warnings = Vec::new();

    let source_count = if config.in_dir().is_dir() {
        match find_sources(config.in_dir()) {
            Ok(sources) => {
                if sources.is_empty() {
                    warnings.push(format!(
                        "no TypeScript sources found in {}",
                        config.in_dir().display()
                    ));
                }
                Some(sources.len())
            }
            Err(e) => {
                warnings.push(format!("could not list {}: {}", config.in_dir().display(), e));
                None
            }
        }
    } else {
        warnings.push(format!(
            "source directory {} does not exist",
            config.in_dir().display()
        ));
        None
    };

    let compiler = Tsc::new(config.compiler().clone());
    CheckReport {
        config_path: loaded.source.clone(),
        in_dir: config.in_dir().to_path_buf(),
        out_dir: config.out_dir().to_path_buf(),
        bundle_path: config.bundle_path().to_path_buf(),
        clean: config.clean().to_string(),
        command: compiler.display_command(config.out_dir(), config.in_dir()),
        source_count,
        phases: Pipeline::builtin_phases()
            .into_iter()
            .map(|info| format!("{}: {}", info.name, info.description))
            .collect(),
        warnings,
    }
}
