//! Declaration bundling passes for dtsbundle.
//!
//! A pass compiles a TypeScript source tree to declaration files, merges
//! them into a single bundle and removes every intermediate file it
//! created, leaving the output directory as it was plus the bundle.
//!
//! Passes on the same output directory must not run concurrently.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod compiler;
mod error;
pub mod pipeline;
mod removal;

pub use compiler::{DECLARATION_FLAGS, DeclarationCompiler, Tsc, find_sources};
use dtsbundle_manifest::Options;
pub use error::Error;
use pipeline::{Pipeline, ReconcileContext, TracingPlugin};
pub use removal::{Removal, remove_path};

/// Run one pass with the default compiler and clean policy.
///
/// # Errors
///
/// Fails if `options` are invalid, the compiler fails, or the bundle cannot
/// be read or written. In those cases no intermediate file is removed.
pub async fn bundle(options: &Options) -> eyre::Result<ReconcileContext> {
    let config = options.validate().map_err(|e| *e)?;
    Pipeline::new()
        .plugin(TracingPlugin::new())
        .run(config)
        .await
}
