//! Reconciliation pipeline.
//!
//! This module provides a [`Pipeline`] orchestrator that runs one bundling
//! pass over an output directory. The pipeline provides:
//!
//! - Explicit phase boundaries (clean → snapshot → compile → merge → snapshot → prune)
//! - Plugin hooks before and after each phase
//! - Unified diagnostics collection
//! - Per-pass state in a [`ReconcileContext`]
//!
//! # Example
//!
//! ```ignore
//! use dtsbundle_pipeline::pipeline::Pipeline;
//!
//! let ctx = Pipeline::new().run(config).await?;
//!
//! for (path, removal) in ctx.failed_removals() {
//!     eprintln!("could not remove {}: {:?}", path.display(), removal);
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod trace;

pub use context::ReconcileContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use trace::TracingPlugin;
