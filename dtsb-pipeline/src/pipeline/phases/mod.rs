//! Built-in pipeline phases.
//!
//! Every pass runs these in order:
//!
//! - [`CleanPhase`] - removes stale output according to the clean policy
//! - [`SnapshotPhase::before`] - records the output directory before compiling
//! - [`CompilePhase`] - runs the declaration compiler
//! - [`MergePhase`] - merges the emitted declarations and writes the bundle
//! - [`SnapshotPhase::after`] - records the output directory after the write
//! - [`PrunePhase`] - removes every new path except the bundle

mod clean;
mod compile;
mod merge;
mod prune;
mod snapshot;

pub use clean::CleanPhase;
pub use compile::CompilePhase;
pub use merge::MergePhase;
pub use prune::PrunePhase;
pub use snapshot::SnapshotPhase;
