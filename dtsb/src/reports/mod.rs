//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target or print them as JSON.

mod bundle;
mod check;
mod output;

pub use bundle::{BundleReport, FailedRemoval};
pub use check::CheckReport;
pub use output::{Report, TerminalOutput, print_json};
