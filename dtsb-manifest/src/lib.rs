//! Configuration for dtsbundle.
//!
//! Turns the caller's [`Options`] (or a `dtsb.toml` file plus command-line
//! [`Overrides`]) into a validated [`BundleConfig`]. Validation happens once
//! here; the pipeline only ever sees resolved, absolute paths.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod clean;
mod error;
mod file;
mod manifest;
mod options;

pub use clean::CleanPolicy;
pub use error::{Error, Result};
pub use file::{CONFIG_FILE_NAME, DtsbToml};
pub use manifest::{BundleSection, Manifest, Overrides};
pub use options::{BundleConfig, CompilerSettings, DEFAULT_BUNDLE_NAME, Options};
