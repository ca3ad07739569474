//! Core operations.
//!
//! This module contains the business logic for dtsb commands,
//! separated from CLI argument parsing and output rendering.

pub mod bundle;
pub mod check;
pub mod config;

pub use bundle::bundle;
pub use check::check;
pub use config::{LoadedConfig, load_config};
