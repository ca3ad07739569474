//! Core primitives for dtsbundle.
//!
//! This crate provides the filesystem-facing building blocks used by the
//! reconciliation pipeline: absolute path sets and directory snapshots,
//! the declaration file finder and merger, and whole-buffer bundle writes.

mod declaration;
mod file;
mod path_set;
mod snapshot;

// Declaration files
pub use declaration::{
    DECLARATION_SUFFIX, DeclarationArtifact, find_declarations, is_declaration, merge,
    strip_imports,
};
// Bundle output
pub use file::{Bundle, write_file};
// Path sets and directory state
pub use path_set::{DirectoryState, PathSet, absolute};
pub use snapshot::{snapshot, snapshot_or_empty};
