//! Fatal pipeline errors.
//!
//! Every variant aborts the pass before any cleanup deletion happens.
//! Non-fatal problems are reported as [`Removal`](crate::Removal) outcomes
//! and warning diagnostics instead.

use std::{io, path::PathBuf, process::ExitStatus};

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to start declaration compiler '{program}'")]
    #[diagnostic(
        code(dtsb::compiler_spawn),
        help("install TypeScript (e.g. `npm i -D typescript`) or set [compiler] program in dtsb.toml")
    )]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("declaration compiler failed ({status}){}", output_tail(.output))]
    #[diagnostic(code(dtsb::compiler_failed))]
    Compile { status: ExitStatus, output: String },

    #[error("no TypeScript sources found in '{in_dir}'")]
    #[diagnostic(code(dtsb::no_sources))]
    NoSources { in_dir: PathBuf },

    #[error("failed to list '{path}'")]
    #[diagnostic(code(dtsb::list_failed))]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to snapshot '{path}'")]
    #[diagnostic(code(dtsb::snapshot_failed))]
    Snapshot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read declaration file '{path}'")]
    #[diagnostic(code(dtsb::read_failed))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write bundle '{path}'")]
    #[diagnostic(code(dtsb::write_failed))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("background task failed")]
    Task(#[from] tokio::task::JoinError),
}

fn output_tail(output: &str) -> String {
    let output = output.trim();
    if output.is_empty() {
        String::new()
    } else {
        format!(":\n{}", output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_tail() {
        assert_eq!(output_tail("  \n"), "");
        assert_eq!(output_tail("error TS2304\n"), ":\nerror TS2304");
    }

    #[test]
    fn test_no_sources_message() {
        let err = Error::NoSources {
            in_dir: PathBuf::from("/p/src"),
        };
        assert_eq!(err.to_string(), "no TypeScript sources found in '/p/src'");
    }
}
