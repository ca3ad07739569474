use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for dtsbundle-manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error pointing at the value of `key`, if found.
    pub fn validation_error_at_key(&self, message: impl Into<String>, key: &str) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: find_value_span(&self.src, key),
            message: message.into(),
        })
    }
}

/// Locate the value of `key = value` in TOML source.
///
/// This is a line-based search used only to place error labels; it returns
/// `None` when the key cannot be found.
pub(crate) fn find_value_span(src: &str, key: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(key) {
            let rest_trimmed = rest.trim_start();
            if let Some(value) = rest_trimmed.strip_prefix('=') {
                let value_start = line.len() - value.trim_start().len();
                let value_len = value.trim_end().trim_start().len();
                return Some(SourceSpan::from((offset + value_start, value_len)));
            }
        }
        offset += line.len();
    }
    None
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a dtsb.toml or pass --in-dir and --out-dir"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dtsb.toml")]
    #[diagnostic(code(dtsb::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(dtsb::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("missing required option '{name}'")]
    #[diagnostic(
        code(dtsb::missing_option),
        help("set `{name}` under [bundle] in dtsb.toml or pass --{flag}")
    )]
    MissingOption {
        name: &'static str,
        flag: &'static str,
    },

    #[error("option '{name}' must not be empty")]
    #[diagnostic(code(dtsb::empty_option))]
    EmptyOption { name: &'static str },

    #[error("invalid bundle file name '{name}'")]
    #[diagnostic(code(dtsb::invalid_file_name), help("{reason}"))]
    InvalidFileName { name: String, reason: String },

    #[error("output directory '{out_dir}' contains the input directory '{in_dir}'")]
    #[diagnostic(
        code(dtsb::unsafe_clean),
        help(
            "the out-dir pre-clean would delete the sources; choose a separate out_dir or set clean = \"bundle\""
        )
    )]
    OutDirContainsInput { out_dir: PathBuf, in_dir: PathBuf },

    #[error("failed to resolve '{path}'")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
