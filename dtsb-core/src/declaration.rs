//! Declaration file discovery and merging.

use std::{
    borrow::Cow,
    io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use walkdir::WalkDir;

use crate::absolute;

/// File name suffix of a declaration file.
pub const DECLARATION_SUFFIX: &str = ".d.ts";

/// Lines starting with an import statement. CRLF mode keeps a trailing `\r`
/// out of the match.
static IMPORT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^import.+$").expect("import pattern is valid"));

/// Check whether a path names a declaration file.
pub fn is_declaration(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(DECLARATION_SUFFIX))
}

/// Find every declaration file below `root`, depth-first.
///
/// Returns absolute paths sorted lexicographically, so the merge order does
/// not depend on directory listing order.
pub fn find_declarations(root: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
    let root = absolute(root)?;
    let mut files = Vec::new();
    for entry in WalkDir::new(&root).min_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() && is_declaration(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Blank out every line that starts with an import statement.
///
/// Matching lines become empty lines rather than being removed, so the line
/// count of `content` is preserved.
pub fn strip_imports(content: &str) -> Cow<'_, str> {
    IMPORT_LINE.replace_all(content, "")
}

/// One compiler-emitted declaration file and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationArtifact {
    pub path: PathBuf,
    pub content: String,
}

impl DeclarationArtifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Read a declaration file from disk.
    pub fn read(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)?;
        Ok(Self { path, content })
    }

    /// The content with import lines blanked out.
    pub fn without_imports(&self) -> Cow<'_, str> {
        strip_imports(&self.content)
    }
}

/// Merge declaration artifacts into one text, in the order given.
///
/// Each artifact has its import lines blanked out; the results are joined
/// with a single newline.
pub fn merge(artifacts: &[DeclarationArtifact]) -> String {
    artifacts
        .iter()
        .map(DeclarationArtifact::without_imports)
        .collect::<Vec<_>>()
        .join("\n")
}
