//! Pre-clean policy applied before each pass.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// What to remove from the output directory before compiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleanPolicy {
    /// Recursively delete the whole output directory.
    #[default]
    OutDir,
    /// Delete only a bundle left over from a previous pass.
    Bundle,
    /// Leave the output directory untouched.
    None,
}

impl CleanPolicy {
    /// Returns the policy identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CleanPolicy::OutDir => "out-dir",
            CleanPolicy::Bundle => "bundle",
            CleanPolicy::None => "none",
        }
    }
}

impl fmt::Display for CleanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CleanPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "out-dir" | "outdir" | "all" => Ok(CleanPolicy::OutDir),
            "bundle" => Ok(CleanPolicy::Bundle),
            "none" | "off" => Ok(CleanPolicy::None),
            _ => Err(format!(
                "unknown clean policy '{}', expected 'out-dir', 'bundle' or 'none'",
                s
            )),
        }
    }
}
