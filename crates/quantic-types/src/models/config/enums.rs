//! Configuration enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tie-break between a path that looks like a static asset and the upstream
/// application serving a file of the same name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssetPrecedence {
    /// Any path with a static extension is served locally, even if missing
    /// on disk. Identically named upstream assets are shadowed.
    #[default]
    LocalExtension,
    /// A static-looking path is served locally only when the file exists in
    /// the startup index; otherwise it falls through to the upstream.
    ExistingFile,
}

impl fmt::Display for AssetPrecedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::LocalExtension => write!(f, "local_extension"),
            Self::ExistingFile => write!(f, "existing_file"),
        }
    }
}

impl AssetPrecedence {
    /// Parse from string, `None` for unknown values.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.trim() {
            "local_extension" | "local" => Some(Self::LocalExtension),
            "existing_file" | "existing" => Some(Self::ExistingFile),
            _ => None,
        }
    }
}
