//! Source locations for facts and diagnostics.

use std::fmt;

use smol_str::SmolStr;

/// Where a fact was observed: a file and an optional 1-indexed line.
///
/// Both fields are optional; an empty location record is still a location
/// (runtime reflection can know that a definition has a source without
/// knowing which line).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLocation {
    pub file: Option<SmolStr>,
    pub line: Option<u32>,
}

impl SourceLocation {
    pub fn new(file: impl Into<SmolStr>, line: u32) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
        }
    }

    /// A location record with no file or line.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn file_only(file: impl Into<SmolStr>) -> Self {
        Self {
            file: Some(file.into()),
            line: None,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{file}:{line}"),
            (Some(file), None) => write!(f, "{file}"),
            (None, Some(line)) => write!(f, "<unknown>:{line}"),
            (None, None) => write!(f, "<unknown>"),
        }
    }
}
