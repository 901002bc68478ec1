//! Error types for adapter-facing tag parsing.

use thiserror::Error;

/// Errors raised when decoding string tags supplied by an extraction
/// adapter (origins, fact kinds, visibilities, mixin relations).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagParseError {
    /// Unknown origin tag.
    #[error("unknown origin tag: {0}")]
    UnknownOrigin(String),

    /// Unknown fact kind tag.
    #[error("unknown fact kind tag: {0}")]
    UnknownFactKind(String),

    /// Unknown visibility tag.
    #[error("unknown visibility tag: {0}")]
    UnknownVisibility(String),

    /// Unknown mixin relation tag.
    #[error("unknown mixin relation tag: {0}")]
    UnknownMixinRelation(String),
}
