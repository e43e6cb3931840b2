use thiserror::Error;

/// Failures at the edges of resolution: decoding text and validating options.
///
/// Resolving an already-decoded document never fails; problems found there
/// are reported as [`ResolveIssue`] values instead.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid marker configuration: {0}")]
    InvalidMarkers(String),
    #[error("invalid record schema `{schema}`: {reason}")]
    InvalidSchema { schema: String, reason: String },
}

/// Non-fatal problem observed while resolving a document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveIssue {
    /// A reference marker names an identity that no object in the document
    /// carries. The referencing field is omitted from the output.
    #[error("unresolved reference `{token}` at {location}")]
    UnresolvedReference { token: String, location: String },
    /// Two objects carry the same identity. The first one registered wins.
    #[error("duplicate identity `{token}`, first occurrence kept")]
    DuplicateIdentity { token: String },
}
