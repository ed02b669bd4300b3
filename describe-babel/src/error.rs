//! Error types for format operations

/// Which part of a `doc.copy` target could not be located
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetScope {
    /// The endpoint section for the path
    Path,
    /// The method section below the endpoint
    Method,
}

impl std::fmt::Display for TargetScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetScope::Path => f.write_str("path"),
            TargetScope::Method => f.write_str("method"),
        }
    }
}

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),

    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// Malformed cross-reference markup text
    #[error("Invalid \"{role}\" target: {spec:?}")]
    InvalidSpecifier { role: &'static str, spec: String },

    /// A cross-reference could not be resolved against the document
    #[error("Could not locate \"{role}\" {scope} target for {spec:?}")]
    TargetNotFound {
        role: &'static str,
        scope: TargetScope,
        spec: String,
    },

    /// Two nodes claim the same identifier
    #[error("Duplicate ID: {0:?}")]
    DuplicateId(String),

    /// A `doc.copy` reached a section that is already being copied
    #[error("Circular \"doc.copy\" of {0:?}")]
    CircularCopy(String),
}
