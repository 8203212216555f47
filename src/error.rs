//! Error types for externals
//!
//! Defines the error enum covering all failure modes across the tool.
//! Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Result type alias for externals operations
pub type Result<T> = std::result::Result<T, ExternalsError>;

/// Error type for externals operations
#[derive(Error, Debug)]
pub enum ExternalsError {
    /// Manifest file missing, unparsable, or missing required fields
    #[error("Configuration error: {0}")]
    Config(String),

    /// An existing remote's URL conflicts with the manifest's declaration
    #[error("Remote '{name}' {kind} URL mismatch: configured '{existing}', manifest declares '{declared}'")]
    RemoteMismatch {
        name: String,
        kind: &'static str,
        existing: String,
        declared: String,
    },

    /// Neither the namespaced nor the bare form of a revision resolved.
    /// Both attempts are reported so the namespaced failure is not masked
    /// by the fallback.
    #[error("Revision '{revision}' did not resolve: {remote_attempt}; fallback: {direct_attempt}")]
    Resolve {
        revision: String,
        remote_attempt: String,
        direct_attempt: String,
    },

    /// Git subprocess errors
    #[error("Git error: {0}")]
    Git(#[from] gitcli::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
