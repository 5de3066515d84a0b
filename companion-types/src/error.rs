//! Error types for the companion wire format.

use thiserror::Error;

/// Errors produced while encoding or decoding wire messages.
#[derive(Debug, Error)]
pub enum WireError {
    /// JSON serialization failed
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// JSON deserialization failed
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// A field required by the command is missing
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field is present but unusable
    #[error("invalid field {field}: {reason}")]
    InvalidField {
        /// Name of the offending field as it appears on the wire.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}
