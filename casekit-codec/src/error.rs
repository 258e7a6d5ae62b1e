//! Error types for the schema codec.

use casekit_model::SchemaError;
use thiserror::Error;

/// Result type for codec operations on raw JSON.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors decoding a stored or submitted schema document.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The document does not have the expected JSON shape.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The document decodes but describes an invalid schema.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),
}
