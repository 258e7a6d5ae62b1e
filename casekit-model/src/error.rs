//! Error types for schema construction and entity mutation.

use crate::AttributeType;
use thiserror::Error;

/// A schema definition that violates a structural invariant.
///
/// Schemas coming out of the administration workflow are validated before
/// they are stored, so these indicate a defect upstream rather than bad
/// client input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two attributes (regular or computed) share a name.
    #[error("schema {schema}: attribute '{attribute}' is declared more than once")]
    DuplicateAttribute { schema: String, attribute: String },

    /// A list attribute without an element type.
    #[error("schema {schema}: list attribute '{attribute}' has no content type")]
    MissingContentType { schema: String, attribute: String },

    /// A list attribute whose element type cannot be held in a list.
    #[error("schema {schema}: attribute '{attribute}' cannot hold lists of {content_type}")]
    UnsupportedContentType {
        schema: String,
        attribute: String,
        content_type: AttributeType,
    },

    /// A nested-entity attribute that does not name its related schema.
    #[error("schema {schema}: attribute '{attribute}' does not name a related schema")]
    MissingEntitySchema { schema: String, attribute: String },

    /// Configuration attached to a name that is not a declared attribute.
    #[error("schema {schema}: configuration targets unknown attribute '{attribute}'")]
    UnknownConfigurationTarget { schema: String, attribute: String },

    /// Schema key is empty.
    #[error("schema key must not be empty")]
    EmptyKey,
}

/// A rejected [`DynamicEntity`](crate::DynamicEntity) mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("schema {schema} has no attribute '{attribute}'")]
    UnknownAttribute { schema: String, attribute: String },

    #[error("attribute '{attribute}' is computed and cannot be set")]
    ComputedAttribute { attribute: String },

    #[error("invalid value for attribute '{attribute}', expected {expected}")]
    TypeMismatch {
        attribute: String,
        expected: AttributeType,
    },
}
