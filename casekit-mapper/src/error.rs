//! Error types for the conversion engine.

use casekit_model::{AttributeType, EntityError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for conversion operations.
pub type MappingResult<T> = Result<T, MappingError>;

/// Broad category of a [`MappingError`], for mapping onto responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced schema does not exist. The request may succeed once the
    /// dependency is in place.
    MissingDependency,
    /// The input does not fit the schema. Always a client error.
    InvalidInput,
}

/// Failure converting a generic map into a dynamic entity.
///
/// Keys are attribute paths: nested attributes read `address.city`, list
/// elements read `dependents[1].age`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A related-schema key did not resolve.
    #[error("schema not found: {key}")]
    MissingSchema { key: String },

    /// The map carries a key the schema does not declare.
    #[error("invalid key '{key}': schema {schema} has no such attribute")]
    UnknownAttribute { schema: String, key: String },

    /// The value has the wrong JSON shape for the declared type.
    #[error("invalid value for key '{key}', expected a JSON {expected}")]
    InvalidShape { key: String, expected: &'static str },

    /// The value could not be coerced to the declared type.
    #[error("invalid type for key '{key}', expected {expected}")]
    InvalidType { key: String, expected: AttributeType },
}

impl MappingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MappingError::MissingSchema { .. } => ErrorKind::MissingDependency,
            MappingError::UnknownAttribute { .. }
            | MappingError::InvalidShape { .. }
            | MappingError::InvalidType { .. } => ErrorKind::InvalidInput,
        }
    }

    /// The offending attribute path, or the missing schema key.
    pub fn key(&self) -> &str {
        match self {
            MappingError::MissingSchema { key }
            | MappingError::UnknownAttribute { key, .. }
            | MappingError::InvalidShape { key, .. }
            | MappingError::InvalidType { key, .. } => key,
        }
    }

    /// Prefixes the attribute path with the enclosing attribute.
    pub(crate) fn within(self, parent: &str) -> Self {
        let join = |key: String| {
            if key.is_empty() {
                parent.to_string()
            } else if key.starts_with('[') {
                format!("{parent}{key}")
            } else {
                format!("{parent}.{key}")
            }
        };
        match self {
            MappingError::MissingSchema { .. } => self,
            MappingError::UnknownAttribute { schema, key } => MappingError::UnknownAttribute {
                schema,
                key: join(key),
            },
            MappingError::InvalidShape { key, expected } => MappingError::InvalidShape {
                key: join(key),
                expected,
            },
            MappingError::InvalidType { key, expected } => MappingError::InvalidType {
                key: join(key),
                expected,
            },
        }
    }
}

impl From<EntityError> for MappingError {
    fn from(e: EntityError) -> Self {
        match e {
            EntityError::UnknownAttribute { schema, attribute } => MappingError::UnknownAttribute {
                schema,
                key: attribute,
            },
            EntityError::ComputedAttribute { attribute } => MappingError::UnknownAttribute {
                schema: String::new(),
                key: attribute,
            },
            EntityError::TypeMismatch {
                attribute,
                expected,
            } => MappingError::InvalidType {
                key: attribute,
                expected,
            },
        }
    }
}

/// Failure loading a [`MapperConfig`](crate::MapperConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
