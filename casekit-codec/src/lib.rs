//! Serialized forms of casekit schemas.
//!
//! - [`SchemaJson`]: the flat document schemas are persisted as, produced by
//!   [`schema_to_json`] and read back by [`json_to_schema`]
//! - [`SchemaModel`]: the API request/response shape
//!
//! Related schemas are always written as their key, so the persisted form
//! stays flat even when schemas reference each other cyclically. Audit
//! metadata is not part of the persisted document; storage carries it
//! alongside.

mod api;
mod configuration;
mod error;
mod persistence;

pub use api::{AttributeModel, ComputedAttributeModel, SchemaModel, model_to_schema, schema_to_model};
pub use configuration::{AttributeConfigurationJson, AttributeConfigurationModel};
pub use error::{CodecError, CodecResult};
pub use persistence::{
    AttributeJson, ComputedAttributeJson, SchemaJson, json_to_schema, schema_from_value,
    schema_to_json, schema_to_value,
};
