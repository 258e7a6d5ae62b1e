//! Dynamic schema and entity model for casekit.
//!
//! Defines the runtime type system that transaction payloads are built on:
//! - [`Schema`]: an administrator-defined record type (attributes, computed
//!   attributes, per-attribute configuration)
//! - [`AttributeConfiguration`]: typed metadata attached to one attribute
//! - [`DynamicEntity`]: a runtime instance of a schema holding typed [`Value`]s
//! - [`SchemaLookup`] / [`OverwriteAuthorization`]: the collaborators the
//!   conversion engine consults
//!
//! Schemas refer to each other by key only, so the schema graph may be cyclic
//! while every entity tree stays finite.

mod configuration;
mod entity;
mod error;
mod lookup;
mod schema;
mod value;

pub use configuration::{
    AttributeConfiguration, DocumentClassifierConfiguration, DocumentProcessingConfiguration,
};
pub use entity::DynamicEntity;
pub use error::{EntityError, SchemaError};
pub use lookup::{OverwriteAuthorization, SchemaLookup, SchemaRegistry, UnresolvedReference};
pub use schema::{AttributeType, ComputedAttribute, Schema, SchemaAttribute, SchemaBuilder};
pub use value::{Document, ReviewStatus, Value};
