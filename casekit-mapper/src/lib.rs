//! Conversion engine between [`DynamicEntity`](casekit_model::DynamicEntity) trees and generic JSON maps.
//!
//! - [`EntityMapper::to_entity`] / [`EntityMapper::apply_map`]: generic map
//!   to entity, coercing values to their declared types and resolving related
//!   schemas through a [`SchemaLookup`](casekit_model::SchemaLookup)
//! - [`to_generic_map`]: entity back to its sparse JSON form
//! - [`flatten`]: entity to a path-keyed string map for search indexing
//! - [`mesh_documents`]: document-list reconciliation that protects
//!   server-controlled review fields
//!
//! Conversion is synchronous and stateless; one [`EntityMapper`] can serve
//! any number of threads.

mod coerce;
mod config;
mod error;
mod flatten;
mod mapper;
mod mesh;

pub use config::{MapperConfig, MeshConfig};
pub use error::{ConfigError, ErrorKind, MappingError, MappingResult};
pub use flatten::flatten;
pub use mapper::{EntityMapper, to_generic_map, value_to_json};
pub use mesh::mesh_documents;

/// The untyped, JSON-object representation used at API and storage
/// boundaries.
pub type GenericMap = serde_json::Map<String, serde_json::Value>;
