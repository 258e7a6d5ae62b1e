//! Core type definitions for casekit.
//!
//! This crate defines the small, domain-agnostic types used throughout the
//! schema and entity engine:
//! - Schema and document identifiers, assigned by external services
//! - Audit stamps (who created or last updated a record, and when)
//!
//! Schema structure, entity values and conversion live in `casekit-model`
//! and `casekit-mapper`, not here.

mod audit;
mod ids;

pub use audit::AuditStamp;
pub use ids::{DocumentId, SchemaId};
