#![allow(dead_code)]

use casekit_mapper::{EntityMapper, GenericMap, MapperConfig};
use casekit_model::{
    AttributeConfiguration, AttributeType, ComputedAttribute, Schema, SchemaAttribute,
    SchemaRegistry,
};
use serde_json::Value as JsonValue;
use std::sync::Arc;

pub fn address_schema() -> Schema {
    Schema::builder("Address")
        .attribute(SchemaAttribute::new("line1", AttributeType::String))
        .attribute(SchemaAttribute::new("city", AttributeType::String))
        .attribute(SchemaAttribute::new("zip", AttributeType::String))
        .build()
        .unwrap()
}

pub fn person_schema() -> Schema {
    Schema::builder("Person")
        .attribute(SchemaAttribute::new("name", AttributeType::String))
        .attribute(SchemaAttribute::new("age", AttributeType::Integer))
        .attribute(SchemaAttribute::entity("address", "Address"))
        .attribute(SchemaAttribute::list("identityDocuments", AttributeType::Document))
        .build()
        .unwrap()
}

pub fn application_schema() -> Schema {
    Schema::builder("Application")
        .attribute(SchemaAttribute::new("applicantName", AttributeType::String))
        .attribute(SchemaAttribute::new("householdSize", AttributeType::Integer))
        .attribute(SchemaAttribute::new("monthlyIncome", AttributeType::Number))
        .attribute(SchemaAttribute::new("veteran", AttributeType::Boolean))
        .attribute(SchemaAttribute::new("birthDate", AttributeType::Date))
        .attribute(SchemaAttribute::new("appointment", AttributeType::Time))
        .attribute(SchemaAttribute::new("submittedAt", AttributeType::DateTime))
        .attribute(SchemaAttribute::entity("address", "Address"))
        .attribute(SchemaAttribute::entity("applicant", "Person"))
        .attribute(SchemaAttribute::entity_list("dependents", "Person"))
        .attribute(SchemaAttribute::list("tags", AttributeType::String))
        .attribute(SchemaAttribute::list("proofOfIncome", AttributeType::Document))
        .attribute(SchemaAttribute::new("photo", AttributeType::Document))
        .computed(ComputedAttribute::new(
            "summary",
            AttributeType::String,
            "#concat(' ', applicantName, householdSize)",
        ))
        .configuration(
            "proofOfIncome",
            AttributeConfiguration::document_processor("antivirus-scanner"),
        )
        .build()
        .unwrap()
}

pub fn broken_schema() -> Schema {
    Schema::builder("Broken")
        .attribute(SchemaAttribute::new("label", AttributeType::String))
        .attribute(SchemaAttribute::entity("ghost", "DoesNotExist"))
        .build()
        .unwrap()
}

pub fn registry() -> SchemaRegistry {
    vec![
        address_schema(),
        person_schema(),
        application_schema(),
        broken_schema(),
    ]
    .into_iter()
    .collect()
}

pub fn mapper() -> EntityMapper {
    EntityMapper::new(Arc::new(registry()))
}

pub fn mapper_with(config: MapperConfig) -> EntityMapper {
    EntityMapper::with_config(Arc::new(registry()), config)
}

pub fn schema(key: &str) -> Arc<Schema> {
    registry().get(key).unwrap()
}

/// Unwraps a `json!({...})` literal into a generic map.
pub fn map(value: JsonValue) -> GenericMap {
    match value {
        JsonValue::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
