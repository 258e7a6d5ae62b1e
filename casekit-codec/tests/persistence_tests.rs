use casekit_codec::{
    AttributeConfigurationJson, CodecError, SchemaJson, json_to_schema, schema_from_value,
    schema_to_json, schema_to_value,
};
use casekit_model::{
    AttributeConfiguration, AttributeType, ComputedAttribute, Schema, SchemaAttribute,
    SchemaError,
};
use casekit_types::SchemaId;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

fn application_schema() -> Schema {
    Schema::builder("Application")
        .name("Financial Benefit")
        .description("Application for a financial benefit")
        .attribute(SchemaAttribute::new("applicantName", AttributeType::String))
        .attribute(SchemaAttribute::entity("address", "Address"))
        .attribute(SchemaAttribute::entity_list("dependents", "Person"))
        .attribute(SchemaAttribute::list("proofOfIncome", AttributeType::Document))
        .computed(ComputedAttribute::new(
            "summary",
            AttributeType::String,
            "#concat(' ', applicantName)",
        ))
        .configuration(
            "proofOfIncome",
            AttributeConfiguration::document_processor("antivirus-scanner"),
        )
        .configuration(
            "proofOfIncome",
            AttributeConfiguration::document_classifier("income-classifier"),
        )
        .build()
        .unwrap()
}

// ── Wire shape ───────────────────────────────────────────────────

#[test]
fn persisted_document_shape() {
    let value = schema_to_value(&application_schema()).unwrap();
    assert_eq!(
        value,
        json!({
            "key": "Application",
            "name": "Financial Benefit",
            "description": "Application for a financial benefit",
            "attributes": [
                {"name": "applicantName", "type": "String", "attributeConfigurations": []},
                {"name": "address", "type": "DynamicEntity", "entitySchema": "Address",
                 "attributeConfigurations": []},
                {"name": "dependents", "type": "List", "contentType": "DynamicEntity",
                 "entitySchema": "Person", "attributeConfigurations": []},
                {"name": "proofOfIncome", "type": "List", "contentType": "Document",
                 "attributeConfigurations": [
                    {"type": "DocumentProcessor", "processorId": "antivirus-scanner"},
                    {"type": "DocumentClassifier", "classifierName": "income-classifier"}
                 ]}
            ],
            "computedAttributes": [
                {"name": "summary", "type": "String", "expression": "#concat(' ', applicantName)"}
            ]
        })
    );
}

#[test]
fn related_schema_is_written_as_key() {
    let json = schema_to_json(&application_schema());
    let address = json.attributes.iter().find(|a| a.name == "address").unwrap();
    assert_eq!(address.entity_schema.as_deref(), Some("Address"));
}

#[test]
fn self_referencing_schema_stays_flat() {
    let schema = Schema::builder("Person")
        .attribute(SchemaAttribute::new("name", AttributeType::String))
        .attribute(SchemaAttribute::entity_list("children", "Person"))
        .build()
        .unwrap();
    let value = schema_to_value(&schema).unwrap();
    assert_eq!(value["attributes"][1]["entitySchema"], json!("Person"));
}

// ── Round trip ───────────────────────────────────────────────────

#[test]
fn schema_survives_round_trip() {
    let schema = application_schema();
    let restored = json_to_schema(schema_to_json(&schema), None).unwrap();
    assert_eq!(restored, schema);
}

#[test]
fn id_is_supplied_by_storage() {
    let id = SchemaId::from_uuid(Uuid::new_v4());
    let value = schema_to_value(&application_schema()).unwrap();
    assert!(value.get("id").is_none());

    let restored = schema_from_value(value, Some(id)).unwrap();
    assert_eq!(restored.id(), Some(id));
    assert_eq!(restored.key(), "Application");
}

#[test]
fn configuration_order_is_preserved() {
    let restored = json_to_schema(schema_to_json(&application_schema()), None).unwrap();
    let kinds: Vec<_> = restored
        .configurations_for("proofOfIncome")
        .iter()
        .map(AttributeConfiguration::kind)
        .collect();
    assert_eq!(kinds, vec!["DocumentProcessor", "DocumentClassifier"]);
}

// ── Reading ──────────────────────────────────────────────────────

#[test]
fn missing_optional_sections_default_to_empty() {
    let schema = schema_from_value(json!({"key": "Empty"}), None).unwrap();
    assert_eq!(schema.key(), "Empty");
    assert_eq!(schema.name(), "");
    assert!(schema.attributes().is_empty());
    assert!(schema.computed_attributes().is_empty());
}

#[test]
fn unknown_configuration_kind_is_dropped() {
    let value = json!({
        "key": "Upload",
        "attributes": [{
            "name": "files",
            "type": "List",
            "contentType": "Document",
            "attributeConfigurations": [
                {"type": "DocumentRedactor", "level": "strict"},
                {"type": "DocumentProcessor", "processorId": "ocr"}
            ]
        }]
    });
    let schema = schema_from_value(value, None).unwrap();
    assert_eq!(schema.document_processors("files"), vec!["ocr"]);
    assert_eq!(schema.configurations_for("files").len(), 1);
}

#[test]
fn unknown_configuration_kind_parses_as_unsupported() {
    let parsed: AttributeConfigurationJson =
        serde_json::from_value(json!({"type": "Something", "x": 1})).unwrap();
    assert_eq!(parsed, AttributeConfigurationJson::Unsupported);
    assert_eq!(parsed.into_configuration(), None);
}

#[test]
fn unknown_attribute_type_is_a_serialization_error() {
    let err = schema_from_value(
        json!({"key": "Odd", "attributes": [{"name": "x", "type": "Blob"}]}),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, CodecError::Serialization(_)));
}

#[test]
fn invalid_schema_document_is_reported() {
    let doc: SchemaJson = serde_json::from_value(json!({
        "key": "Odd",
        "attributes": [
            {"name": "x", "type": "String"},
            {"name": "x", "type": "Integer"}
        ]
    }))
    .unwrap();
    assert_eq!(
        json_to_schema(doc, None).unwrap_err(),
        SchemaError::DuplicateAttribute {
            schema: "Odd".into(),
            attribute: "x".into(),
        }
    );

    let err = schema_from_value(
        json!({"key": "Odd", "attributes": [{"name": "items", "type": "List"}]}),
        None,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CodecError::Schema(SchemaError::MissingContentType { .. })
    ));
}
