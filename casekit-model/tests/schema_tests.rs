use casekit_model::{
    AttributeConfiguration, AttributeType, ComputedAttribute, Schema, SchemaAttribute,
    SchemaError,
};
use pretty_assertions::assert_eq;

fn make_application_schema() -> Schema {
    Schema::builder("FinancialBenefit")
        .name("Financial Benefit")
        .description("Application for a financial benefit")
        .attribute(SchemaAttribute::new("applicantName", AttributeType::String))
        .attribute(SchemaAttribute::new("householdSize", AttributeType::Integer))
        .attribute(SchemaAttribute::entity("address", "Address"))
        .attribute(SchemaAttribute::list("proofOfIncome", AttributeType::Document))
        .attribute(SchemaAttribute::entity_list("dependents", "Person"))
        .computed(ComputedAttribute::new(
            "fullName",
            AttributeType::String,
            "#concat(' ', firstName, lastName)",
        ))
        .configuration(
            "proofOfIncome",
            AttributeConfiguration::document_processor("antivirus-scanner"),
        )
        .configuration(
            "proofOfIncome",
            AttributeConfiguration::document_processor("ocr"),
        )
        .configuration(
            "proofOfIncome",
            AttributeConfiguration::document_classifier("income-classifier"),
        )
        .build()
        .unwrap()
}

// ── AttributeType ────────────────────────────────────────────────

#[test]
fn attribute_type_names_roundtrip() {
    for ty in AttributeType::ALL {
        assert_eq!(AttributeType::from_name(ty.name()), Some(ty));
    }
    assert_eq!(AttributeType::from_name("BigInteger"), None);
}

#[test]
fn attribute_type_serde_uses_persisted_names() {
    let json = serde_json::to_string(&AttributeType::DynamicEntity).unwrap();
    assert_eq!(json, "\"DynamicEntity\"");
    let parsed: AttributeType = serde_json::from_str("\"Date\"").unwrap();
    assert_eq!(parsed, AttributeType::Date);
}

#[test]
fn scalar_types() {
    assert!(AttributeType::String.is_scalar());
    assert!(AttributeType::DateTime.is_scalar());
    assert!(!AttributeType::List.is_scalar());
    assert!(!AttributeType::Document.is_scalar());
    assert!(!AttributeType::DynamicEntity.is_scalar());
}

// ── SchemaAttribute constructors ─────────────────────────────────

#[test]
fn list_attribute_element_type() {
    let a = SchemaAttribute::list("tags", AttributeType::String);
    assert_eq!(a.attribute_type, AttributeType::List);
    assert_eq!(a.element_type(), Some(AttributeType::String));
    assert!(!a.is_document_list());
}

#[test]
fn entity_list_attribute() {
    let a = SchemaAttribute::entity_list("dependents", "Person");
    assert_eq!(a.element_type(), Some(AttributeType::DynamicEntity));
    assert_eq!(a.entity_schema.as_deref(), Some("Person"));
}

#[test]
fn document_list_detection() {
    assert!(SchemaAttribute::list("files", AttributeType::Document).is_document_list());
    assert!(!SchemaAttribute::new("file", AttributeType::Document).is_document_list());
}

// ── Schema accessors ─────────────────────────────────────────────

#[test]
fn schema_identity_fields() {
    let s = make_application_schema();
    assert_eq!(s.key(), "FinancialBenefit");
    assert_eq!(s.name(), "Financial Benefit");
    assert_eq!(s.description(), "Application for a financial benefit");
    assert_eq!(s.id(), None);
}

#[test]
fn name_defaults_to_key() {
    let s = Schema::builder("Address").build().unwrap();
    assert_eq!(s.name(), "Address");
}

#[test]
fn attribute_lookup() {
    let s = make_application_schema();
    assert_eq!(
        s.attribute("householdSize").map(|a| a.attribute_type),
        Some(AttributeType::Integer)
    );
    assert!(s.attribute("fullName").is_none());
    assert!(s.is_computed("fullName"));
    assert!(!s.is_computed("applicantName"));
}

#[test]
fn attributes_keep_declaration_order() {
    let s = make_application_schema();
    let names: Vec<&str> = s.attributes().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["applicantName", "householdSize", "address", "proofOfIncome", "dependents"]
    );
}

#[test]
fn configurations_for_attribute() {
    let s = make_application_schema();
    assert_eq!(s.configurations_for("proofOfIncome").len(), 3);
    assert!(s.configurations_for("applicantName").is_empty());
    assert_eq!(s.document_processors("proofOfIncome"), vec!["antivirus-scanner", "ocr"]);
}

#[test]
fn related_schema_keys_are_deduplicated() {
    let s = Schema::builder("Household")
        .attribute(SchemaAttribute::entity("head", "Person"))
        .attribute(SchemaAttribute::entity_list("members", "Person"))
        .attribute(SchemaAttribute::entity("address", "Address"))
        .build()
        .unwrap();
    assert_eq!(s.related_schema_keys(), vec!["Person", "Address"]);
}

#[test]
fn self_referential_schema_is_allowed() {
    let s = Schema::builder("Person")
        .attribute(SchemaAttribute::new("name", AttributeType::String))
        .attribute(SchemaAttribute::entity_list("children", "Person"))
        .build();
    assert!(s.is_ok());
}

#[test]
fn to_builder_preserves_definition() {
    let s = make_application_schema();
    let rebuilt = s.to_builder().build().unwrap();
    assert_eq!(rebuilt, s);
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn duplicate_attribute_rejected() {
    let err = Schema::builder("Dup")
        .attribute(SchemaAttribute::new("name", AttributeType::String))
        .attribute(SchemaAttribute::new("name", AttributeType::Integer))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        SchemaError::DuplicateAttribute {
            schema: "Dup".into(),
            attribute: "name".into(),
        }
    );
}

#[test]
fn computed_name_clash_rejected() {
    let err = Schema::builder("Clash")
        .attribute(SchemaAttribute::new("total", AttributeType::Number))
        .computed(ComputedAttribute::new("total", AttributeType::Number, "a + b"))
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateAttribute { .. }));
}

#[test]
fn list_without_content_type_rejected() {
    let mut attribute = SchemaAttribute::list("tags", AttributeType::String);
    attribute.content_type = None;
    let err = Schema::builder("Tags").attribute(attribute).build().unwrap_err();
    assert!(matches!(err, SchemaError::MissingContentType { .. }));
}

#[test]
fn nested_list_rejected() {
    let err = Schema::builder("Matrix")
        .attribute(SchemaAttribute::list("rows", AttributeType::List))
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        SchemaError::UnsupportedContentType { content_type: AttributeType::List, .. }
    ));
}

#[test]
fn entity_without_schema_rejected() {
    let err = Schema::builder("Orphan")
        .attribute(SchemaAttribute::new("child", AttributeType::DynamicEntity))
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaError::MissingEntitySchema { .. }));

    let err = Schema::builder("Orphans")
        .attribute(SchemaAttribute::list("children", AttributeType::DynamicEntity))
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaError::MissingEntitySchema { .. }));
}

#[test]
fn configuration_on_unknown_attribute_rejected() {
    let err = Schema::builder("Docs")
        .attribute(SchemaAttribute::list("files", AttributeType::Document))
        .configuration("photos", AttributeConfiguration::document_processor("ocr"))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        SchemaError::UnknownConfigurationTarget {
            schema: "Docs".into(),
            attribute: "photos".into(),
        }
    );
}

#[test]
fn empty_key_rejected() {
    assert_eq!(Schema::builder("  ").build().unwrap_err(), SchemaError::EmptyKey);
}

#[test]
fn error_messages_name_the_attribute() {
    let err = SchemaError::MissingEntitySchema {
        schema: "Orphan".into(),
        attribute: "child".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("Orphan"));
    assert!(msg.contains("child"));
}

// ── AttributeConfiguration ───────────────────────────────────────

#[test]
fn configuration_kinds() {
    assert_eq!(
        AttributeConfiguration::document_processor("ocr").kind(),
        AttributeConfiguration::DOCUMENT_PROCESSOR
    );
    assert_eq!(
        AttributeConfiguration::document_classifier("id-cards").kind(),
        "DocumentClassifier"
    );
}

#[test]
fn configuration_accessors() {
    let c = AttributeConfiguration::document_classifier("id-cards");
    assert!(c.as_document_processing().is_none());
    assert_eq!(
        c.as_document_classifier().map(|c| c.classifier_name.as_str()),
        Some("id-cards")
    );
}
