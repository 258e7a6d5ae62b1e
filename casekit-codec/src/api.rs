use crate::AttributeConfigurationModel;
use casekit_model::{AttributeType, ComputedAttribute, Schema, SchemaAttribute, SchemaError};
use casekit_types::{AuditStamp, SchemaId};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Schema as exchanged with API clients.
///
/// Unlike the persisted form it carries the schema id and, for responses,
/// the audit stamp flattened into the top-level object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SchemaId>,
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attributes: Vec<AttributeModel>,
    #[serde(default)]
    pub computed_attributes: Vec<ComputedAttributeModel>,
    #[serde(flatten)]
    pub audit: Option<AuditStamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeModel {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<AttributeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_schema: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_configurations: Vec<AttributeConfigurationModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedAttributeModel {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    pub expression: String,
}

pub fn schema_to_model(schema: &Schema) -> SchemaModel {
    SchemaModel {
        id: schema.id(),
        key: schema.key().to_string(),
        name: schema.name().to_string(),
        description: schema.description().to_string(),
        attributes: schema
            .attributes()
            .iter()
            .map(|attribute| AttributeModel {
                name: attribute.name.clone(),
                attribute_type: attribute.attribute_type,
                content_type: attribute.content_type,
                entity_schema: attribute.entity_schema.clone(),
                attribute_configurations: schema
                    .configurations_for(&attribute.name)
                    .iter()
                    .map(AttributeConfigurationModel::from)
                    .collect(),
            })
            .collect(),
        computed_attributes: schema
            .computed_attributes()
            .iter()
            .map(|computed| ComputedAttributeModel {
                name: computed.name.clone(),
                attribute_type: computed.attribute_type,
                expression: computed.expression.clone(),
            })
            .collect(),
        audit: schema.audit().cloned(),
    }
}

/// Builds a schema from a client-supplied model.
pub fn model_to_schema(model: SchemaModel) -> Result<Schema, SchemaError> {
    let mut builder = Schema::builder(model.key)
        .id(model.id)
        .name(model.name)
        .description(model.description)
        .audit(model.audit);

    for attribute in model.attributes {
        let name = attribute.name;
        builder = builder.attribute(SchemaAttribute {
            name: name.clone(),
            attribute_type: attribute.attribute_type,
            content_type: attribute.content_type,
            entity_schema: attribute.entity_schema,
        });
        for configuration in attribute.attribute_configurations {
            match configuration.into_configuration() {
                Some(c) => builder = builder.configuration(name.clone(), c),
                None => warn!(attribute = %name, "Ignoring attribute configuration of unsupported type"),
            }
        }
    }

    for computed in model.computed_attributes {
        builder = builder.computed(ComputedAttribute::new(
            computed.name,
            computed.attribute_type,
            computed.expression,
        ));
    }
    builder.build()
}
