use crate::{AttributeConfigurationJson, CodecResult};
use casekit_model::{
    AttributeType, ComputedAttribute, Schema, SchemaAttribute, SchemaError,
};
use casekit_types::SchemaId;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A schema as persisted.
///
/// ```json
/// {
///   "key": "Application",
///   "name": "Application",
///   "description": "",
///   "attributes": [
///     {"name": "address", "type": "DynamicEntity", "entitySchema": "Address",
///      "attributeConfigurations": []}
///   ],
///   "computedAttributes": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaJson {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attributes: Vec<AttributeJson>,
    #[serde(default)]
    pub computed_attributes: Vec<ComputedAttributeJson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeJson {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<AttributeType>,
    /// Key of the related schema, never the schema itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_schema: Option<String>,
    #[serde(default)]
    pub attribute_configurations: Vec<AttributeConfigurationJson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedAttributeJson {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    pub expression: String,
}

/// Serializes a schema to its persisted form.
pub fn schema_to_json(schema: &Schema) -> SchemaJson {
    SchemaJson {
        key: schema.key().to_string(),
        name: schema.name().to_string(),
        description: schema.description().to_string(),
        attributes: schema
            .attributes()
            .iter()
            .map(|attribute| AttributeJson {
                name: attribute.name.clone(),
                attribute_type: attribute.attribute_type,
                content_type: attribute.content_type,
                entity_schema: attribute.entity_schema.clone(),
                attribute_configurations: schema
                    .configurations_for(&attribute.name)
                    .iter()
                    .map(AttributeConfigurationJson::from)
                    .collect(),
            })
            .collect(),
        computed_attributes: schema
            .computed_attributes()
            .iter()
            .map(|computed| ComputedAttributeJson {
                name: computed.name.clone(),
                attribute_type: computed.attribute_type,
                expression: computed.expression.clone(),
            })
            .collect(),
    }
}

/// Rebuilds a schema from its persisted form.
///
/// Configurations of unsupported kinds are dropped with a warning. A document
/// that violates schema invariants is reported as [`SchemaError`].
pub fn json_to_schema(json: SchemaJson, id: Option<SchemaId>) -> Result<Schema, SchemaError> {
    let schema_key = json.key.clone();
    let mut builder = Schema::builder(json.key)
        .id(id)
        .name(json.name)
        .description(json.description);

    for attribute in json.attributes {
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
                None => warn!(
                    schema = %schema_key,
                    attribute = %name,
                    "Dropping attribute configuration of unsupported type"
                ),
            }
        }
    }

    for computed in json.computed_attributes {
        builder = builder.computed(ComputedAttribute::new(
            computed.name,
            computed.attribute_type,
            computed.expression,
        ));
    }
    builder.build()
}

/// Serializes a schema to a JSON value.
pub fn schema_to_value(schema: &Schema) -> CodecResult<serde_json::Value> {
    Ok(serde_json::to_value(schema_to_json(schema))?)
}

/// Decodes a schema from a raw JSON value.
pub fn schema_from_value(value: serde_json::Value, id: Option<SchemaId>) -> CodecResult<Schema> {
    let json: SchemaJson = serde_json::from_value(value)?;
    Ok(json_to_schema(json, id)?)
}
