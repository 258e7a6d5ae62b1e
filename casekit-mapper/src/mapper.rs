use crate::coerce::{coerce_document, coerce_leaf};
use crate::flatten::leaf_text;
use crate::{GenericMap, MapperConfig, MappingError, MappingResult, mesh_documents};
use casekit_model::{
    AttributeType, Document, DynamicEntity, OverwriteAuthorization, Schema, SchemaAttribute,
    SchemaLookup, Value,
};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::debug;

/// Converts generic maps into [`DynamicEntity`] trees.
///
/// Values are dispatched on the attribute type declared by the schema, not on
/// the JSON type that happens to arrive. Related schemas are resolved through
/// the injected [`SchemaLookup`] as nested maps are encountered. Conversion is
/// fail-fast: the first bad attribute aborts the call and leaves any target
/// entity untouched.
pub struct EntityMapper {
    lookup: Arc<dyn SchemaLookup>,
    config: MapperConfig,
}

impl EntityMapper {
    pub fn new(lookup: Arc<dyn SchemaLookup>) -> Self {
        Self::with_config(lookup, MapperConfig::default())
    }

    pub fn with_config(lookup: Arc<dyn SchemaLookup>, config: MapperConfig) -> Self {
        Self { lookup, config }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Looks up a schema, reporting a miss as [`MappingError::MissingSchema`].
    pub fn resolve_schema(&self, key: &str) -> MappingResult<Arc<Schema>> {
        self.lookup
            .schema_by_key(key)
            .ok_or_else(|| MappingError::MissingSchema {
                key: key.to_string(),
            })
    }

    /// Builds a fresh entity of `schema` from a generic map.
    ///
    /// Values for computed attributes are ignored. `null` values leave the
    /// attribute unset.
    pub fn to_entity(
        &self,
        schema: Arc<Schema>,
        map: &GenericMap,
        auth: &dyn OverwriteAuthorization,
    ) -> MappingResult<DynamicEntity> {
        debug!(schema = schema.key(), keys = map.len(), "Converting generic map to entity");
        let values = self.convert_map(&schema, map, &[], auth)?;
        let mut entity = DynamicEntity::new(schema);
        assign(&mut entity, values)?;
        Ok(entity)
    }

    /// Same as [`to_entity`](Self::to_entity), resolving the schema by key first.
    pub fn to_entity_by_key(
        &self,
        schema_key: &str,
        map: &GenericMap,
        auth: &dyn OverwriteAuthorization,
    ) -> MappingResult<DynamicEntity> {
        let schema = self.resolve_schema(schema_key)?;
        self.to_entity(schema, map, auth)
    }

    /// Applies a generic map onto an existing entity.
    ///
    /// Keys present in `map` replace the stored values (`null` clears them);
    /// other attributes are kept. Meshable document lists are reconciled
    /// against what the entity currently holds. On error the entity is left
    /// unchanged.
    pub fn apply_map(
        &self,
        entity: &mut DynamicEntity,
        map: &GenericMap,
        auth: &dyn OverwriteAuthorization,
    ) -> MappingResult<()> {
        let schema = Arc::clone(entity.schema());
        debug!(schema = schema.key(), keys = map.len(), "Applying generic map to entity");
        let values = self.convert_map(&schema, map, &[&*entity], auth)?;
        assign(entity, values)
    }

    /// Converts every key of `map`. `None` marks an explicit `null`.
    ///
    /// `stored` holds the stored entities the map may correspond to. Their
    /// document lists are pooled when meshing, so list elements need not be
    /// paired with a stored element by position.
    fn convert_map(
        &self,
        schema: &Schema,
        map: &GenericMap,
        stored: &[&DynamicEntity],
        auth: &dyn OverwriteAuthorization,
    ) -> MappingResult<Vec<(String, Option<Value>)>> {
        let mut converted = Vec::with_capacity(map.len());
        for (key, json) in map {
            let Some(attribute) = schema.attribute(key) else {
                if schema.is_computed(key) {
                    debug!(schema = schema.key(), attribute = %key, "Ignoring value for computed attribute");
                    continue;
                }
                return Err(MappingError::UnknownAttribute {
                    schema: schema.key().to_string(),
                    key: key.clone(),
                });
            };

            if json.is_null() {
                converted.push((key.clone(), None));
                continue;
            }
            let existing: Vec<&Value> = stored.iter().filter_map(|entity| entity.get(key)).collect();
            let value = self.convert_attribute(attribute, json, &existing, auth)?;
            converted.push((key.clone(), Some(value)));
        }
        Ok(converted)
    }

    fn convert_attribute(
        &self,
        attribute: &SchemaAttribute,
        json: &JsonValue,
        existing: &[&Value],
        auth: &dyn OverwriteAuthorization,
    ) -> MappingResult<Value> {
        let key = attribute.name.as_str();
        match attribute.attribute_type {
            AttributeType::DynamicEntity => {
                let Some(map) = json.as_object() else {
                    return Err(MappingError::InvalidShape {
                        key: key.to_string(),
                        expected: "object",
                    });
                };
                let children: Vec<&DynamicEntity> =
                    existing.iter().filter_map(|v| v.as_entity()).collect();
                let child = self
                    .convert_nested(attribute, map, &children, auth)
                    .map_err(|e| e.within(key))?;
                Ok(Value::from(child))
            }
            AttributeType::List => {
                let Some(items) = json.as_array() else {
                    return Err(MappingError::InvalidShape {
                        key: key.to_string(),
                        expected: "array",
                    });
                };
                if !items.is_empty() && self.config.mesh.applies_to(attribute) {
                    return self.mesh(attribute, items, existing, auth);
                }
                let content = attribute.content_type.unwrap_or(AttributeType::String);
                let stored_elements: Vec<&DynamicEntity> = existing
                    .iter()
                    .filter_map(|v| v.as_list())
                    .flatten()
                    .filter_map(Value::as_entity)
                    .collect();
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        self.convert_element(attribute, content, item, &stored_elements, auth)
                            .map_err(|e| e.within(&format!("[{i}]")).within(key))
                    })
                    .collect::<MappingResult<Vec<_>>>()
                    .map(Value::List)
            }
            declared => coerce_leaf(json, declared).ok_or_else(|| MappingError::InvalidType {
                key: key.to_string(),
                expected: declared,
            }),
        }
    }

    /// Converts one list element. Errors carry an empty key; the caller adds
    /// the element path.
    fn convert_element(
        &self,
        attribute: &SchemaAttribute,
        content: AttributeType,
        json: &JsonValue,
        stored_elements: &[&DynamicEntity],
        auth: &dyn OverwriteAuthorization,
    ) -> MappingResult<Value> {
        if content == AttributeType::DynamicEntity {
            let Some(map) = json.as_object() else {
                return Err(MappingError::InvalidShape {
                    key: String::new(),
                    expected: "object",
                });
            };
            return self
                .convert_nested(attribute, map, stored_elements, auth)
                .map(Value::from);
        }
        coerce_leaf(json, content).ok_or_else(|| MappingError::InvalidType {
            key: String::new(),
            expected: content,
        })
    }

    fn convert_nested(
        &self,
        attribute: &SchemaAttribute,
        map: &GenericMap,
        stored: &[&DynamicEntity],
        auth: &dyn OverwriteAuthorization,
    ) -> MappingResult<DynamicEntity> {
        let schema = self.resolve_schema(attribute.entity_schema.as_deref().unwrap_or_default())?;
        let stored: Vec<&DynamicEntity> = stored
            .iter()
            .copied()
            .filter(|child| child.schema_key() == schema.key())
            .collect();
        let values = self.convert_map(&schema, map, &stored, auth)?;
        let mut child = DynamicEntity::new(schema);
        assign(&mut child, values)?;
        Ok(child)
    }

    fn mesh(
        &self,
        attribute: &SchemaAttribute,
        items: &[JsonValue],
        existing: &[&Value],
        auth: &dyn OverwriteAuthorization,
    ) -> MappingResult<Value> {
        let incoming = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                coerce_document(item).ok_or_else(|| MappingError::InvalidType {
                    key: format!("{}[{i}]", attribute.name),
                    expected: AttributeType::Document,
                })
            })
            .collect::<MappingResult<Vec<Document>>>()?;

        let current: Vec<Document> = existing
            .iter()
            .filter_map(|v| v.as_list())
            .flatten()
            .filter_map(Value::as_document)
            .cloned()
            .collect();

        debug!(
            attribute = %attribute.name,
            current = current.len(),
            incoming = incoming.len(),
            "Meshing document list"
        );
        let merged = mesh_documents(&current, incoming, auth.can_overwrite_protected_fields());
        Ok(Value::List(merged.into_iter().map(Value::Document).collect()))
    }
}

fn assign(
    entity: &mut DynamicEntity,
    values: Vec<(String, Option<Value>)>,
) -> MappingResult<()> {
    for (key, value) in values {
        match value {
            Some(value) => {
                entity.set(&key, value)?;
            }
            None => {
                entity.remove(&key);
            }
        }
    }
    Ok(())
}

/// Converts an entity to its sparse generic-map form.
///
/// Unset attributes are absent from the output rather than `null`. Computed
/// attributes are never emitted.
pub fn to_generic_map(entity: &DynamicEntity) -> GenericMap {
    let mut map = GenericMap::new();
    for attribute in entity.schema().attributes() {
        if let Some(json) = entity.get(&attribute.name).and_then(value_to_json) {
            map.insert(attribute.name.clone(), json);
        }
    }
    map
}

/// JSON form of a single value. `None` for numbers JSON cannot represent.
pub fn value_to_json(value: &Value) -> Option<JsonValue> {
    match value {
        Value::String(s) => Some(JsonValue::String(s.clone())),
        Value::Integer(i) => Some(JsonValue::from(*i)),
        Value::Number(n) => serde_json::Number::from_f64(*n).map(JsonValue::Number),
        Value::Boolean(b) => Some(JsonValue::Bool(*b)),
        Value::Date(_) | Value::Time(_) | Value::DateTime(_) => {
            Some(JsonValue::String(leaf_text(value)))
        }
        Value::Document(d) => serde_json::to_value(d).ok(),
        Value::Entity(child) => Some(JsonValue::Object(to_generic_map(child))),
        Value::List(items) => Some(JsonValue::Array(
            items.iter().filter_map(value_to_json).collect(),
        )),
    }
}
