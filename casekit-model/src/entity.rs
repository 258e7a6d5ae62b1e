use crate::{Document, EntityError, Schema, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A runtime instance of a [`Schema`].
///
/// Holds typed values keyed by attribute name. Every stored key is a declared,
/// non-computed attribute and every value conforms to its declared type;
/// [`set`](Self::set) enforces both. Unset attributes are simply absent.
#[derive(Debug, Clone)]
pub struct DynamicEntity {
    schema: Arc<Schema>,
    values: BTreeMap<String, Value>,
}

impl DynamicEntity {
    /// An empty instance of `schema`.
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            values: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn schema_key(&self) -> &str {
        self.schema.key()
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.values.get(attribute)
    }

    /// Assigns a value, returning the one it replaced.
    pub fn set(
        &mut self,
        attribute: &str,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, EntityError> {
        let value = value.into();
        let Some(declared) = self.schema.attribute(attribute) else {
            if self.schema.is_computed(attribute) {
                return Err(EntityError::ComputedAttribute {
                    attribute: attribute.to_string(),
                });
            }
            return Err(EntityError::UnknownAttribute {
                schema: self.schema.key().to_string(),
                attribute: attribute.to_string(),
            });
        };

        if !value.conforms_to(
            declared.attribute_type,
            declared.content_type,
            declared.entity_schema.as_deref(),
        ) {
            return Err(EntityError::TypeMismatch {
                attribute: attribute.to_string(),
                expected: declared.attribute_type,
            });
        }
        Ok(self.values.insert(attribute.to_string(), value))
    }

    pub fn remove(&mut self, attribute: &str) -> Option<Value> {
        self.values.remove(attribute)
    }

    /// Set attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// String value of an attribute.
    pub fn get_str(&self, attribute: &str) -> Option<&str> {
        self.get(attribute).and_then(Value::as_str)
    }

    /// Boolean value of an attribute.
    pub fn get_bool(&self, attribute: &str) -> Option<bool> {
        self.get(attribute).and_then(Value::as_bool)
    }

    /// Numeric value of an attribute; integers widen to `f64`.
    pub fn get_number(&self, attribute: &str) -> Option<f64> {
        self.get(attribute).and_then(Value::as_f64)
    }

    /// Nested entity held by an attribute.
    pub fn get_entity(&self, attribute: &str) -> Option<&DynamicEntity> {
        self.get(attribute).and_then(Value::as_entity)
    }

    /// Documents held by a document or document-list attribute.
    pub fn documents(&self, attribute: &str) -> Vec<&Document> {
        match self.get(attribute) {
            Some(Value::Document(d)) => vec![d],
            Some(Value::List(items)) => items.iter().filter_map(Value::as_document).collect(),
            _ => Vec::new(),
        }
    }
}

impl PartialEq for DynamicEntity {
    fn eq(&self, other: &Self) -> bool {
        self.schema.key() == other.schema.key() && self.values == other.values
    }
}
