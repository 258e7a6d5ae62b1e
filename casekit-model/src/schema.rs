use crate::{AttributeConfiguration, SchemaError};
use casekit_types::{AuditStamp, SchemaId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// The closed set of value kinds an attribute can declare.
///
/// The serialized names are the ones stored in persisted schema documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    String,
    Integer,
    Number,
    Boolean,
    Date,
    Time,
    DateTime,
    /// A nested record described by another schema.
    DynamicEntity,
    /// An ordered, homogeneous collection; the element kind is the
    /// attribute's `content_type`.
    List,
    /// An opaque reference to an uploaded document.
    Document,
}

impl AttributeType {
    /// Every supported type, in declaration order.
    pub const ALL: [AttributeType; 10] = [
        AttributeType::String,
        AttributeType::Integer,
        AttributeType::Number,
        AttributeType::Boolean,
        AttributeType::Date,
        AttributeType::Time,
        AttributeType::DateTime,
        AttributeType::DynamicEntity,
        AttributeType::List,
        AttributeType::Document,
    ];

    /// The persisted name of this type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            AttributeType::String => "String",
            AttributeType::Integer => "Integer",
            AttributeType::Number => "Number",
            AttributeType::Boolean => "Boolean",
            AttributeType::Date => "Date",
            AttributeType::Time => "Time",
            AttributeType::DateTime => "DateTime",
            AttributeType::DynamicEntity => "DynamicEntity",
            AttributeType::List => "List",
            AttributeType::Document => "Document",
        }
    }

    /// Looks a type up by its persisted name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// True for types whose values are single JSON scalars.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(
            self,
            AttributeType::DynamicEntity | AttributeType::List | AttributeType::Document
        )
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A settable attribute of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
    /// Element type. Only meaningful when `attribute_type` is `List`.
    pub content_type: Option<AttributeType>,
    /// Key of the related schema when the (element) type is `DynamicEntity`.
    pub entity_schema: Option<String>,
}

impl SchemaAttribute {
    /// A scalar or document attribute.
    pub fn new(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
            content_type: None,
            entity_schema: None,
        }
    }

    /// A list of scalars or documents.
    pub fn list(name: impl Into<String>, content_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attribute_type: AttributeType::List,
            content_type: Some(content_type),
            entity_schema: None,
        }
    }

    /// A nested entity described by the schema `schema_key`.
    pub fn entity(name: impl Into<String>, schema_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute_type: AttributeType::DynamicEntity,
            content_type: None,
            entity_schema: Some(schema_key.into()),
        }
    }

    /// A list of nested entities described by the schema `schema_key`.
    pub fn entity_list(name: impl Into<String>, schema_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute_type: AttributeType::List,
            content_type: Some(AttributeType::DynamicEntity),
            entity_schema: Some(schema_key.into()),
        }
    }

    /// The type of a single element: the content type for lists, the
    /// attribute type otherwise.
    #[must_use]
    pub fn element_type(&self) -> Option<AttributeType> {
        match self.attribute_type {
            AttributeType::List => self.content_type,
            other => Some(other),
        }
    }

    /// True for lists of documents, the collections that carry identity.
    #[must_use]
    pub fn is_document_list(&self) -> bool {
        self.attribute_type == AttributeType::List
            && self.content_type == Some(AttributeType::Document)
    }
}

/// A derived attribute. Its value comes from `expression` and is never
/// accepted from callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
    pub expression: String,
}

impl ComputedAttribute {
    pub fn new(
        name: impl Into<String>,
        attribute_type: AttributeType,
        expression: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            attribute_type,
            expression: expression.into(),
        }
    }
}

/// An administrator-defined record type.
///
/// Built through [`Schema::builder`], which enforces that attribute names are
/// unique and that list and nested-entity attributes are fully described.
/// Read-only once built; share it as `Arc<Schema>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    id: Option<SchemaId>,
    key: String,
    name: String,
    description: String,
    attributes: Vec<SchemaAttribute>,
    computed_attributes: Vec<ComputedAttribute>,
    attribute_configurations: BTreeMap<String, Vec<AttributeConfiguration>>,
    audit: Option<AuditStamp>,
}

impl Schema {
    /// Starts a schema definition with the given key.
    pub fn builder(key: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(key)
    }

    /// Reopens this schema for editing.
    pub fn to_builder(&self) -> SchemaBuilder {
        SchemaBuilder {
            id: self.id,
            key: self.key.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            attributes: self.attributes.clone(),
            computed_attributes: self.computed_attributes.clone(),
            attribute_configurations: self.attribute_configurations.clone(),
            audit: self.audit.clone(),
        }
    }

    pub fn id(&self) -> Option<SchemaId> {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn attributes(&self) -> &[SchemaAttribute] {
        &self.attributes
    }

    pub fn computed_attributes(&self) -> &[ComputedAttribute] {
        &self.computed_attributes
    }

    pub fn attribute_configurations(&self) -> &BTreeMap<String, Vec<AttributeConfiguration>> {
        &self.attribute_configurations
    }

    pub fn audit(&self) -> Option<&AuditStamp> {
        self.audit.as_ref()
    }

    /// Returns a copy carrying the identifier assigned by storage.
    #[must_use]
    pub fn with_id(mut self, id: SchemaId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns a copy carrying new audit metadata.
    #[must_use]
    pub fn with_audit(mut self, audit: AuditStamp) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Finds a settable attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&SchemaAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Finds a computed attribute by name.
    pub fn computed_attribute(&self, name: &str) -> Option<&ComputedAttribute> {
        self.computed_attributes.iter().find(|a| a.name == name)
    }

    pub fn is_computed(&self, name: &str) -> bool {
        self.computed_attribute(name).is_some()
    }

    /// Configurations attached to `attribute`, in declaration order.
    pub fn configurations_for(&self, attribute: &str) -> &[AttributeConfiguration] {
        self.attribute_configurations
            .get(attribute)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Identifiers of the document processors to run on files uploaded to
    /// `attribute`.
    pub fn document_processors(&self, attribute: &str) -> Vec<&str> {
        self.configurations_for(attribute)
            .iter()
            .filter_map(AttributeConfiguration::as_document_processing)
            .map(|c| c.processor_id.as_str())
            .collect()
    }

    /// Keys of the schemas this schema references, deduplicated, in
    /// attribute order.
    pub fn related_schema_keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.attributes
            .iter()
            .filter_map(|a| a.entity_schema.as_deref())
            .filter(|k| seen.insert(*k))
            .collect()
    }
}

/// Incremental, validating constructor for [`Schema`].
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    id: Option<SchemaId>,
    key: String,
    name: String,
    description: String,
    attributes: Vec<SchemaAttribute>,
    computed_attributes: Vec<ComputedAttribute>,
    attribute_configurations: BTreeMap<String, Vec<AttributeConfiguration>>,
    audit: Option<AuditStamp>,
}

impl SchemaBuilder {
    fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            id: None,
            name: key.clone(),
            key,
            description: String::new(),
            attributes: Vec::new(),
            computed_attributes: Vec::new(),
            attribute_configurations: BTreeMap::new(),
            audit: None,
        }
    }

    pub fn id(mut self, id: Option<SchemaId>) -> Self {
        self.id = id;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn attribute(mut self, attribute: SchemaAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn computed(mut self, attribute: ComputedAttribute) -> Self {
        self.computed_attributes.push(attribute);
        self
    }

    /// Appends a configuration to the named attribute.
    pub fn configuration(
        mut self,
        attribute: impl Into<String>,
        configuration: impl Into<AttributeConfiguration>,
    ) -> Self {
        self.attribute_configurations
            .entry(attribute.into())
            .or_default()
            .push(configuration.into());
        self
    }

    pub fn audit(mut self, audit: Option<AuditStamp>) -> Self {
        self.audit = audit;
        self
    }

    /// Validates the definition and produces the schema.
    pub fn build(self) -> Result<Schema, SchemaError> {
        if self.key.trim().is_empty() {
            return Err(SchemaError::EmptyKey);
        }

        let schema = &self.key;
        let mut names = HashSet::new();
        for attribute in &self.attributes {
            if !names.insert(attribute.name.as_str()) {
                return Err(SchemaError::DuplicateAttribute {
                    schema: schema.clone(),
                    attribute: attribute.name.clone(),
                });
            }
            validate_attribute(schema, attribute)?;
        }
        for computed in &self.computed_attributes {
            if !names.insert(computed.name.as_str()) {
                return Err(SchemaError::DuplicateAttribute {
                    schema: schema.clone(),
                    attribute: computed.name.clone(),
                });
            }
        }
        if let Some(target) = self
            .attribute_configurations
            .keys()
            .find(|name| !self.attributes.iter().any(|a| &a.name == *name))
        {
            return Err(SchemaError::UnknownConfigurationTarget {
                schema: schema.clone(),
                attribute: target.clone(),
            });
        }

        Ok(Schema {
            id: self.id,
            key: self.key,
            name: self.name,
            description: self.description,
            attributes: self.attributes,
            computed_attributes: self.computed_attributes,
            attribute_configurations: self.attribute_configurations,
            audit: self.audit,
        })
    }
}

fn validate_attribute(schema: &str, attribute: &SchemaAttribute) -> Result<(), SchemaError> {
    let element = match attribute.attribute_type {
        AttributeType::List => match attribute.content_type {
            None => {
                return Err(SchemaError::MissingContentType {
                    schema: schema.to_string(),
                    attribute: attribute.name.clone(),
                });
            }
            Some(AttributeType::List) => {
                return Err(SchemaError::UnsupportedContentType {
                    schema: schema.to_string(),
                    attribute: attribute.name.clone(),
                    content_type: AttributeType::List,
                });
            }
            Some(content) => content,
        },
        other => other,
    };

    if element == AttributeType::DynamicEntity
        && attribute.entity_schema.as_deref().is_none_or(str::is_empty)
    {
        return Err(SchemaError::MissingEntitySchema {
            schema: schema.to_string(),
            attribute: attribute.name.clone(),
        });
    }
    Ok(())
}
