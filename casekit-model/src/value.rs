use crate::{AttributeType, DynamicEntity};
use casekit_types::DocumentId;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Review state of an uploaded document. Set by reviewers, never by the
/// applicant submitting the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    New,
    Pending,
    Accepted,
    Rejected,
}

/// Reference to a file held by the document-management service.
///
/// `document_id` is the identity used when reconciling document lists. The
/// review fields are server-controlled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub document_id: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_status: Option<ReviewStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejection_reasons: Vec<String>,
}

impl Document {
    /// A document known only by its identifier.
    pub fn new(document_id: DocumentId) -> Self {
        Self {
            document_id,
            filename: None,
            review_status: None,
            reviewed_by: None,
            reviewed_on: None,
            rejection_reasons: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn with_review_status(mut self, status: ReviewStatus) -> Self {
        self.review_status = Some(status);
        self
    }
}

/// A typed attribute value held by a [`DynamicEntity`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(DateTime<Utc>),
    Document(Document),
    Entity(Box<DynamicEntity>),
    List(Vec<Value>),
}

impl Value {
    /// The attribute type this value inhabits.
    #[must_use]
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Value::String(_) => AttributeType::String,
            Value::Integer(_) => AttributeType::Integer,
            Value::Number(_) => AttributeType::Number,
            Value::Boolean(_) => AttributeType::Boolean,
            Value::Date(_) => AttributeType::Date,
            Value::Time(_) => AttributeType::Time,
            Value::DateTime(_) => AttributeType::DateTime,
            Value::Document(_) => AttributeType::Document,
            Value::Entity(_) => AttributeType::DynamicEntity,
            Value::List(_) => AttributeType::List,
        }
    }

    /// Checks this value against a declared type.
    ///
    /// Lists must be homogeneous in `content_type`; nested entities must be
    /// instances of `entity_schema` when one is given. Numbers must be finite,
    /// since JSON has no representation for NaN or infinity.
    pub fn conforms_to(
        &self,
        attribute_type: AttributeType,
        content_type: Option<AttributeType>,
        entity_schema: Option<&str>,
    ) -> bool {
        match (attribute_type, self) {
            (AttributeType::List, Value::List(items)) => content_type.is_some_and(|content| {
                items
                    .iter()
                    .all(|item| item.conforms_to(content, None, entity_schema))
            }),
            (AttributeType::DynamicEntity, Value::Entity(entity)) => {
                entity_schema.is_none_or(|key| entity.schema_key() == key)
            }
            (AttributeType::Number, Value::Number(n)) => n.is_finite(),
            (declared, value) => value.attribute_type() == declared,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&DynamicEntity> {
        match self {
            Value::Entity(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveTime> for Value {
    fn from(t: NaiveTime) -> Self {
        Value::Time(t)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::DateTime(t)
    }
}

impl From<Document> for Value {
    fn from(d: Document) -> Self {
        Value::Document(d)
    }
}

impl From<DynamicEntity> for Value {
    fn from(e: DynamicEntity) -> Self {
        Value::Entity(Box::new(e))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}
