//! Scalar coercion from JSON values to declared attribute types.

use casekit_model::{AttributeType, Document, Value};
use casekit_types::DocumentId;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::Value as JsonValue;

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Converts a JSON value to a leaf value of type `ty`.
///
/// Returns `None` when the value cannot represent that type. Structural types
/// (`DynamicEntity`, `List`) are never leaves and always return `None`.
pub(crate) fn coerce_leaf(json: &JsonValue, ty: AttributeType) -> Option<Value> {
    match ty {
        AttributeType::String => coerce_string(json).map(Value::String),
        AttributeType::Integer => coerce_integer(json).map(Value::Integer),
        AttributeType::Number => coerce_number(json).map(Value::Number),
        AttributeType::Boolean => coerce_boolean(json).map(Value::Boolean),
        AttributeType::Date => coerce_date(json).map(Value::Date),
        AttributeType::Time => coerce_time(json).map(Value::Time),
        AttributeType::DateTime => coerce_date_time(json).map(Value::DateTime),
        AttributeType::Document => coerce_document(json).map(Value::Document),
        AttributeType::DynamicEntity | AttributeType::List => None,
    }
}

fn coerce_string(json: &JsonValue) -> Option<String> {
    match json {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_integer(json: &JsonValue) -> Option<i64> {
    match json {
        JsonValue::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                // i64::MAX as f64 rounds up to 2^63, which does not fit.
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_number(json: &JsonValue) -> Option<f64> {
    let n = match json {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn coerce_boolean(json: &JsonValue) -> Option<bool> {
    match json {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        JsonValue::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn coerce_date(json: &JsonValue) -> Option<NaiveDate> {
    let s = json.as_str()?.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn coerce_time(json: &JsonValue) -> Option<NaiveTime> {
    let s = json.as_str()?.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(s, format).ok())
}

fn coerce_date_time(json: &JsonValue) -> Option<DateTime<Utc>> {
    match json {
        JsonValue::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        JsonValue::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

/// Documents arrive either as full objects or as a bare identifier.
pub(crate) fn coerce_document(json: &JsonValue) -> Option<Document> {
    match json {
        JsonValue::Object(_) => serde_json::from_value(json.clone()).ok(),
        JsonValue::String(s) => DocumentId::parse(s.trim()).ok().map(Document::new),
        _ => None,
    }
}
