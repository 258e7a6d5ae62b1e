//! Flattening of entity trees into path-keyed strings for text search.
//!
//! ```text
//! applicant.firstName      -> "Ada"
//! dependents[1].age        -> "7"
//! proofOfIncome[0]         -> "0190c7a2-..."   (document id)
//! ```

use casekit_model::{DynamicEntity, Value};
use chrono::SecondsFormat;
use std::collections::BTreeMap;

/// Flattens every set attribute of `entity` into `path -> text`.
///
/// Nested entities extend the path with `.name`, list elements with `[i]`.
/// Documents contribute their identifier. Blank strings are left out.
pub fn flatten(entity: &DynamicEntity) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for (name, value) in entity.iter() {
        flatten_into(name.to_string(), value, &mut out);
    }
    out
}

fn flatten_into(path: String, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Entity(child) => {
            for (name, nested) in child.iter() {
                flatten_into(format!("{path}.{name}"), nested, out);
            }
        }
        Value::List(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(format!("{path}[{i}]"), item, out);
            }
        }
        leaf => {
            let text = leaf_text(leaf);
            if !text.trim().is_empty() {
                out.insert(path, text);
            }
        }
    }
}

/// Natural string form of a leaf value.
pub(crate) fn leaf_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Date(d) => d.to_string(),
        Value::Time(t) => t.to_string(),
        Value::DateTime(t) => t.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        Value::Document(d) => d.document_id.to_string(),
        Value::Entity(_) | Value::List(_) => String::new(),
    }
}
