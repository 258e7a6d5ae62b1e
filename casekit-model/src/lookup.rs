use crate::Schema;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves related-schema references during conversion.
///
/// The conversion engine calls this for every nested-entity attribute it
/// meets. Implementations must be safe to share between threads; a miss is
/// reported to callers as a missing-schema error, never a panic.
pub trait SchemaLookup: Send + Sync {
    /// Returns the schema registered under `key`, if any.
    fn schema_by_key(&self, key: &str) -> Option<Arc<Schema>>;
}

/// Capability check consulted when reconciling document lists.
///
/// Callers holding this capability may overwrite server-controlled fields
/// (such as review status) of documents already stored on an entity.
pub trait OverwriteAuthorization: Send + Sync {
    fn can_overwrite_protected_fields(&self) -> bool {
        false
    }
}

impl OverwriteAuthorization for bool {
    fn can_overwrite_protected_fields(&self) -> bool {
        *self
    }
}

/// A related-schema key that does not resolve inside a [`SchemaRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub schema: String,
    pub attribute: String,
    pub missing_key: String,
}

/// In-memory schema store keyed by schema key.
///
/// Schemas reference each other by key only, so registering self-referential
/// or mutually recursive schemas is fine.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<Schema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema, replacing any previous schema with the same key.
    pub fn register(&mut self, schema: Schema) -> Option<Arc<Schema>> {
        self.register_shared(Arc::new(schema))
    }

    pub fn register_shared(&mut self, schema: Arc<Schema>) -> Option<Arc<Schema>> {
        self.schemas.insert(schema.key().to_string(), schema)
    }

    pub fn remove(&mut self, key: &str) -> Option<Arc<Schema>> {
        self.schemas.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<Arc<Schema>> {
        self.schemas.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.schemas.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Every related-schema reference that would fail to resolve, ordered by
    /// schema key then attribute order.
    pub fn unresolved_references(&self) -> Vec<UnresolvedReference> {
        let mut missing = Vec::new();
        for key in self.keys() {
            let schema = &self.schemas[key];
            for attribute in schema.attributes() {
                if let Some(related) = attribute.entity_schema.as_deref()
                    && !self.contains(related)
                {
                    missing.push(UnresolvedReference {
                        schema: key.to_string(),
                        attribute: attribute.name.clone(),
                        missing_key: related.to_string(),
                    });
                }
            }
        }
        missing
    }
}

impl SchemaLookup for SchemaRegistry {
    fn schema_by_key(&self, key: &str) -> Option<Arc<Schema>> {
        self.get(key)
    }
}

impl FromIterator<Schema> for SchemaRegistry {
    fn from_iter<I: IntoIterator<Item = Schema>>(iter: I) -> Self {
        let mut registry = Self::new();
        for schema in iter {
            registry.register(schema);
        }
        registry
    }
}
