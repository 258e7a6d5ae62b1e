//! Filesystem plumbing behind the `casekit` binary.
//!
//! Schemas live in a directory of persisted schema documents, one `*.json`
//! file each. Case data is read as generic maps.

use anyhow::{Context, Result, bail};
use casekit_codec::schema_from_value;
use casekit_mapper::{EntityMapper, GenericMap, MapperConfig, flatten, to_generic_map};
use casekit_model::{Schema, SchemaRegistry, UnresolvedReference};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Reads one persisted schema document.
pub fn load_schema_file(path: &Path) -> Result<Schema> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("Schema file {} is not valid JSON", path.display()))?;
    schema_from_value(value, None)
        .with_context(|| format!("Schema file {} is not a valid schema", path.display()))
}

/// Every `*.json` file directly inside `dir`, sorted by name.
pub fn schema_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list schema directory {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Loads every schema document in `dir` into a registry.
///
/// A later file with an already registered key replaces the earlier one.
pub fn load_registry(dir: &Path) -> Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::new();
    for path in schema_files(dir)? {
        let schema = load_schema_file(&path)?;
        debug!(key = schema.key(), file = %path.display(), "Loaded schema");
        if registry.register(schema).is_some() {
            warn!(file = %path.display(), "Schema key registered twice, keeping the later file");
        }
    }
    info!(count = registry.len(), dir = %dir.display(), "Schemas loaded");
    Ok(registry)
}

/// Reads a JSON object from `path` as a generic map.
pub fn read_generic_map(path: &Path) -> Result<GenericMap> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => bail!("{} must contain a JSON object", path.display()),
    }
}

/// Outcome of checking a set of schema documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Keys of the schemas that parsed, sorted.
    pub schemas: Vec<String>,
    pub unresolved: Vec<UnresolvedReference>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Parses every file and reports related-schema keys that none of them
/// define.
pub fn check(paths: &[PathBuf]) -> Result<CheckReport> {
    let mut registry = SchemaRegistry::new();
    for path in paths {
        registry.register(load_schema_file(path)?);
    }
    Ok(CheckReport {
        schemas: registry.keys().into_iter().map(str::to_string).collect(),
        unresolved: registry.unresolved_references(),
    })
}

/// Converts `input` to an entity of `schema_key` and returns its canonical
/// generic map.
///
/// With `current`, the input is applied on top of the stored state instead,
/// so meshable document lists keep their stored review fields unless
/// `authorized` is set.
pub fn convert(
    registry: SchemaRegistry,
    config: MapperConfig,
    schema_key: &str,
    input: &GenericMap,
    current: Option<&GenericMap>,
    authorized: bool,
) -> Result<GenericMap> {
    let mapper = EntityMapper::with_config(Arc::new(registry), config);
    let entity = match current {
        Some(stored) => {
            // Stored state is trusted as-is.
            let mut entity = mapper
                .to_entity_by_key(schema_key, stored, &true)
                .context("Stored entity does not match its schema")?;
            mapper.apply_map(&mut entity, input, &authorized)?;
            entity
        }
        None => mapper.to_entity_by_key(schema_key, input, &authorized)?,
    };
    Ok(to_generic_map(&entity))
}

/// Converts `input` and flattens the result into `path -> text`.
pub fn flatten_input(
    registry: SchemaRegistry,
    schema_key: &str,
    input: &GenericMap,
) -> Result<BTreeMap<String, String>> {
    let mapper = EntityMapper::new(Arc::new(registry));
    let entity = mapper.to_entity_by_key(schema_key, input, &false)?;
    Ok(flatten(&entity))
}
