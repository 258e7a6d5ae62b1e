//! Mapper configuration, read from a TOML file such as:
//!
//! ```toml
//! [mesh]
//! enabled = true
//! # Empty means every list-of-Document attribute is reconciled.
//! attributes = ["proofOfIncome", "identityDocuments"]
//! ```

use crate::ConfigError;
use casekit_model::SchemaAttribute;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Which document-list attributes are reconciled by identity instead of
/// being replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshConfig {
    #[serde(default = "default_mesh_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub attributes: Vec<String>,
}

fn default_mesh_enabled() -> bool {
    true
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            enabled: default_mesh_enabled(),
            attributes: Vec::new(),
        }
    }
}

impl MeshConfig {
    /// Meshing applies only to lists of documents, and only to the listed
    /// attribute names when any are listed.
    pub fn applies_to(&self, attribute: &SchemaAttribute) -> bool {
        self.enabled
            && attribute.is_document_list()
            && (self.attributes.is_empty() || self.attributes.contains(&attribute.name))
    }
}

/// Settings for [`EntityMapper`](crate::EntityMapper).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    #[serde(default)]
    pub mesh: MeshConfig,
}

impl MapperConfig {
    /// Parses a config document strictly.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses a config file strictly.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Loads config from `path` if it exists.
    /// Falls back to defaults with a warning on read or parse errors.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No mapper config found at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::read(path) {
            Ok(config) => {
                info!("Loaded mapper config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("{}. Falling back to default mapper config.", e);
                Self::default()
            }
        }
    }
}
