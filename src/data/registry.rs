//! Data registry: versioning and source tracking for each catalog file.
//! Written by the normalizer; read by the CLI to show "data as of".

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSetEntry {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub path: String,
}

pub type Registry = BTreeMap<String, DataSetEntry>;

pub const DEFAULT_REGISTRY_PATH: &str = "data/registry.json";

/// Load the registry. Missing or unreadable files yield an empty registry.
pub fn load_registry(path: impl AsRef<Path>) -> Registry {
    let path = path.as_ref();
    let Ok(raw) = fs::read_to_string(path) else {
        log::debug!("no registry at {}", path.display());
        return Registry::new();
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        log::warn!("ignoring malformed registry {}: {err}", path.display());
        Registry::new()
    })
}

pub fn write_registry(path: impl AsRef<Path>, registry: &Registry) -> Result<(), CatalogError> {
    let path = path.as_ref();
    let payload = serde_json::to_string_pretty(registry).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, payload).map_err(|source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    })
}
