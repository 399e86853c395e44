//! Data registry: versioning and source tracking for each dataset.
//! Written by the importers; read by the app to show "data as of".

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSetEntry {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub path: String,
}

pub type Registry = HashMap<String, DataSetEntry>;

pub const DEFAULT_REGISTRY_PATH: &str = "data/registry.json";

pub fn load_registry(path: impl AsRef<Path>) -> Registry {
    fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

pub fn save_registry(path: impl AsRef<Path>, registry: &Registry) -> std::io::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(registry).map_err(std::io::Error::other)?;
    fs::write(path, raw)
}

/// Record that a dataset was refreshed now.
pub fn record_update(registry: &mut Registry, name: &str, source: &str, data_path: &str) {
    registry.insert(
        name.to_string(),
        DataSetEntry {
            source: source.to_string(),
            data_version: None,
            last_updated: Some(chrono::Utc::now().to_rfc3339()),
            path: data_path.to_string(),
        },
    );
}
