//! Shared utilities for command handlers

use crate::config::{is_yaml, Config};
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use mcschema_catalog::build_registry;
use mcschema_core::{CollectionRegistry, SchemaRegistry, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Build and verify the schema catalog
pub fn catalog() -> Result<SchemaRegistry> {
    let _timer = Timer::new("catalog_build");
    Ok(build_registry()?)
}

/// Fail with [`Error::UnknownSchema`] unless `name` is registered
pub fn require_schema(schemas: &SchemaRegistry, name: &str) -> Result<()> {
    if schemas.contains(name) {
        Ok(())
    } else {
        Err(Error::UnknownSchema {
            name: name.to_string(),
        })
    }
}

/// Read a JSON or YAML document
pub fn load_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Read document");

    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
        })
    }
}

/// Load the collections fixture named on the command line or in the config
///
/// Without a fixture every pool is unknown and every resource id is accepted.
pub fn load_collections(path: Option<&Path>, config: &Config) -> Result<CollectionRegistry> {
    let Some(path) = path.or(config.collections.as_deref()) else {
        info!("No collections fixture given, resource ids are not checked");
        return Ok(CollectionRegistry::new());
    };
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    let collections: CollectionRegistry = if is_yaml(path) {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    debug!(
        path = %path.display(),
        pools = collections.pools().count(),
        "Loaded collections"
    );
    Ok(collections)
}
