//! Store Configuration
//!
//! Two values select the store: a URL naming the backend and a logical
//! database name.
//!
//! - `mongodb://` or `mongodb+srv://` connects to a MongoDB deployment
//! - `memory://` keeps documents in process memory
//! - `file:///abs/path` keeps them under `/abs/path/<database_name>/`

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use super::errors::{StoreError, StoreResult};

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const DATABASE_NAME_VAR: &str = "DATABASE_NAME";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend address (`DATABASE_URL`)
    #[serde(default)]
    pub database_url: Option<String>,

    /// Logical database name (`DATABASE_NAME`)
    #[serde(default)]
    pub database_name: Option<String>,
}

/// Where a configured store lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    Mongo { uri: String, database: String },
    Memory,
    File(PathBuf),
}

impl StoreConfig {
    pub fn new(database_url: Option<String>, database_name: Option<String>) -> Self {
        Self {
            database_url: database_url.filter(|s| !s.is_empty()),
            database_name: database_name.filter(|s| !s.is_empty()),
        }
    }

    /// Shorthand for an in-memory store
    pub fn memory(database_name: impl Into<String>) -> Self {
        Self::new(Some("memory://".to_string()), Some(database_name.into()))
    }

    pub fn url_is_set(&self) -> bool {
        self.database_url.is_some()
    }

    /// Resolve the configured values into a backend target
    pub fn target(&self) -> StoreResult<StoreTarget> {
        let raw = self
            .database_url
            .as_deref()
            .ok_or(StoreError::NotConfigured(DATABASE_URL_VAR))?;
        let name = self
            .database_name
            .as_deref()
            .ok_or(StoreError::NotConfigured(DATABASE_NAME_VAR))?;

        // Multi-host connection strings are not valid URLs, so check the
        // scheme before parsing.
        if let Some(("mongodb" | "mongodb+srv", _)) = raw.split_once("://") {
            return Ok(StoreTarget::Mongo {
                uri: raw.to_string(),
                database: name.to_string(),
            });
        }

        let url = Url::parse(raw).map_err(|e| StoreError::UnsupportedUrl(format!("{}: {}", raw, e)))?;
        match url.scheme() {
            "memory" => Ok(StoreTarget::Memory),
            "file" => {
                let root = url.to_file_path().map_err(|_| {
                    StoreError::UnsupportedUrl(format!("{}: not an absolute file path", raw))
                })?;
                Ok(StoreTarget::File(root.join(name)))
            }
            other => Err(StoreError::UnsupportedUrl(format!(
                "scheme '{}' is not supported (use mongodb://, memory:// or file://)",
                other
            ))),
        }
    }
}
