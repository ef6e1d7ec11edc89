//! # Store Client
//!
//! The adapter the route layer talks to. Holds the store configuration and a
//! connection handle that is opened on first use and reused for the life of
//! the process. The outcome of that first attempt, success or failure, is
//! what every later call sees.

use std::sync::{Arc, OnceLock};

use serde_json::{Map, Value};

use super::backend::DocumentStore;
use super::config::{StoreConfig, StoreTarget};
use super::document::{DocumentId, StoredDocument, ID_FIELD};
use super::errors::{StoreError, StoreResult};
use super::file::FileStore;
use super::filter::EqualityFilter;
use super::memory::MemoryStore;
use super::mongo::MongoStore;
use crate::observability::Logger;

pub struct StoreClient {
    config: StoreConfig,
    connection: OnceLock<StoreResult<Arc<dyn DocumentStore>>>,
}

impl StoreClient {
    /// Client that connects lazily according to `config`
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            connection: OnceLock::new(),
        }
    }

    /// Client over an already-open store
    pub fn with_store(config: StoreConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config,
            connection: OnceLock::from(Ok(store)),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The shared connection, opening it if this is the first access
    pub fn connection(&self) -> StoreResult<Arc<dyn DocumentStore>> {
        self.connection
            .get_or_init(|| connect(&self.config))
            .clone()
    }

    /// Insert one record into `collection` and return its new identifier.
    ///
    /// Fields are written exactly as given.
    pub fn insert(&self, collection: &str, record: Map<String, Value>) -> StoreResult<DocumentId> {
        if record.contains_key(ID_FIELD) {
            return Err(StoreError::InvalidDocument(format!(
                "field '{}' is reserved for the store identifier",
                ID_FIELD
            )));
        }
        self.connection()?.insert_one(collection, record)
    }

    /// Up to `limit` records matching `filter`, in the store's natural order.
    ///
    /// A `limit` of 0 means no limit.
    pub fn query(
        &self,
        collection: &str,
        filter: &EqualityFilter,
        limit: usize,
    ) -> StoreResult<Vec<StoredDocument>> {
        let limit = (limit > 0).then_some(limit);
        self.connection()?.find(collection, filter, limit)
    }

    pub fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        self.connection()?.list_collection_names()
    }
}

impl std::fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreClient")
            .field("config", &self.config)
            .field("connected", &matches!(self.connection.get(), Some(Ok(_))))
            .finish()
    }
}

fn connect(config: &StoreConfig) -> StoreResult<Arc<dyn DocumentStore>> {
    let result = config.target().and_then(|target| -> StoreResult<Arc<dyn DocumentStore>> {
        match target {
            StoreTarget::Mongo { uri, database } => {
                Ok(Arc::new(MongoStore::connect(&uri, &database)?))
            }
            StoreTarget::Memory => Ok(Arc::new(MemoryStore::new())),
            StoreTarget::File(root) => Ok(Arc::new(FileStore::open(root)?)),
        }
    });

    match &result {
        Ok(store) => Logger::info("STORE_CONNECT", &[("backend", store.backend_name())]),
        Err(StoreError::NotConfigured(var)) => {
            Logger::warn("STORE_NOT_CONFIGURED", &[("missing", *var)])
        }
        Err(e) => Logger::error("STORE_CONNECT_FAILED", &[("error", &e.to_string())]),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_unconfigured_client_is_unavailable() {
        let client = StoreClient::new(StoreConfig::default());
        let err = client.insert("person", Map::new()).unwrap_err();
        assert!(err.is_unavailable());
        assert!(client.query("person", &EqualityFilter::new(), 10).is_err());
        assert!(client.list_collection_names().is_err());
    }

    #[test]
    fn test_connection_is_reused() {
        let client = StoreClient::new(StoreConfig::memory("hundred"));
        client.insert("person", record(json!({"name": "Ada"}))).unwrap();
        // A second connection would be a fresh, empty memory store
        assert_eq!(client.query("person", &EqualityFilter::new(), 10).unwrap().len(), 1);
    }

    #[test]
    fn test_zero_limit_means_unbounded() {
        let client = StoreClient::new(StoreConfig::memory("hundred"));
        for _ in 0..3 {
            client.insert("person", Map::new()).unwrap();
        }
        assert_eq!(client.query("person", &EqualityFilter::new(), 0).unwrap().len(), 3);
        assert_eq!(client.query("person", &EqualityFilter::new(), 2).unwrap().len(), 2);
    }

    #[test]
    fn test_reserved_id_field_rejected() {
        let client = StoreClient::new(StoreConfig::memory("hundred"));
        let err = client.insert("person", record(json!({"_id": "mine"}))).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDocument(_)));
    }

    #[test]
    fn test_file_backend_from_url() {
        let tmp = TempDir::new().unwrap();
        let url = url::Url::from_directory_path(tmp.path()).unwrap().to_string();
        let client = StoreClient::new(StoreConfig::new(Some(url), Some("hundred".into())));

        client.insert("person", record(json!({"name": "Ada"}))).unwrap();
        assert!(tmp.path().join("hundred").join("person.jsonl").exists());
        assert_eq!(client.list_collection_names().unwrap(), vec!["person"]);
    }

    #[test]
    fn test_mongo_client_connects_lazily_and_reports_failures() {
        let client = StoreClient::new(StoreConfig::new(
            Some("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200".into()),
            Some("hundred".into()),
        ));

        assert_eq!(client.connection().unwrap().backend_name(), "mongodb");
        let err = client.insert("person", Map::new()).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
        assert!(client.query("person", &EqualityFilter::new(), 10).is_err());
    }

    #[test]
    fn test_failed_connect_is_cached() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let url = url::Url::from_file_path(&blocker).unwrap().to_string();
        let client = StoreClient::new(StoreConfig::new(Some(url), Some("hundred".into())));

        let first = client.connection().unwrap_err();
        std::fs::remove_file(&blocker).unwrap();
        assert_eq!(client.connection().unwrap_err(), first);
    }
}
