//! Liveness and Diagnostic Routes
//!
//! `GET /` always answers. `GET /test` probes the store and reports what it
//! finds. Probe failures are written into the body and the response is
//! still 200: this endpoint is for humans reading it, not for health-check
//! automation.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::errors::MAX_ERROR_CHARS;
use super::state::AppState;
use crate::observability::truncate_message;
use crate::store::{StoreClient, StoreConfig, StoreError};

/// Collection names listed by the diagnostic endpoint at most
pub const MAX_LISTED_COLLECTIONS: usize = 10;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// Diagnostic report. All values are human-readable strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl StatusResponse {
    /// Report before the store is probed: configuration filled in, nothing
    /// connected
    fn unprobed(config: &StoreConfig) -> Self {
        Self {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: if config.url_is_set() { "✅ Set" } else { "❌ Not Set" }.to_string(),
            database_name: config
                .database_name
                .clone()
                .unwrap_or_else(|| "❌ Not Set".to_string()),
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }

    /// Probe `store` and describe the result
    pub fn probe(store: &StoreClient) -> Self {
        let mut report = Self::unprobed(store.config());

        let connection = match store.connection() {
            Ok(connection) => connection,
            Err(StoreError::NotConfigured(_)) => {
                report.database = "⚠️  Available but not initialized".to_string();
                return report;
            }
            Err(e) => {
                report.database = format!("❌ Error: {}", truncate_message(&e.to_string(), MAX_ERROR_CHARS));
                return report;
            }
        };

        match connection.list_collection_names() {
            Ok(names) => {
                report.collections = names.into_iter().take(MAX_LISTED_COLLECTIONS).collect();
                report.database = "✅ Connected & Working".to_string();
                report.connection_status = "Connected".to_string();
            }
            Err(e) => {
                report.database = format!(
                    "⚠️  Connected but Error: {}",
                    truncate_message(&e.to_string(), MAX_ERROR_CHARS)
                );
            }
        }

        report
    }

    /// Report used when the probe itself could not run
    fn probe_failed(config: &StoreConfig, reason: &str) -> Self {
        let mut report = Self::unprobed(config);
        report.database = format!("❌ Error: {}", truncate_message(reason, MAX_ERROR_CHARS));
        report
    }
}

/// Create liveness and diagnostic routes
pub fn status_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/test", get(status_handler))
        .with_state(state)
}

async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hundred backend is running".to_string(),
    })
}

async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let report = state
        .with_store(|store| Ok(StatusResponse::probe(store)))
        .await
        .unwrap_or_else(|e| StatusResponse::probe_failed(state.store.config(), &e.to_string()));
    Json(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::store::{DocumentId, DocumentStore, EqualityFilter, StoreResult, StoredDocument};
    use serde_json::{Map, Value};

    #[test]
    fn test_unconfigured_store() {
        let report = StatusResponse::probe(&StoreClient::new(StoreConfig::default()));
        assert_eq!(report.database, "⚠️  Available but not initialized");
        assert_eq!(report.database_url, "❌ Not Set");
        assert_eq!(report.database_name, "❌ Not Set");
        assert_eq!(report.connection_status, "Not Connected");
        assert!(report.collections.is_empty());
    }

    #[test]
    fn test_connected_store_lists_at_most_ten_collections() {
        let client = StoreClient::new(StoreConfig::memory("hundred"));
        for i in 0..12 {
            client.insert(&format!("c{:02}", i), Map::new()).unwrap();
        }

        let report = StatusResponse::probe(&client);
        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.database_url, "✅ Set");
        assert_eq!(report.database_name, "hundred");
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.collections.len(), MAX_LISTED_COLLECTIONS);
    }

    #[test]
    fn test_unsupported_url_reported_as_error() {
        let client = StoreClient::new(StoreConfig::new(
            Some("redis://localhost".into()),
            Some("hundred".into()),
        ));
        let report = StatusResponse::probe(&client);
        assert!(report.database.starts_with("❌ Error: "));
        assert_eq!(report.connection_status, "Not Connected");
    }

    #[test]
    fn test_unreachable_mongo_reported_as_listing_error() {
        let client = StoreClient::new(StoreConfig::new(
            Some("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200".into()),
            Some("hundred".into()),
        ));
        let report = StatusResponse::probe(&client);
        assert!(report.database.starts_with("⚠️  Connected but Error: "), "{}", report.database);
        assert_eq!(report.database_url, "✅ Set");
        assert_eq!(report.connection_status, "Not Connected");
        assert!(report.collections.is_empty());
    }

    #[test]
    fn test_failed_probe_keeps_configuration() {
        let config = StoreConfig::new(Some("mongodb://db:27017".into()), Some("hundred".into()));
        let report = StatusResponse::probe_failed(&config, "store task failed: panicked");

        assert_eq!(report.database, "❌ Error: store task failed: panicked");
        assert_eq!(report.database_url, "✅ Set");
        assert_eq!(report.database_name, "hundred");
        assert_eq!(report.connection_status, "Not Connected");
        assert_eq!(report.backend, "✅ Running");
    }

    #[derive(Debug)]
    struct BrokenListing;

    impl DocumentStore for BrokenListing {
        fn backend_name(&self) -> &'static str {
            "broken"
        }

        fn insert_one(&self, _: &str, _: Map<String, Value>) -> StoreResult<DocumentId> {
            Err(StoreError::Io("disk unplugged".into()))
        }

        fn find(
            &self,
            _: &str,
            _: &EqualityFilter,
            _: Option<usize>,
        ) -> StoreResult<Vec<StoredDocument>> {
            Err(StoreError::Io("disk unplugged".into()))
        }

        fn list_collection_names(&self) -> StoreResult<Vec<String>> {
            Err(StoreError::Io("disk unplugged".into()))
        }
    }

    #[test]
    fn test_listing_failure_embedded_in_report() {
        let client = StoreClient::with_store(StoreConfig::memory("hundred"), Arc::new(BrokenListing));
        let report = StatusResponse::probe(&client);
        assert_eq!(report.database, "⚠️  Connected but Error: I/O error: disk unplugged");
        assert_eq!(report.connection_status, "Not Connected");
    }
}
