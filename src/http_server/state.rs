//! Shared handler state

use std::sync::Arc;

use super::errors::{ApiError, ApiResult};
use crate::store::{StoreClient, StoreResult};

/// State shared across handlers: the one store client of the process
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<StoreClient>,
}

impl AppState {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }

    /// Run a store operation on the blocking pool.
    ///
    /// Backends do synchronous I/O, so calls are kept off the async workers.
    pub async fn with_store<T, F>(&self, op: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&StoreClient) -> StoreResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| ApiError::Internal(format!("store task failed: {}", e)))?
            .map_err(ApiError::from)
    }
}
