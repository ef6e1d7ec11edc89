//! # Document Store Backend Trait

use serde_json::{Map, Value};

use super::document::{DocumentId, StoredDocument};
use super::errors::{StoreError, StoreResult};
use super::filter::EqualityFilter;

/// Backend trait for document stores.
///
/// Implementations own their own synchronization; callers share one
/// handle across all requests.
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Short backend name for logs and diagnostics
    fn backend_name(&self) -> &'static str;

    /// Persist `fields` as a new document and return its generated id
    fn insert_one(&self, collection: &str, fields: Map<String, Value>) -> StoreResult<DocumentId>;

    /// Documents matching `filter` in insertion order, at most `limit` if given
    fn find(
        &self,
        collection: &str,
        filter: &EqualityFilter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<StoredDocument>>;

    /// Names of all collections holding at least one document, sorted
    fn list_collection_names(&self) -> StoreResult<Vec<String>>;
}

/// Reject collection names that could escape a directory or be empty
pub fn validate_collection_name(name: &str) -> StoreResult<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(name.to_string()))
    }
}
