//! # In-Memory Backend
//!
//! Process-local collections, lost on exit. Insertion order is the natural
//! order returned by `find`.

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde_json::{Map, Value};

use super::backend::{validate_collection_name, DocumentStore};
use super::document::{DocumentId, StoredDocument};
use super::errors::{StoreError, StoreResult};
use super::filter::EqualityFilter;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, Vec<StoredDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Internal("collection lock poisoned".to_string())
}

impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn insert_one(&self, collection: &str, fields: Map<String, Value>) -> StoreResult<DocumentId> {
        validate_collection_name(collection)?;

        let id = DocumentId::generate();
        let mut collections = self.collections.write().map_err(poisoned)?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument::new(id.clone(), fields));
        Ok(id)
    }

    fn find(
        &self,
        collection: &str,
        filter: &EqualityFilter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<StoredDocument>> {
        validate_collection_name(collection)?;

        let collections = self.collections.read().map_err(poisoned)?;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .iter()
            .filter(|doc| filter.matches(&doc.fields))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(collections.keys().cloned().collect())
    }
}
