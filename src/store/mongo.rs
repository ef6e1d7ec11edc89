//! # MongoDB Backend
//!
//! The network document store. Uses the driver's synchronous client; every
//! call blocks the calling thread, so the route layer runs them on the
//! blocking pool.
//!
//! Building the client only parses the connection string. Nothing touches
//! the network until the first operation, which is where an unreachable
//! server shows up.

use std::fmt;

use mongodb::bson::{self, Bson, Document};
use mongodb::options::FindOptions;
use mongodb::sync::{Client, Database};
use serde_json::{Map, Value};

use super::backend::{validate_collection_name, DocumentStore};
use super::document::{DocumentId, StoredDocument, ID_FIELD};
use super::errors::{StoreError, StoreResult};
use super::filter::EqualityFilter;

pub struct MongoStore {
    database_name: String,
    database: Database,
}

impl MongoStore {
    /// Build a client for `uri` and select `database_name`
    pub fn connect(uri: &str, database_name: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;
        Ok(Self {
            database_name: database_name.to_string(),
            database: client.database(database_name),
        })
    }
}

impl fmt::Debug for MongoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoStore")
            .field("database", &self.database_name)
            .finish()
    }
}

fn backend_error(e: mongodb::error::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// Convert an equality filter into a query document
fn filter_document(filter: &EqualityFilter) -> StoreResult<Document> {
    let mut doc = Document::new();
    for (field, value) in filter.iter() {
        let value = bson::to_bson(value).map_err(|e| StoreError::InvalidDocument(e.to_string()))?;
        doc.insert(field, value);
    }
    Ok(doc)
}

/// Split a fetched document into its identifier and JSON payload
fn from_document(mut doc: Document) -> StoreResult<StoredDocument> {
    let id = match doc.remove(ID_FIELD) {
        Some(Bson::ObjectId(oid)) => DocumentId::from_object_id(oid),
        Some(Bson::String(s)) => s.parse()?,
        Some(other) => {
            return Err(StoreError::InvalidDocument(format!(
                "unsupported identifier type {:?}",
                other.element_type()
            )))
        }
        None => return Err(StoreError::InvalidDocument("document has no _id".to_string())),
    };

    match Bson::Document(doc).into_relaxed_extjson() {
        Value::Object(fields) => Ok(StoredDocument::new(id, fields)),
        other => Err(StoreError::InvalidDocument(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

impl DocumentStore for MongoStore {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    fn insert_one(&self, collection: &str, fields: Map<String, Value>) -> StoreResult<DocumentId> {
        validate_collection_name(collection)?;

        let doc = bson::to_document(&fields).map_err(|e| StoreError::InvalidDocument(e.to_string()))?;
        let result = self
            .database
            .collection::<Document>(collection)
            .insert_one(doc, None)
            .map_err(backend_error)?;

        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(DocumentId::from_object_id(oid)),
            other => Err(StoreError::Internal(format!(
                "server assigned a non-ObjectId identifier: {}",
                other
            ))),
        }
    }

    fn find(
        &self,
        collection: &str,
        filter: &EqualityFilter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<StoredDocument>> {
        validate_collection_name(collection)?;

        let options = FindOptions::builder()
            .limit(limit.map(|n| i64::try_from(n).unwrap_or(i64::MAX)))
            .build();
        let cursor = self
            .database
            .collection::<Document>(collection)
            .find(filter_document(filter)?, options)
            .map_err(backend_error)?;

        cursor
            .map(|doc| doc.map_err(backend_error).and_then(from_document))
            .collect()
    }

    fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        let mut names = self
            .database
            .list_collection_names(None)
            .map_err(backend_error)?;
        names.sort();
        Ok(names)
    }
}
