//! # Document Store
//!
//! Storage adapter for the Hundred backend. The route layer only sees
//! [`StoreClient`], which offers two generic operations over a connection
//! that may be absent:
//!
//! - `insert(collection, record) -> id`
//! - `query(collection, equality filter, limit) -> records`
//!
//! Concrete backends implement [`DocumentStore`]: [`MongoStore`] for a
//! MongoDB deployment, [`MemoryStore`] and [`FileStore`] for local runs.

pub mod backend;
pub mod client;
pub mod config;
pub mod document;
pub mod errors;
pub mod file;
pub mod filter;
pub mod memory;
pub mod mongo;

pub use backend::DocumentStore;
pub use client::StoreClient;
pub use config::{StoreConfig, StoreTarget};
pub use document::{DocumentId, StoredDocument};
pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use filter::EqualityFilter;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
