//! hundred - REST backend for the Hundred relationship map
//!
//! Stores people (nodes of a personal-relationship visualization) in a
//! document store and serves them over HTTP.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod schema;
pub mod store;
