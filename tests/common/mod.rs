//! Shared harness for HTTP API tests
//!
//! Builds the full router over a chosen store and drives it in-process with
//! `tower::ServiceExt::oneshot`; no socket is opened.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use hundred::http_server::{HttpServer, HttpServerConfig};
use hundred::store::{StoreClient, StoreConfig};

/// Router over a fresh in-memory store
pub fn memory_app() -> Router {
    app_with(StoreConfig::memory("hundred_test"))
}

/// Router over a store selected by `config`
pub fn app_with(config: StoreConfig) -> Router {
    let store = Arc::new(StoreClient::new(config));
    HttpServer::with_config(HttpServerConfig::default(), store).router()
}

/// MongoDB address on a closed local port, with a short server-selection
/// timeout so operations fail fast
pub const UNREACHABLE_MONGO_URL: &str =
    "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=300&connectTimeoutMS=300";

/// Router over a MongoDB store that can never be reached
pub fn unreachable_app() -> Router {
    app_with(StoreConfig::new(
        Some(UNREACHABLE_MONGO_URL.to_string()),
        Some("hundred".to_string()),
    ))
}

/// Router whose store URL names no known backend
pub fn unsupported_url_app() -> Router {
    app_with(StoreConfig::new(
        Some("redis://localhost:6379".to_string()),
        Some("hundred".to_string()),
    ))
}

/// Send a request and return status plus parsed JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: &Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    send(app, request).await
}

/// Create a person and return its id, asserting success
pub async fn create_person(app: &Router, body: Value) -> String {
    let (status, response) = post_json(app, "/api/people", &body).await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", response);
    response["id"].as_str().unwrap().to_string()
}

/// The `people` array of a listing, asserting success
pub async fn list_people(app: &Router, uri: &str) -> Vec<Value> {
    let (status, response) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK, "list failed: {}", response);
    response["people"].as_array().unwrap().clone()
}
