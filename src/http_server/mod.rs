//! # Hundred HTTP Server Module
//!
//! Axum server exposing the Hundred API.
//!
//! # Endpoints
//!
//! - `GET /` - Liveness
//! - `GET /test` - Store diagnostics
//! - `POST /api/people` - Create a person
//! - `GET /api/people` - List people

pub mod config;
pub mod errors;
pub mod people_routes;
pub mod request_log;
pub mod server;
pub mod state;
pub mod status_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
pub use state::AppState;
