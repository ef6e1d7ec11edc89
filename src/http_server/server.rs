//! # HTTP Server
//!
//! Combines the liveness, diagnostic and people routers behind one CORS
//! layer and serves them.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use super::config::HttpServerConfig;
use super::people_routes::people_routes;
use super::request_log::log_requests;
use super::state::AppState;
use super::status_routes::status_routes;
use crate::observability::Logger;
use crate::store::StoreClient;

/// HTTP server for the Hundred API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig, store: Arc<StoreClient>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, store: Arc<StoreClient>) -> Router {
        let state = AppState::new(store);

        Router::new()
            // Liveness and diagnostics at root level
            .merge(status_routes(state.clone()))
            // People routes under /api
            .nest("/api", people_routes(state))
            .layer(middleware::from_fn(log_requests))
            .layer(cors_layer(config))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        Logger::info("SERVER_START", &[("addr", &addr.to_string())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Logger::info("SERVER_STOP", &[]);
        Ok(())
    }
}

/// Any origin, method and header, with credentials, unless origins are configured
fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    let origin = if config.cors_origins.is_empty() {
        // A wildcard cannot be combined with credentials; echo the caller instead
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; serve until the process is killed
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;

    fn store() -> Arc<StoreClient> {
        Arc::new(StoreClient::new(StoreConfig::memory("hundred")))
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::with_config(HttpServerConfig::default(), store());
        assert_eq!(server.socket_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig::with_port(8080);
        let server = HttpServer::with_config(config, store());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_configured_origins() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::with_config(config, store()).router();
    }
}
