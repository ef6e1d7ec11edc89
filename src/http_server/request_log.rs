//! Request logging middleware
//!
//! Emits one `HTTP_REQUEST` event per request once the response is ready.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

use crate::observability::{Logger, Severity};

pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let severity = if status.is_server_error() {
        Severity::Warn
    } else {
        Severity::Info
    };
    Logger::log(
        severity,
        "HTTP_REQUEST",
        &[
            ("method", &method),
            ("path", &path),
            ("status", status.as_str()),
            ("duration_ms", &started.elapsed().as_millis().to_string()),
        ],
    );

    response
}
