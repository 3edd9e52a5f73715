//! Request logging middleware
//!
//! Emits one `HTTP_REQUEST` event per request once the response is ready.
//! 5xx responses are logged at ERROR, 4xx at WARN, everything else at INFO.

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
        Severity::Error
    } else if status.is_client_error() {
        Severity::Warn
    } else {
        Severity::Info
    };
    let status_code = status.as_u16().to_string();
    let duration_ms = started.elapsed().as_millis().to_string();

    Logger::log(
        severity,
        "HTTP_REQUEST",
        &[
            ("duration_ms", duration_ms.as_str()),
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("status", status_code.as_str()),
        ],
    );

    response
}
