//! # HTTP Server
//!
//! Combines the content and health routers, applies CORS and request
//! logging, and owns the store for the lifetime of the process.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::content_routes::{content_routes, ContentState};
use super::health_routes::health_routes;
use super::request_log::log_requests;
use crate::observability::Logger;
use crate::storage::ContentStore;

/// HTTP server for the content API
pub struct HttpServer {
    config: HttpServerConfig,
    store: Arc<dyn ContentStore>,
    router: Router,
}

impl HttpServer {
    /// Create a server over an already constructed store
    pub fn new(config: HttpServerConfig, store: Arc<dyn ContentStore>) -> Self {
        let router = Self::build_router(&config, Arc::clone(&store));
        Self {
            config,
            store,
            router,
        }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, store: Arc<dyn ContentStore>) -> Router {
        let content_state = Arc::new(ContentState::new(Arc::clone(&store)));

        let cors = Self::cors_layer(&config.cors_origins);

        Router::new()
            .merge(health_routes(store))
            .nest("/api", content_routes(content_state))
            .layer(middleware::from_fn(log_requests))
            .layer(cors)
    }

    /// No origins, or a lone `"*"`, allows any origin. Entries that are not
    /// valid header values are skipped and logged.
    fn cors_layer(origins: &[String]) -> CorsLayer {
        let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            return layer.allow_origin(Any);
        }

        let mut allowed = Vec::with_capacity(origins.len());
        for origin in origins {
            match HeaderValue::from_str(origin) {
                Ok(value) => allowed.push(value),
                Err(_) => Logger::warn("CORS_ORIGIN_SKIPPED", &[("origin", origin.as_str())]),
            }
        }

        layer.allow_origin(AllowOrigin::list(allowed))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C or SIGTERM, then shut the store down
    pub async fn start(self) -> io::Result<()> {
        self.start_with_shutdown(shutdown_signal()).await
    }

    /// Serve until `signal` resolves, then shut the store down
    pub async fn start_with_shutdown<F>(self, signal: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?.to_string();
        Logger::info("SERVER_START", &[("addr", local_addr.as_str())]);

        let result = axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await;

        self.store.shutdown().await;
        Logger::info("SERVER_STOP", &[("addr", local_addr.as_str())]);

        result
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    use crate::storage::MemoryContentStore;

    fn server(config: HttpServerConfig) -> HttpServer {
        HttpServer::new(config, Arc::new(MemoryContentStore::new()))
    }

    #[test]
    fn test_server_socket_addr() {
        let server = server(HttpServerConfig::with_port(8080));
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_by_default() {
        let app = server(HttpServerConfig::default()).router();
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/contents")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_restricted_origins() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:3000".to_string()],
            ..Default::default()
        };
        let app = server(config).router();
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/contents")
                    .header(header::ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    async fn get_with_origin(app: Router, origin: &str) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/contents")
                .header(header::ORIGIN, origin)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_cors_echoes_allowed_origin() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:3000".to_string()],
            ..Default::default()
        };
        let response = get_with_origin(server(config).router(), "http://localhost:3000").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn test_cors_wildcard_entry_allows_any_origin() {
        let config = HttpServerConfig {
            cors_origins: vec!["*".to_string()],
            ..Default::default()
        };
        let response = get_with_origin(server(config).router(), "http://example.com").await;

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_skips_invalid_origin_entries() {
        let config = HttpServerConfig {
            cors_origins: vec![
                "http://bad\norigin".to_string(),
                "http://localhost:3000".to_string(),
            ],
            ..Default::default()
        };
        let response = get_with_origin(server(config).router(), "http://localhost:3000").await;

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn test_start_stops_on_signal() {
        let server = server(HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: Vec::new(),
        });

        server.start_with_shutdown(async {}).await.unwrap();
    }
}
