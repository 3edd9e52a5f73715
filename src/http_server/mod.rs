//! # notetree HTTP Server Module
//!
//! JSON API over the content store, built on Axum.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `GET /api/contents` - List items
//! - `POST /api/contents` - Create item
//! - `PUT /api/contents/:id` - Replace item body
//! - `DELETE /api/contents/:id` - Delete item and its direct children

pub mod config;
pub mod content_routes;
pub mod errors;
pub mod health_routes;
mod request_log;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
