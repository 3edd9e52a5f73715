//! Observability for notetree
//!
//! Structured JSON logging only. Event names are SCREAMING_SNAKE_CASE:
//!
//! - `SERVER_START`, `SERVER_STOP`, `STORE_OPEN`
//! - `HTTP_REQUEST`
//! - `CONTENT_CREATED`, `CONTENT_UPDATED`, `CONTENT_DELETED`
//! - `CONTENT_REJECTED`, `CONTENT_NOT_FOUND`
//! - `STORE_ERROR`, `CORS_ORIGIN_SKIPPED`
//!
//! ```ignore
//! use notetree::observability::Logger;
//!
//! Logger::info("CONTENT_CREATED", &[("id", "65f0c0ffee...")]);
//! ```

mod logger;

pub use logger::{Logger, Severity};
