//! Content item operations
//!
//! `ContentService` is the storage accessor the router talks to: list,
//! create, update body, and single-level cascade delete.

mod errors;
mod service;

pub use errors::{ContentError, ContentResult, INVALID_PARENT_ID, TITLE_REQUIRED};
pub use service::{ContentService, DeleteOutcome};
