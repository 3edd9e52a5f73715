//! Content operation errors

use thiserror::Error;

use crate::storage::StorageError;

/// Message returned when a create request has no usable title
pub const TITLE_REQUIRED: &str = "Title is required";

/// Message returned when a create request carries an unparsable parent id
pub const INVALID_PARENT_ID: &str = "Invalid parentId";

/// Result type for content operations
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors raised by `ContentService`
#[derive(Debug, Error)]
pub enum ContentError {
    /// Request data failed the presence/format checks
    #[error("{0}")]
    Validation(String),

    /// No item matched the id, including ids that do not parse
    #[error("Content not found")]
    NotFound,

    /// The store round trip failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ContentError {
    pub fn title_required() -> Self {
        ContentError::Validation(TITLE_REQUIRED.to_string())
    }

    pub fn invalid_parent_id() -> Self {
        ContentError::Validation(INVALID_PARENT_ID.to_string())
    }
}
