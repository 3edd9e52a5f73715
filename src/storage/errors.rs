//! Storage error types
//!
//! Error codes:
//! - NOTETREE_STORAGE_CONNECT_FAILED (client could not be built or reached)
//! - NOTETREE_STORAGE_QUERY_FAILED (read round trip failed)
//! - NOTETREE_STORAGE_WRITE_FAILED (insert/update/delete round trip failed)
//! - NOTETREE_STORAGE_UNAVAILABLE (backend can no longer serve requests)
//!
//! None of these are retried. A failed store call fails the request that
//! issued it and surfaces as a 500.

use std::error::Error as StdError;
use std::fmt;

type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// Storage-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    ConnectFailed,
    QueryFailed,
    WriteFailed,
    Unavailable,
}

impl StorageErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::ConnectFailed => "NOTETREE_STORAGE_CONNECT_FAILED",
            StorageErrorCode::QueryFailed => "NOTETREE_STORAGE_QUERY_FAILED",
            StorageErrorCode::WriteFailed => "NOTETREE_STORAGE_WRITE_FAILED",
            StorageErrorCode::Unavailable => "NOTETREE_STORAGE_UNAVAILABLE",
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Storage error with code, message and optional context
#[derive(Debug)]
pub struct StorageError {
    code: StorageErrorCode,
    message: String,
    details: Option<String>,
    source: Option<BoxedSource>,
}

impl StorageError {
    fn new(code: StorageErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Client construction or the initial handshake failed
    pub fn connect_failed(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        Self::new(StorageErrorCode::ConnectFailed, message).with_source(source)
    }

    /// A read round trip failed
    pub fn query_failed(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        Self::new(StorageErrorCode::QueryFailed, message).with_source(source)
    }

    /// A write round trip failed
    pub fn write_failed(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        Self::new(StorageErrorCode::WriteFailed, message).with_source(source)
    }

    /// The backend is in a state where it cannot serve requests
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StorageErrorCode::Unavailable, message)
    }

    /// Attach context such as the collection or document id
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn with_source(mut self, source: impl Into<BoxedSource>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the error code
    pub fn code(&self) -> StorageErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional error details
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        if let Some(ref source) = self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl StdError for StorageError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
