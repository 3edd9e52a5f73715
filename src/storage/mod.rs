//! Content storage for notetree
//!
//! Owns identifier parsing, the persisted document shape and the backends
//! that hold the `contents` collection.
//!
//! # Backends
//!
//! - `MongoContentStore` - MongoDB collection (production)
//! - `MemoryContentStore` - process-local vector (tests, `--in-memory`)
//!
//! The store holds no state beyond its connection handle. Every call is a
//! single round trip.

mod document;
mod errors;
mod id;
mod memory;
mod mongo;
mod store;

pub use document::{ContentDocument, ContentItem};
pub use errors::{StorageError, StorageErrorCode, StorageResult};
pub use id::{ContentId, InvalidContentId};
pub use memory::MemoryContentStore;
pub use mongo::{MongoContentStore, DEFAULT_COLLECTION, DEFAULT_DATABASE};
pub use store::ContentStore;
