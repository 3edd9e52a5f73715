//! Document store backend trait
//!
//! One method per store round trip. Nothing here spans two round trips, so
//! callers composing several calls get no atomicity between them.

use async_trait::async_trait;

use super::document::ContentDocument;
use super::errors::StorageResult;
use super::id::ContentId;

/// Backend holding the `contents` collection
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Every document, in store-native order
    async fn find_all(&self) -> StorageResult<Vec<ContentDocument>>;

    /// Persist a new document and return it as read back from the store
    async fn insert(&self, doc: ContentDocument) -> StorageResult<ContentDocument>;

    /// Replace the body of one document, returning the post-update document,
    /// or `None` when no document has that id
    async fn set_content(
        &self,
        id: ContentId,
        content: &str,
    ) -> StorageResult<Option<ContentDocument>>;

    /// Remove every document whose `parentId` equals `parent`
    async fn delete_children(&self, parent: ContentId) -> StorageResult<u64>;

    /// Remove the document with this id
    async fn delete_one(&self, id: ContentId) -> StorageResult<u64>;

    /// Round trip to check the backend is reachable
    async fn ping(&self) -> StorageResult<()>;

    /// Release connections; the store must not be used afterwards
    async fn shutdown(&self);
}
