//! In-memory content store
//!
//! Keeps documents in insertion order. Used by tests and `serve --in-memory`.

use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::document::ContentDocument;
use super::errors::{StorageError, StorageResult};
use super::id::ContentId;
use super::store::ContentStore;

/// Process-local `ContentStore`
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    documents: RwLock<Vec<ContentDocument>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.read().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StorageError {
    StorageError::unavailable("in-memory store lock poisoned")
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn find_all(&self) -> StorageResult<Vec<ContentDocument>> {
        let docs = self.documents.read().map_err(|_| poisoned())?;
        Ok(docs.clone())
    }

    async fn insert(&self, doc: ContentDocument) -> StorageResult<ContentDocument> {
        let mut docs = self.documents.write().map_err(|_| poisoned())?;
        if docs.iter().any(|d| d.id == doc.id) {
            return Err(StorageError::unavailable("duplicate _id on insert")
                .with_details(format!("_id: {}", doc.id.to_hex())));
        }
        docs.push(doc.clone());
        Ok(doc)
    }

    async fn set_content(
        &self,
        id: ContentId,
        content: &str,
    ) -> StorageResult<Option<ContentDocument>> {
        let oid = ObjectId::from(id);
        let mut docs = self.documents.write().map_err(|_| poisoned())?;
        Ok(docs.iter_mut().find(|d| d.id == oid).map(|d| {
            d.content = content.to_string();
            d.clone()
        }))
    }

    async fn delete_children(&self, parent: ContentId) -> StorageResult<u64> {
        let oid = ObjectId::from(parent);
        let mut docs = self.documents.write().map_err(|_| poisoned())?;
        let before = docs.len();
        docs.retain(|d| d.parent_id != Some(oid));
        Ok((before - docs.len()) as u64)
    }

    async fn delete_one(&self, id: ContentId) -> StorageResult<u64> {
        let oid = ObjectId::from(id);
        let mut docs = self.documents.write().map_err(|_| poisoned())?;
        match docs.iter().position(|d| d.id == oid) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> StorageResult<()> {
        self.documents.read().map(|_| ()).map_err(|_| poisoned())
    }

    async fn shutdown(&self) {}
}
