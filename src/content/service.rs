//! Content service
//!
//! The four operations the router exposes, built on any `ContentStore`.
//! Holds no state between calls besides the shared store handle.

use std::sync::Arc;

use serde::Serialize;

use crate::observability::Logger;
use crate::storage::{ContentDocument, ContentId, ContentItem, ContentStore, StorageError};

use super::errors::{ContentError, ContentResult};

/// Result of a cascade delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    /// Direct children removed in the first step
    pub children_deleted: u64,
    /// Items removed in the second step (always 1 on success)
    pub deleted: u64,
}

/// Storage accessor for content items
#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn ContentStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// All items in store-native order
    pub async fn list_all(&self) -> ContentResult<Vec<ContentItem>> {
        let docs = self.store.find_all().await.map_err(store_error)?;
        Ok(docs.into_iter().map(ContentItem::from).collect())
    }

    /// Create an item with an empty body.
    ///
    /// A missing or empty `title` is rejected. An empty `parent_id` counts as
    /// absent; a non-empty one must parse but need not reference an existing
    /// item.
    pub async fn create(
        &self,
        title: Option<&str>,
        parent_id: Option<&str>,
    ) -> ContentResult<ContentItem> {
        let title = match title {
            Some(t) if !t.is_empty() => t,
            _ => {
                Logger::warn("CONTENT_REJECTED", &[("reason", "missing title")]);
                return Err(ContentError::title_required());
            }
        };

        let parent = match parent_id {
            Some(p) if !p.is_empty() => Some(ContentId::parse(p).map_err(|e| {
                Logger::warn(
                    "CONTENT_REJECTED",
                    &[("reason", "invalid parentId"), ("parent_id", e.input())],
                );
                ContentError::invalid_parent_id()
            })?),
            _ => None,
        };

        let created = self
            .store
            .insert(ContentDocument::new(title, parent))
            .await
            .map_err(store_error)?;

        let item = ContentItem::from(created);
        Logger::info(
            "CONTENT_CREATED",
            &[
                ("id", item.id.as_str()),
                ("parent_id", item.parent_id.as_deref().unwrap_or("")),
            ],
        );
        Ok(item)
    }

    /// Replace an item's body and return the updated item
    pub async fn update(&self, id: &str, content: &str) -> ContentResult<ContentItem> {
        let Ok(content_id) = ContentId::parse(id) else {
            return Err(not_found(id));
        };

        match self
            .store
            .set_content(content_id, content)
            .await
            .map_err(store_error)?
        {
            Some(doc) => {
                Logger::info("CONTENT_UPDATED", &[("id", id)]);
                Ok(ContentItem::from(doc))
            }
            None => Err(not_found(id)),
        }
    }

    /// Delete an item's direct children, then the item itself.
    ///
    /// The two steps are separate round trips with nothing tying them
    /// together. Children are removed even when the item itself turns out not
    /// to exist, in which case the call still fails with `NotFound`.
    /// Grandchildren are left in place.
    pub async fn delete_cascade(&self, id: &str) -> ContentResult<DeleteOutcome> {
        let Ok(content_id) = ContentId::parse(id) else {
            return Err(not_found(id));
        };

        let children_deleted = self
            .store
            .delete_children(content_id)
            .await
            .map_err(store_error)?;
        let deleted = self
            .store
            .delete_one(content_id)
            .await
            .map_err(store_error)?;

        let children = children_deleted.to_string();
        if deleted == 0 {
            Logger::warn(
                "CONTENT_NOT_FOUND",
                &[("children_deleted", children.as_str()), ("id", id)],
            );
            return Err(ContentError::NotFound);
        }

        Logger::info(
            "CONTENT_DELETED",
            &[("children_deleted", children.as_str()), ("id", id)],
        );
        Ok(DeleteOutcome {
            children_deleted,
            deleted,
        })
    }
}

fn not_found(id: &str) -> ContentError {
    Logger::warn("CONTENT_NOT_FOUND", &[("id", id)]);
    ContentError::NotFound
}

fn store_error(err: StorageError) -> ContentError {
    let message = err.to_string();
    Logger::error(
        "STORE_ERROR",
        &[("code", err.code().code()), ("message", message.as_str())],
    );
    ContentError::Storage(err)
}
