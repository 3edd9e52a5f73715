//! MongoDB content store
//!
//! Thin wrapper over one collection. The client is built once at startup
//! and passed in; there is no process-global handle.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};

use super::document::ContentDocument;
use super::errors::{StorageError, StorageResult};
use super::id::ContentId;
use super::store::ContentStore;

/// Default database name
pub const DEFAULT_DATABASE: &str = "onenote_clone";

/// Default collection name
pub const DEFAULT_COLLECTION: &str = "contents";

/// `ContentStore` backed by a MongoDB collection
#[derive(Debug, Clone)]
pub struct MongoContentStore {
    client: Client,
    collection: Collection<ContentDocument>,
}

impl MongoContentStore {
    /// Build a client for `uri` and bind to `database.collection`.
    ///
    /// The driver connects lazily; use `ping` to force a round trip.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> StorageResult<Self> {
        let client = Client::with_uri_str(uri).await.map_err(|e| {
            StorageError::connect_failed("failed to build MongoDB client", e)
                .with_details(format!("database: {}", database))
        })?;
        Ok(Self::with_client(client, database, collection))
    }

    /// Bind an existing client
    pub fn with_client(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection(collection);
        Self { client, collection }
    }

    fn details(&self) -> String {
        format!("collection: {}", self.collection.name())
    }
}

#[async_trait]
impl ContentStore for MongoContentStore {
    async fn find_all(&self) -> StorageResult<Vec<ContentDocument>> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| {
                StorageError::query_failed("find failed", e).with_details(self.details())
            })?;

        cursor
            .try_collect::<Vec<_>>()
            .await
            .map_err(|e| {
                StorageError::query_failed("cursor read failed", e).with_details(self.details())
            })
    }

    async fn insert(&self, doc: ContentDocument) -> StorageResult<ContentDocument> {
        let result = self
            .collection
            .insert_one(&doc)
            .await
            .map_err(|e| {
                StorageError::write_failed("insert_one failed", e).with_details(self.details())
            })?;

        let inserted_id = result.inserted_id.as_object_id().unwrap_or(doc.id);
        self.collection
            .find_one(doc! { "_id": inserted_id })
            .await
            .map_err(|e| {
                StorageError::query_failed("find_one failed", e).with_details(self.details())
            })?
            .ok_or_else(|| {
                StorageError::unavailable("inserted document missing on re-read")
                    .with_details(format!("_id: {}", inserted_id.to_hex()))
            })
    }

    async fn set_content(
        &self,
        id: ContentId,
        content: &str,
    ) -> StorageResult<Option<ContentDocument>> {
        let oid = ObjectId::from(id);
        self.collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": { "content": content } })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| {
                StorageError::write_failed("find_one_and_update failed", e)
                    .with_details(self.details())
            })
    }

    async fn delete_children(&self, parent: ContentId) -> StorageResult<u64> {
        let oid = ObjectId::from(parent);
        let result = self
            .collection
            .delete_many(doc! { "parentId": oid })
            .await
            .map_err(|e| {
                StorageError::write_failed("delete_many failed", e).with_details(self.details())
            })?;
        Ok(result.deleted_count)
    }

    async fn delete_one(&self, id: ContentId) -> StorageResult<u64> {
        let oid = ObjectId::from(id);
        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|e| {
                StorageError::write_failed("delete_one failed", e).with_details(self.details())
            })?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> StorageResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| StorageError::connect_failed("ping failed", e))
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
    }
}
