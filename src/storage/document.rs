//! Content document shapes
//!
//! Persisted shape (one document per item in the `contents` collection):
//!
//! ```text
//! { _id: ObjectId, title: string, content: string, parentId: ObjectId | null }
//! ```
//!
//! Client shape:
//!
//! ```text
//! { id: string, title: string, content: string, parentId: string | null }
//! ```
//!
//! `parentId` is never checked for existence or cycles.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::id::ContentId;

/// A content item as stored in the document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Written as explicit null for roots; a missing field reads as `None`
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<ObjectId>,
}

impl ContentDocument {
    /// Build a fresh document with an empty body
    pub fn new(title: impl Into<String>, parent_id: Option<ContentId>) -> Self {
        Self {
            id: ContentId::generate().as_object_id(),
            title: title.into(),
            content: String::new(),
            parent_id: parent_id.map(ObjectId::from),
        }
    }

    pub fn content_id(&self) -> ContentId {
        ContentId::from(self.id)
    }

    pub fn parent(&self) -> Option<ContentId> {
        self.parent_id.map(ContentId::from)
    }
}

/// A content item as returned to HTTP clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub parent_id: Option<String>,
}

impl From<ContentDocument> for ContentItem {
    fn from(doc: ContentDocument) -> Self {
        Self {
            id: doc.content_id().to_string(),
            parent_id: doc.parent().map(|p| p.to_string()),
            title: doc.title,
            content: doc.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc, Bson};

    #[test]
    fn test_new_document_has_empty_content() {
        let doc = ContentDocument::new("Notebook", None);
        assert_eq!(doc.title, "Notebook");
        assert_eq!(doc.content, "");
        assert!(doc.parent_id.is_none());
    }

    #[test]
    fn test_root_persists_explicit_null_parent() {
        let doc = ContentDocument::new("Notebook", None);
        let stored = bson::to_document(&doc).unwrap();

        assert_eq!(stored.get("_id"), Some(&Bson::ObjectId(doc.id)));
        assert_eq!(stored.get("parentId"), Some(&Bson::Null));
        assert_eq!(stored.get_str("content").unwrap(), "");
    }

    #[test]
    fn test_missing_fields_read_back_as_defaults() {
        let oid = ObjectId::new();
        let stored = doc! { "_id": oid, "title": "Loose" };

        let parsed: ContentDocument = bson::from_document(stored).unwrap();
        assert_eq!(parsed.id, oid);
        assert_eq!(parsed.content, "");
        assert!(parsed.parent_id.is_none());
    }

    #[test]
    fn test_client_shape_stringifies_ids() {
        let parent = ContentId::generate();
        let doc = ContentDocument::new("Page", Some(parent));
        let expected_id = doc.id.to_hex();

        let item = ContentItem::from(doc);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["id"], expected_id);
        assert_eq!(json["title"], "Page");
        assert_eq!(json["content"], "");
        assert_eq!(json["parentId"], parent.to_string());
    }

    #[test]
    fn test_client_shape_null_parent() {
        let item = ContentItem::from(ContentDocument::new("Notebook", None));
        let json = serde_json::to_value(&item).unwrap();
        assert!(json["parentId"].is_null());
        assert!(json.as_object().unwrap().contains_key("parentId"));
    }
}
