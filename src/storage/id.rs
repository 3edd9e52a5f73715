//! Content identifiers
//!
//! A `ContentId` is the store-native key (a BSON ObjectId) behind a small
//! value type. Clients only ever see its 24-character hex form.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use thiserror::Error;

/// Raised when a string is not a valid content identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid content id: {input:?}")]
pub struct InvalidContentId {
    input: String,
}

impl InvalidContentId {
    /// The rejected input
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Unique, immutable identifier of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(ObjectId);

impl ContentId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse the hex form produced by `Display`
    pub fn parse(s: &str) -> Result<Self, InvalidContentId> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidContentId {
                input: s.to_string(),
            })
    }

    /// The underlying store-native identifier
    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for ContentId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl From<ContentId> for ObjectId {
    fn from(id: ContentId) -> Self {
        id.0
    }
}

impl FromStr for ContentId {
    type Err = InvalidContentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}
