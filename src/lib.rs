//! notetree - HTTP API over a document store for a tree of notes
//!
//! Items carry a title, a body and an optional parent reference. The API
//! lists, creates, updates bodies, and deletes an item together with its
//! direct children.

pub mod cli;
pub mod content;
pub mod http_server;
pub mod observability;
pub mod storage;
