//! Content HTTP Routes
//!
//! - `GET    /contents`      list every item
//! - `POST   /contents`      create `{title, parentId?}`
//! - `PUT    /contents/:id`  replace body `{content?}`
//! - `DELETE /contents/:id`  delete item and its direct children
//!
//! Mounted under `/api` by the server.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::content::ContentService;
use crate::storage::{ContentItem, ContentStore};

use super::errors::ApiResult;

// ==================
// Shared State
// ==================

/// Content state shared across handlers
pub struct ContentState {
    pub service: ContentService,
}

impl ContentState {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            service: ContentService::new(store),
        }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Default, Deserialize)]
pub struct CreateContentRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "parentId")]
    pub parent_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateContentRequest {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ==================
// Content Routes
// ==================

/// Create content routes
pub fn content_routes(state: Arc<ContentState>) -> Router {
    Router::new()
        .route(
            "/contents",
            get(list_contents_handler).post(create_content_handler),
        )
        .route(
            "/contents/:id",
            put(update_content_handler).delete(delete_content_handler),
        )
        .with_state(state)
}

async fn list_contents_handler(
    State(state): State<Arc<ContentState>>,
) -> ApiResult<Json<Vec<ContentItem>>> {
    let items = state.service.list_all().await?;
    Ok(Json(items))
}

async fn create_content_handler(
    State(state): State<Arc<ContentState>>,
    body: Result<Json<CreateContentRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ContentItem>)> {
    let Json(request) = body?;
    let item = state
        .service
        .create(request.title.as_deref(), request.parent_id.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_content_handler(
    State(state): State<Arc<ContentState>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateContentRequest>, JsonRejection>,
) -> ApiResult<Json<ContentItem>> {
    let Json(request) = body?;
    let content = request.content.unwrap_or_default();
    let item = state.service.update(&id, &content).await?;
    Ok(Json(item))
}

async fn delete_content_handler(
    State(state): State<Arc<ContentState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.service.delete_cascade(&id).await?;
    Ok(Json(MessageResponse {
        message: "Content deleted".to_string(),
    }))
}
