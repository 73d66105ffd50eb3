use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::bookmarks::service::Mutation;
use crate::errors::AppError;
use crate::models::bookmark::{Bookmark, BookmarkId};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddBookmarkRequest {
    #[serde(default)]
    pub title: String,
    pub url: String,
}

#[derive(Serialize)]
pub struct BookmarkListResponse {
    pub bookmarks: Vec<Bookmark>,
}

/// GET /api/v1/bookmarks
pub async fn handle_list_bookmarks(State(state): State<AppState>) -> Json<BookmarkListResponse> {
    Json(BookmarkListResponse {
        bookmarks: state.bookmarks.list().await,
    })
}

/// POST /api/v1/bookmarks
pub async fn handle_add_bookmark(
    State(state): State<AppState>,
    Json(req): Json<AddBookmarkRequest>,
) -> Result<(StatusCode, Json<Mutation<Bookmark>>), AppError> {
    let mutation = state.bookmarks.add(&req.title, &req.url).await?;
    Ok((StatusCode::CREATED, Json(mutation)))
}

/// DELETE /api/v1/bookmarks/:id
pub async fn handle_remove_bookmark(
    State(state): State<AppState>,
    Path(id): Path<BookmarkId>,
) -> Result<Json<Mutation<Bookmark>>, AppError> {
    state
        .bookmarks
        .remove(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Bookmark {id} not found")))
}

/// POST /api/v1/bookmarks/:id/favorite
pub async fn handle_toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<BookmarkId>,
) -> Result<Json<Mutation<Bookmark>>, AppError> {
    state
        .bookmarks
        .toggle_favorite(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Bookmark {id} not found")))
}
