use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::bookmark::Bookmark;
use crate::search::coalescer::SearchSnapshot;
use crate::search::filter::SearchSource;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub term: String,
    pub results: Vec<Bookmark>,
}

#[derive(Debug, Deserialize)]
pub struct KeystrokeRequest {
    pub client_id: String,
    pub term: String,
}

#[derive(Debug, Deserialize)]
pub struct ClientQuery {
    pub client_id: String,
}

/// GET /api/v1/search?q=
pub async fn handle_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let results = state.bookmarks.search(&query.q).await?;
    Ok(Json(SearchResponse {
        term: query.q,
        results,
    }))
}

/// POST /api/v1/search/input
///
/// Accepts a keystroke; the query is dispatched once the client goes quiet.
pub async fn handle_search_input(
    State(state): State<AppState>,
    Json(req): Json<KeystrokeRequest>,
) -> Result<StatusCode, AppError> {
    if req.client_id.trim().is_empty() {
        return Err(AppError::Validation("client_id cannot be empty".to_string()));
    }
    state.search.submit(&req.client_id, req.term);
    Ok(StatusCode::ACCEPTED)
}

/// GET /api/v1/search/results?client_id=
pub async fn handle_search_results(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
) -> Result<Json<SearchSnapshot>, AppError> {
    state
        .search
        .results(&query.client_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No searches for client {}", query.client_id)))
}
