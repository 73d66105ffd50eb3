pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::bookmarks::handlers as bookmarks;
use crate::export::handlers as export;
use crate::search::handlers as search;
use crate::state::AppState;
use crate::tracker::handlers as tracker;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis sessions
        .route("/api/v1/analyses", post(analysis::handle_analyze))
        .route("/api/v1/analyses/upload", post(analysis::handle_upload))
        .route(
            "/api/v1/analyses/:id",
            get(analysis::handle_get_analysis)
                .put(analysis::handle_reanalyze)
                .delete(analysis::handle_delete_analysis),
        )
        .route(
            "/api/v1/analyses/:id/suggestions/:suggestion_id/toggle",
            post(tracker::handle_toggle),
        )
        .route("/api/v1/analyses/:id/export", get(export::handle_export))
        .route(
            "/api/v1/priorities/:label",
            get(tracker::handle_priority_badge),
        )
        // Bookmarks
        .route(
            "/api/v1/bookmarks",
            get(bookmarks::handle_list_bookmarks).post(bookmarks::handle_add_bookmark),
        )
        .route(
            "/api/v1/bookmarks/:id",
            delete(bookmarks::handle_remove_bookmark),
        )
        .route(
            "/api/v1/bookmarks/:id/favorite",
            post(bookmarks::handle_toggle_favorite),
        )
        // Search
        .route("/api/v1/search", get(search::handle_search))
        .route("/api/v1/search/input", post(search::handle_search_input))
        .route("/api/v1/search/results", get(search::handle_search_results))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
