use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::suggestion::SuggestionId;
use crate::state::AppState;
use crate::tracker::completion::{CelebrationEvent, CompletionState, ToggleOutcome};
use crate::tracker::priority::{classify_priority, PriorityBadge};
use crate::tracker::progress::Progress;

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub suggestion_id: SuggestionId,
    /// `false` when the session has no suggestion with this id; nothing changed.
    pub found: bool,
    pub completed: Option<bool>,
    pub state: Option<CompletionState>,
    pub progress: Progress,
    pub celebration: Option<CelebrationEvent>,
}

#[derive(Debug, Serialize)]
pub struct PriorityResponse {
    pub priority: String,
    pub badge: PriorityBadge,
}

/// POST /api/v1/analyses/:id/suggestions/:suggestion_id/toggle
pub async fn handle_toggle(
    State(state): State<AppState>,
    Path((id, suggestion_id)): Path<(Uuid, SuggestionId)>,
) -> Result<Json<ToggleResponse>, AppError> {
    let (outcome, progress) = state
        .sessions
        .toggle(id, suggestion_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;

    let response = match outcome {
        ToggleOutcome::NotFound => ToggleResponse {
            suggestion_id,
            found: false,
            completed: None,
            state: None,
            progress,
            celebration: None,
        },
        ToggleOutcome::Toggled {
            id: toggled,
            completed,
            state,
            celebration,
        } => ToggleResponse {
            suggestion_id: toggled,
            found: true,
            completed: Some(completed),
            state: Some(state),
            progress,
            celebration,
        },
    };

    Ok(Json(response))
}

/// GET /api/v1/priorities/:label
pub async fn handle_priority_badge(
    Path(label): Path<String>,
) -> Result<Json<PriorityResponse>, AppError> {
    let badge = classify_priority(&label)
        .ok_or_else(|| AppError::NotFound(format!("Unknown priority '{label}'")))?;
    Ok(Json(PriorityResponse {
        priority: label,
        badge,
    }))
}
