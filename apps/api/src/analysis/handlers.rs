//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::extract::extract_resume_text;
use crate::errors::AppError;
use crate::state::AppState;
use crate::tracker::sessions::AnalysisView;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub raw_text: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReanalyzeRequest {
    pub raw_text: String,
}

/// POST /api/v1/analyses
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<(StatusCode, Json<AnalysisView>), AppError> {
    let suggestions = state.analyzer.analyze(&request.raw_text).await?;
    let view = state.sessions.create(request.label, suggestions).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// POST /api/v1/analyses/upload
///
/// Multipart form with a `file` part (PDF or UTF-8 text) and an optional
/// `label` part. The file name is used as the label when none is given.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<AnalysisView>), AppError> {
    let mut upload: Option<(Option<String>, Option<String>, Bytes)> = None;
    let mut label: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
                upload = Some((file_name, content_type, data));
            }
            Some("label") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read label: {e}")))?;
                label = Some(text.trim().to_string()).filter(|l| !l.is_empty());
            }
            _ => {}
        }
    }

    let (file_name, content_type, data) =
        upload.ok_or_else(|| AppError::Validation("Missing 'file' part".to_string()))?;

    info!(
        "Received resume upload {:?} ({} bytes)",
        file_name.as_deref().unwrap_or("<unnamed>"),
        data.len()
    );

    let raw_text = extract_resume_text(file_name.as_deref(), content_type.as_deref(), data)
        .await
        .map_err(|e| {
            warn!("Resume upload rejected: {e}");
            AppError::UnprocessableEntity(e.to_string())
        })?;

    let suggestions = state.analyzer.analyze(&raw_text).await?;
    let view = state
        .sessions
        .create(label.or(file_name), suggestions)
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisView>, AppError> {
    state
        .sessions
        .view(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))
}

/// PUT /api/v1/analyses/:id
///
/// Re-runs analysis and replaces the session's suggestion list wholesale.
pub async fn handle_reanalyze(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReanalyzeRequest>,
) -> Result<Json<AnalysisView>, AppError> {
    let suggestions = state.analyzer.analyze(&request.raw_text).await?;
    state
        .sessions
        .replace(id, suggestions)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))
}

/// DELETE /api/v1/analyses/:id
pub async fn handle_delete_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Analysis {id} not found")))
    }
}
