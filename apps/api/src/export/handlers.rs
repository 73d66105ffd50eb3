use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub label: Option<String>,
}

/// GET /api/v1/analyses/:id/export?label=
///
/// Label precedence: query parameter, then the session label, then a default.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (session_label, suggestions) = state
        .sessions
        .snapshot(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;

    let label = query.label.or(session_label).unwrap_or_default();
    let artifact = state.exporter.export(&suggestions, &label).await?;

    let headers = [
        (header::CONTENT_TYPE, artifact.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.file_name),
        ),
    ];
    Ok((headers, artifact.bytes))
}
