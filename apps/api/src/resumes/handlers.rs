use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::document::{ResumeDocument, SectionOrder};
use crate::errors::AppError;
use crate::models::resume::{ResumeRow, ResumeSummary};
use crate::resumes::export::{retry_export, ExportReceipt, RetryOptions};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct LibraryQuery {
    pub user_id: Uuid,
    /// Name fragment or `YYYY-MM-DD` creation date.
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct SavedResumeResponse {
    #[serde(flatten)]
    pub resume: ResumeSummary,
    pub document: ResumeDocument,
    pub section_order: SectionOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Layout, order and name default to what the record was saved with.
#[derive(Deserialize)]
pub struct RetryExportRequest {
    pub user_id: Uuid,
    pub layout_id: Option<i64>,
    pub section_order: Option<SectionOrder>,
    pub name: Option<String>,
}

async fn owned_resume(state: &AppState, user_id: Uuid, id: Uuid) -> Result<ResumeRow, AppError> {
    state
        .resumes
        .get(user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<LibraryQuery>,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    let rows = state
        .resumes
        .list(params.user_id, params.q.as_deref())
        .await?;
    Ok(Json(rows.iter().map(ResumeSummary::from).collect()))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<SavedResumeResponse>, AppError> {
    let row = owned_resume(&state, params.user_id, id).await?;
    let loaded = ResumeDocument::from_saved_json(&row.data);
    Ok(Json(SavedResumeResponse {
        resume: ResumeSummary::from(&row),
        document: loaded.document,
        section_order: row.section_order.0.clone(),
        notice: loaded.notice,
    }))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if state.resumes.delete(params.user_id, id).await? {
        info!("Deleted resume {id} for user {}", params.user_id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Resume {id} not found")))
    }
}

/// POST /api/v1/resumes/:id/export
pub async fn handle_retry_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RetryExportRequest>,
) -> Result<Json<ExportReceipt>, AppError> {
    let row = owned_resume(&state, req.user_id, id).await?;
    let options = RetryOptions {
        layout_id: req.layout_id,
        section_order: req.section_order,
        name: req.name,
    };
    let receipt = retry_export(&state, &row, options).await?;
    Ok(Json(receipt))
}
