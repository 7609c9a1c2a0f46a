use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::document::{EditCommand, EditOutcome};
use crate::errors::AppError;
use crate::render::preview::{render_preview, PreviewTree};
use crate::resumes::export::{export_session, ExportReceipt};
use crate::session::EditingSession;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub user_id: Uuid,
    /// Saved record to open; omitted for a new resume.
    pub resume_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct EditResponse {
    pub session: EditingSession,
    #[serde(flatten)]
    pub outcome: EditOutcome,
}

#[derive(Deserialize, Default)]
pub struct ExportRequest {
    pub name: Option<String>,
}

impl ExportRequest {
    /// An empty body asks for the default name; anything else must be valid.
    fn parse(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::Validation(format!("Invalid export request: {e}")))
    }
}

async fn load_session(state: &AppState, id: Uuid) -> Result<EditingSession, AppError> {
    state
        .sessions
        .load(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Editing session {id} not found or expired")))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<EditingSession>), AppError> {
    let session = match req.resume_id {
        Some(resume_id) => {
            let row = state
                .resumes
                .get(req.user_id, resume_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
            EditingSession::hydrate(req.user_id, &row)
        }
        None => EditingSession::fresh(req.user_id),
    };
    state.sessions.save(&session).await?;
    info!(
        "Opened editing session {} for user {} (resume {:?})",
        session.id, session.user_id, session.resume_id
    );
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EditingSession>, AppError> {
    Ok(Json(load_session(&state, id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_discard_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.discard(id).await? {
        info!("Discarded editing session {id}");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Editing session {id} not found or expired")))
    }
}

/// POST /api/v1/sessions/:id/edits
pub async fn handle_apply_edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(command): Json<EditCommand>,
) -> Result<Json<EditResponse>, AppError> {
    let mut session = load_session(&state, id).await?;
    let outcome = session.apply(command)?;
    state.sessions.save(&session).await?;
    Ok(Json(EditResponse { session, outcome }))
}

/// GET /api/v1/sessions/:id/preview
pub async fn handle_session_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PreviewTree>, AppError> {
    let session = load_session(&state, id).await?;
    Ok(Json(render_preview(
        &session.draft.document,
        &session.draft.section_order,
        session.layout(),
    )))
}

/// POST /api/v1/sessions/:id/export
pub async fn handle_session_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<ExportReceipt>, AppError> {
    let req = ExportRequest::parse(&body)?;
    let mut session = load_session(&state, id).await?;
    let receipt = export_session(&state, &mut session, req.name.as_deref()).await?;
    Ok(Json(receipt))
}
