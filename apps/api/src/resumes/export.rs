//! Save-then-print.
//!
//! Export always persists first. Only once the record is durable is the
//! export document rendered and handed to the print sink, so a print failure
//! never costs the user their edits.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::document::{EditableResume, ResumeDocument, SectionOrder};
use crate::errors::AppError;
use crate::layout::layout_for;
use crate::models::resume::{ResumeDraft, ResumeRow};
use crate::render::export::{render_export_document, ExportOptions};
use crate::resumes::print::{PrintJob, PrintReceipt};
use crate::session::EditingSession;
use crate::state::AppState;

pub const DEFAULT_EXPORT_NAME: &str = "Resume";

#[derive(Debug, Clone, Serialize)]
pub struct ExportReceipt {
    pub resume_id: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub print: PrintReceipt,
}

/// Requested name if it has any content, else the person's name, else "Resume".
pub fn export_name(requested: Option<&str>, document: &ResumeDocument) -> String {
    [requested.unwrap_or_default(), document.personal.name.as_str()]
        .into_iter()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(DEFAULT_EXPORT_NAME)
        .to_string()
}

/// Exports the session's working copy: save, remember the record on the
/// session, then print.
pub async fn export_session(
    state: &AppState,
    session: &mut EditingSession,
    requested_name: Option<&str>,
) -> Result<ExportReceipt, AppError> {
    let name = export_name(requested_name, &session.draft.document);

    let row = save_draft(state, session.user_id, session.resume_id, &name, &session.draft).await?;

    session.resume_id = Some(row.id);
    session.name = Some(name.clone());
    remember_saved_record(state, session, row.id, &name).await?;

    let print = print_saved(state, row.id, &name, &session.draft).await?;
    Ok(ExportReceipt {
        resume_id: row.id,
        name,
        print,
    })
}

/// Records the saved id on the stored session. The stored copy is reloaded
/// first so edits that landed during the save are kept.
async fn remember_saved_record(
    state: &AppState,
    snapshot: &EditingSession,
    resume_id: Uuid,
    name: &str,
) -> Result<(), AppError> {
    let mut stored = match state.sessions.load(snapshot.id).await? {
        Some(stored) => stored,
        None => snapshot.clone(),
    };
    stored.resume_id = Some(resume_id);
    stored.name = Some(name.to_string());
    state.sessions.save(&stored).await
}

/// Presentation overrides for a retried export. Anything left out is taken
/// from the saved record.
#[derive(Debug, Clone, Default)]
pub struct RetryOptions {
    pub layout_id: Option<i64>,
    pub section_order: Option<SectionOrder>,
    pub name: Option<String>,
}

/// Prints an already-saved record again without touching it, in the order
/// and layout it was saved with.
pub async fn retry_export(
    state: &AppState,
    row: &ResumeRow,
    options: RetryOptions,
) -> Result<ExportReceipt, AppError> {
    let loaded = ResumeDocument::from_saved_json(&row.data);
    if let Some(notice) = loaded.notice {
        return Err(AppError::UnprocessableEntity(notice));
    }

    let name = match options.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        Some(requested) => requested.to_string(),
        None => row.name.clone(),
    };
    let draft = EditableResume {
        document: loaded.document,
        section_order: options
            .section_order
            .unwrap_or_else(|| row.section_order.0.clone()),
        layout_id: options.layout_id.unwrap_or(row.layout_id),
    };

    info!("Retrying export of resume {}", row.id);
    let print = print_saved(state, row.id, &name, &draft).await?;
    Ok(ExportReceipt {
        resume_id: row.id,
        name,
        print,
    })
}

async fn save_draft(
    state: &AppState,
    user_id: Uuid,
    resume_id: Option<Uuid>,
    name: &str,
    draft: &EditableResume,
) -> Result<ResumeRow, AppError> {
    let row = state
        .resumes
        .save(ResumeDraft {
            id: resume_id,
            user_id,
            name: name.to_string(),
            data: serde_json::to_string(&draft.document)?,
            section_order: draft.section_order.clone(),
            layout_id: draft.layout_id,
        })
        .await?;
    info!("Saved resume {} ('{}') before export", row.id, row.name);
    Ok(row)
}

async fn print_saved(
    state: &AppState,
    resume_id: Uuid,
    name: &str,
    draft: &EditableResume,
) -> Result<PrintReceipt, AppError> {
    let options = ExportOptions {
        title: name.to_string(),
        auto_print: state.config.export_auto_print,
    };
    let html = render_export_document(
        &draft.document,
        &draft.section_order,
        layout_for(draft.layout_id),
        &options,
    );

    let receipt = state
        .printer
        .submit(PrintJob {
            resume_id,
            title: name.to_string(),
            html,
        })
        .await
        .map_err(|e| {
            warn!("Print handoff failed for saved resume {resume_id}: {e}");
            AppError::ExportFailed {
                resume_id,
                message: e.to_string(),
            }
        })?;

    info!("Export of resume {resume_id} ready at {}", receipt.location);
    Ok(receipt)
}
