use axum::{response::Html, Json};
use serde::Deserialize;

use crate::document::{ResumeDocument, SectionOrder};
use crate::errors::AppError;
use crate::layout::registry::DEFAULT_LAYOUT_ID;
use crate::layout::{layout_for, LayoutDefinition, LAYOUTS};
use crate::render::export::{render_export_document, ExportOptions};
use crate::render::preview::{render_preview, PreviewTree};
use crate::resumes::export::export_name;

fn default_layout_id() -> i64 {
    i64::from(DEFAULT_LAYOUT_ID)
}

/// A one-off render of a document the caller holds itself.
#[derive(Deserialize)]
pub struct RenderRequest {
    pub document: ResumeDocument,
    #[serde(default)]
    pub section_order: SectionOrder,
    #[serde(default = "default_layout_id")]
    pub layout_id: i64,
    /// Export document title; defaults to the person's name.
    pub name: Option<String>,
    #[serde(default)]
    pub auto_print: bool,
}

/// GET /api/v1/layouts
pub async fn handle_list_layouts() -> Json<&'static [LayoutDefinition]> {
    Json(&LAYOUTS[..])
}

/// POST /api/v1/render/preview
pub async fn handle_render_preview(
    Json(req): Json<RenderRequest>,
) -> Result<Json<PreviewTree>, AppError> {
    Ok(Json(render_preview(
        &req.document,
        &req.section_order,
        layout_for(req.layout_id),
    )))
}

/// POST /api/v1/render/export
pub async fn handle_render_export(
    Json(req): Json<RenderRequest>,
) -> Result<Html<String>, AppError> {
    let options = ExportOptions {
        title: export_name(req.name.as_deref(), &req.document),
        auto_print: req.auto_print,
    };
    Ok(Html(render_export_document(
        &req.document,
        &req.section_order,
        layout_for(req.layout_id),
        &options,
    )))
}
