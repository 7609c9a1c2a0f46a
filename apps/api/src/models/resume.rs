use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::document::SectionOrder;

/// A saved resume. `data` is the JSON-encoded `ResumeDocument`, kept as text
/// so that a record written by an older client still round-trips unchanged.
/// The section order and layout it was saved with live alongside it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub data: String,
    pub section_order: Json<SectionOrder>,
    pub layout_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What the save step writes. `id: None` (or an id the user does not own)
/// creates a new record.
#[derive(Debug, Clone)]
pub struct ResumeDraft {
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    pub name: String,
    pub data: String,
    pub section_order: SectionOrder,
    pub layout_id: i64,
}

/// Library listing entry; omits the document body.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeSummary {
    pub id: Uuid,
    pub name: String,
    pub layout_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ResumeRow> for ResumeSummary {
    fn from(row: &ResumeRow) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            layout_id: row.layout_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
