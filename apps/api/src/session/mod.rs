//! Editing sessions.
//!
//! A session holds the working copy of one resume while it is being edited:
//! the document, the user's section order and the selected layout. Sessions
//! live in the session store with an idle TTL; nothing reaches Postgres until
//! the user exports.

pub mod handlers;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::{EditCommand, EditError, EditOutcome, EditableResume, ResumeDocument};
use crate::layout::{layout_for, LayoutDefinition};
use crate::models::resume::ResumeRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditingSession {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Saved record this session writes to. Set by the first export so later
    /// exports update the same record.
    pub resume_id: Option<Uuid>,
    /// Name the resume was last saved under.
    pub name: Option<String>,
    #[serde(flatten)]
    pub draft: EditableResume,
    /// User-facing message from hydration, cleared by the next edit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl EditingSession {
    /// A session over a fresh document.
    pub fn fresh(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            resume_id: None,
            name: None,
            draft: EditableResume::new(ResumeDocument::fresh()),
            notice: None,
            updated_at: Utc::now(),
        }
    }

    /// A session over a saved record, in the order and layout it was saved
    /// with. Unreadable data falls back to a fresh document and carries the
    /// load notice.
    pub fn hydrate(user_id: Uuid, row: &ResumeRow) -> Self {
        let loaded = ResumeDocument::from_saved_json(&row.data);
        Self {
            id: Uuid::new_v4(),
            user_id,
            resume_id: Some(row.id),
            name: Some(row.name.clone()),
            draft: EditableResume {
                document: loaded.document,
                section_order: row.section_order.0.clone(),
                layout_id: row.layout_id,
            },
            notice: loaded.notice,
            updated_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, command: EditCommand) -> Result<EditOutcome, EditError> {
        let outcome = self.draft.apply(command)?;
        self.notice = None;
        self.updated_at = Utc::now();
        Ok(outcome)
    }

    pub fn layout(&self) -> &'static LayoutDefinition {
        layout_for(self.draft.layout_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::edit::ListSection;
    use crate::document::model::LOAD_FAILED_NOTICE;
    use crate::document::section_order::{MoveDirection, SectionTag};
    use crate::document::SectionOrder;
    use sqlx::types::Json;

    fn row(data: &str) -> ResumeRow {
        ResumeRow {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: "Backend roles".to_string(),
            data: data.to_string(),
            section_order: Json(SectionOrder::default()),
            layout_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_hydrate_keeps_record_identity() {
        let mut doc = ResumeDocument::fresh();
        doc.personal.name = "Ada Lovelace".to_string();
        let saved = row(&serde_json::to_string(&doc).unwrap());

        let session = EditingSession::hydrate(Uuid::nil(), &saved);
        assert_eq!(session.resume_id, Some(saved.id));
        assert_eq!(session.name.as_deref(), Some("Backend roles"));
        assert_eq!(session.draft.document.personal.name, "Ada Lovelace");
        assert!(session.notice.is_none());
    }

    #[test]
    fn test_hydrate_restores_saved_order_and_layout() {
        let mut order = SectionOrder::default();
        order.move_section(1, MoveDirection::Down);
        let mut saved = row("{}");
        saved.section_order = Json(order.clone());
        saved.layout_id = 6;

        let session = EditingSession::hydrate(Uuid::nil(), &saved);
        assert_eq!(session.draft.section_order, order);
        assert_eq!(session.draft.section_order.tags()[1], SectionTag::Work);
        assert_eq!(session.layout().id, 6);
    }

    #[test]
    fn test_hydrate_unreadable_data_falls_back_with_notice() {
        let session = EditingSession::hydrate(Uuid::nil(), &row("{not json"));
        assert!(session.draft.document.personal.name.is_empty());
        assert_eq!(session.draft.document.work.len(), 1);
        assert_eq!(session.notice.as_deref(), Some(LOAD_FAILED_NOTICE));
    }

    #[test]
    fn test_edit_clears_notice() {
        let mut session = EditingSession::hydrate(Uuid::nil(), &row("42"));
        assert!(session.notice.is_some());
        session
            .apply(EditCommand::AddItem {
                section: ListSection::Skills,
            })
            .unwrap();
        assert!(session.notice.is_none());
        assert_eq!(session.draft.document.skills.len(), 2);
    }

    #[test]
    fn test_failed_edit_leaves_session_untouched() {
        let mut session = EditingSession::fresh(Uuid::nil());
        let before = session.clone();
        assert!(session
            .apply(EditCommand::SetThemeColor {
                color: "blue".to_string()
            })
            .is_err());
        assert_eq!(session, before);
    }

    #[test]
    fn test_unknown_layout_resolves_to_default() {
        let mut session = EditingSession::fresh(Uuid::nil());
        session
            .apply(EditCommand::SetLayout { layout_id: 42 })
            .unwrap();
        assert_eq!(session.layout().id, 1);
        session
            .apply(EditCommand::MoveSection {
                index: 1,
                direction: MoveDirection::Up,
            })
            .unwrap();
        assert_eq!(session.draft.layout_id, 42);
    }

    #[test]
    fn test_session_survives_storage_encoding() {
        let session = EditingSession::fresh(Uuid::new_v4());
        let text = serde_json::to_string(&session).unwrap();
        let back: EditingSession = serde_json::from_str(&text).unwrap();
        assert_eq!(back, session);
    }
}
