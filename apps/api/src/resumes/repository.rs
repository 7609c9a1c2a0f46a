//! Saved-resume library.
//!
//! Records are written whole on every save: the document travels as an opaque
//! JSON string, so the table never needs to change when the document does.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeDraft, ResumeRow};

/// Storage for saved resumes. Carried in `AppState` as `Arc<dyn ResumeRepository>`.
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    /// Updates the record named by `draft.id` when the user owns it,
    /// otherwise inserts a new record with a fresh id.
    async fn save(&self, draft: ResumeDraft) -> Result<ResumeRow, AppError>;

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<ResumeRow>, AppError>;

    /// Newest first. `search` matches the name (case-insensitive) or the
    /// `YYYY-MM-DD` creation date.
    async fn list(&self, user_id: Uuid, search: Option<&str>) -> Result<Vec<ResumeRow>, AppError>;

    /// Returns false when there was nothing to delete.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError>;
}

pub struct PgResumeRepository {
    pool: PgPool,
}

impl PgResumeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeRepository for PgResumeRepository {
    async fn save(&self, draft: ResumeDraft) -> Result<ResumeRow, AppError> {
        if let Some(id) = draft.id {
            let updated: Option<ResumeRow> = sqlx::query_as(
                r#"
                UPDATE resumes
                SET name = $1, data = $2, section_order = $3, layout_id = $4, updated_at = now()
                WHERE id = $5 AND user_id = $6
                RETURNING *
                "#,
            )
            .bind(&draft.name)
            .bind(&draft.data)
            .bind(Json(&draft.section_order))
            .bind(draft.layout_id)
            .bind(id)
            .bind(draft.user_id)
            .fetch_optional(&self.pool)
            .await?;

            if let Some(row) = updated {
                info!("Updated resume {} for user {}", row.id, row.user_id);
                return Ok(row);
            }
            warn!("Resume {id} not found for user {}, saving as a new record", draft.user_id);
        }

        let row: ResumeRow = sqlx::query_as(
            r#"
            INSERT INTO resumes (id, user_id, name, data, section_order, layout_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(draft.user_id)
        .bind(&draft.name)
        .bind(&draft.data)
        .bind(Json(&draft.section_order))
        .bind(draft.layout_id)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted resume {} for user {}", row.id, row.user_id);
        Ok(row)
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list(&self, user_id: Uuid, search: Option<&str>) -> Result<Vec<ResumeRow>, AppError> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            r#"
            SELECT *
            FROM resumes
            WHERE user_id = $1
              AND ($2::text IS NULL
                   OR name ILIKE $2
                   OR to_char(created_at, 'YYYY-MM-DD') LIKE $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(search.and_then(like_pattern))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Turns a user search string into a `LIKE` pattern matching it anywhere.
/// Blank searches match everything and yield `None`.
pub fn like_pattern(search: &str) -> Option<String> {
    let trimmed = search.trim();
    if trimmed.is_empty() {
        return None;
    }
    let escaped = trimmed
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{escaped}%"))
}
