use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::document::EditError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Session store error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The resume was saved but could not be handed to the print pipeline.
    #[error("Export failed for resume {resume_id}: {message}")]
    ExportFailed { resume_id: Uuid, message: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<EditError> for AppError {
    fn from(e: EditError) -> Self {
        match e {
            EditError::Invalid(msg) => AppError::Validation(msg),
            e @ EditError::UnknownItem { .. } => AppError::NotFound(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Cache(e) => {
                tracing::error!("Session store error: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SESSION_STORE_ERROR",
                    "The editing session could not be reached".to_string(),
                )
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SERIALIZATION_ERROR",
                    "Stored data could not be encoded".to_string(),
                )
            }
            AppError::ExportFailed { resume_id, message } => {
                tracing::warn!("Export failed for resume {resume_id}: {message}");
                let body = Json(json!({
                    "error": {
                        "code": "EXPORT_FAILED",
                        "message": "Your resume is saved, but the PDF export could not be started. Please try exporting again.",
                        "resume_id": resume_id,
                    }
                }));
                return (StatusCode::BAD_GATEWAY, body).into_response();
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::edit::ListSection;

    #[test]
    fn test_edit_errors_map_to_client_errors() {
        let e: AppError = EditError::Invalid("bad".to_string()).into();
        assert!(matches!(e, AppError::Validation(_)));
        let e: AppError = EditError::UnknownItem {
            section: ListSection::Work,
            id: "w9".to_string(),
        }
        .into();
        assert!(matches!(e, AppError::NotFound(_)));
    }

    #[test]
    fn test_export_failed_is_a_distinct_status() {
        let resp = AppError::ExportFailed {
            resume_id: Uuid::nil(),
            message: "bucket unreachable".to_string(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_validation_is_bad_request() {
        let resp = AppError::Validation("x".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
