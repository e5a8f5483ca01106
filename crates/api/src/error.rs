use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use formgate_core::error::CoreError;
use formgate_core::render::RenderError;
use formgate_core::upload::UploadError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent `{error, code}` JSON
/// error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `formgate_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A photo upload failure.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// A renderer failure.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A malformed or incomplete request payload.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Upload errors, all client faults except storage (handled
            //     via InternalError by the handler) ---
            AppError::Upload(err) => {
                let code = match err {
                    UploadError::NoFile => "NO_FILE",
                    UploadError::Transport(_) => "UPLOAD_ERROR",
                    UploadError::InvalidType => "INVALID_TYPE",
                    UploadError::TooLarge { .. } => "FILE_TOO_LARGE",
                };
                (StatusCode::BAD_REQUEST, code, err.to_string())
            }

            // --- Renderer errors ---
            AppError::Render(err) => {
                let code = match err {
                    RenderError::EmptyForm => "EMPTY_FORM",
                    RenderError::InvalidConfig(_) => "INVALID_CONFIG",
                };
                (StatusCode::BAD_REQUEST, code, err.to_string())
            }

            // --- HTTP-specific errors ---
            AppError::InvalidData(msg) => (StatusCode::BAD_REQUEST, "INVALID_DATA", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
