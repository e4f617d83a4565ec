use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use cineteca_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent `{ "success": false }`
/// JSON error bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cineteca_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A movie id that is not a positive integer. Carries the raw path
    /// segment so the response can echo it back.
    #[error("Invalid movie id: {0}")]
    InvalidMovieId(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The movie endpoints echo the offending id back in the error body.
        let movie_id = match &self {
            AppError::InvalidMovieId(raw) => Some(json!(raw)),
            AppError::Core(CoreError::NotFound { id, .. }) => Some(json!(id)),
            _ => None,
        };

        let (status, message) = match &self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                format!("{entity} with id {id} not found"),
            ),

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::InvalidMovieId(raw) => (
                StatusCode::BAD_REQUEST,
                format!("Movie id must be a positive integer, got '{raw}'"),
            ),
        };

        let mut body = json!({
            "success": false,
            "error": message,
        });
        if let Some(id) = movie_id {
            body["movie_id"] = id;
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status and message.
///
/// `RowNotFound` maps to 404; everything else maps to 500 with a sanitized
/// message. The database detail is logged server-side and never leaked.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => {
            (StatusCode::NOT_FOUND, "Resource not found".to_string())
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            )
        }
    }
}
