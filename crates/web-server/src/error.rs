use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::ValidationError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid product: {0}")]
    Validation(#[from] ValidationError),
    #[error("Malformed request body: {0}")]
    BadRequest(#[from] JsonRejection),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal database error occurred" }),
                )
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            AppError::Conflict(message) => (StatusCode::CONFLICT, json!({ "error": message })),
            AppError::Validation(err) => {
                tracing::debug!(error = %err, "Rejected product payload.");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({ "error": err.to_string(), "fields": err.errors }),
                )
            }
            AppError::BadRequest(rejection) => {
                (rejection.status(), json!({ "error": rejection.body_text() }))
            }
        };

        (status, Json(body)).into_response()
    }
}
