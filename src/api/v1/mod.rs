//! V1 API handlers.

mod student_items;
mod task_items;

#[cfg(test)]
mod task_items_test;

pub use student_items::*;
pub use task_items::*;

use axum::{Json, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::db::{DbError, Id};

/// Error response DTO
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "TaskItem '1' not found")]
    pub error: String,
}

pub(crate) fn error_response(
    status: StatusCode,
    error: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

pub(crate) fn not_found(entity_type: &str, id: Id) -> (StatusCode, Json<ErrorResponse>) {
    error_response(
        StatusCode::NOT_FOUND,
        format!("{} '{}' not found", entity_type, id),
    )
}

/// Map storage errors that the handler did not resolve itself.
pub(crate) fn db_error_response(e: DbError) -> (StatusCode, Json<ErrorResponse>) {
    match e {
        DbError::NotFound { entity_type, id } => error_response(
            StatusCode::NOT_FOUND,
            format!("{} '{}' not found", entity_type, id),
        ),
        _ => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
