//! Student item handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderName, StatusCode, header},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::db::{Database, DbError, Id, StudentItem, StudentItemRepository};
use crate::payment::PaymentReferenceSource;

use super::{ErrorResponse, db_error_response, error_response, not_found};

const ENTITY: &str = "StudentItem";

/// Collection path, used for `Location` headers.
pub const STUDENT_ITEMS_PATH: &str = "/api/v1/StudentItems";

// =============================================================================
// DTOs
// =============================================================================

/// Student item as seen by clients. The payment reference stays server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentItemDto {
    /// Store-generated identifier (ignored on create and update)
    #[serde(default)]
    #[schema(example = 1)]
    pub id: Id,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl From<StudentItem> for StudentItemDto {
    fn from(s: StudentItem) -> Self {
        Self {
            id: s.id,
            first_name: s.first_name,
            last_name: s.last_name,
            email: s.email,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// List all student items
#[utoipa::path(
    get,
    path = "/api/v1/StudentItems",
    tag = "student-items",
    responses(
        (status = 200, description = "All student items", body = Vec<StudentItemDto>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_student_items<D: Database, R: PaymentReferenceSource + Send + Sync>(
    State(state): State<AppState<D, R>>,
) -> Result<Json<Vec<StudentItemDto>>, (StatusCode, Json<ErrorResponse>)> {
    let students = state
        .db()
        .student_items()
        .find_all()
        .await
        .map_err(db_error_response)?;

    Ok(Json(
        students.into_iter().map(StudentItemDto::from).collect(),
    ))
}

/// Get a student item by ID
#[utoipa::path(
    get,
    path = "/api/v1/StudentItems/{id}",
    tag = "student-items",
    params(
        ("id" = i64, Path, description = "Student item ID")
    ),
    responses(
        (status = 200, description = "Student item found", body = StudentItemDto),
        (status = 404, description = "Student item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_student_item<D: Database, R: PaymentReferenceSource + Send + Sync>(
    State(state): State<AppState<D, R>>,
    Path(id): Path<Id>,
) -> Result<Json<StudentItemDto>, (StatusCode, Json<ErrorResponse>)> {
    let student = state
        .db()
        .student_items()
        .find_by_id(id)
        .await
        .map_err(db_error_response)?
        .ok_or_else(|| not_found(ENTITY, id))?;

    Ok(Json(StudentItemDto::from(student)))
}

/// Create a student item
///
/// Rejects the request when the email is already taken. The payment
/// reference is drawn from the injected source, never from the body.
#[utoipa::path(
    post,
    path = "/api/v1/StudentItems",
    tag = "student-items",
    request_body = StudentItemDto,
    responses(
        (status = 201, description = "Student item created", body = StudentItemDto,
            headers(("Location" = String, description = "URL of the new student item"))),
        (status = 400, description = "Email already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_student_item<D: Database, R: PaymentReferenceSource + Send + Sync>(
    State(state): State<AppState<D, R>>,
    Json(dto): Json<StudentItemDto>,
) -> Result<
    (StatusCode, [(HeaderName, String); 1], Json<StudentItemDto>),
    (StatusCode, Json<ErrorResponse>),
> {
    let taken = state
        .db()
        .student_items()
        .exists_by_email(&dto.email)
        .await
        .map_err(db_error_response)?;
    if taken {
        warn!("Rejected student item with duplicate email");
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("A student with email '{}' already exists", dto.email),
        ));
    }

    let student = StudentItem::new(
        dto.first_name,
        dto.last_name,
        dto.email,
        state.references().next_reference(),
    );

    let saved = state
        .db()
        .student_items()
        .save(&student)
        .await
        .map_err(db_error_response)?;

    info!(id = saved.id, "Created student item");

    let location = format!("{}/{}", STUDENT_ITEMS_PATH, saved.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(StudentItemDto::from(saved)),
    ))
}

/// Update a student item's names
///
/// Email and payment reference are left untouched. A concurrency conflict
/// resolves to 404 when the row is gone and is otherwise ignored.
#[utoipa::path(
    put,
    path = "/api/v1/StudentItems/{id}",
    tag = "student-items",
    params(
        ("id" = i64, Path, description = "Student item ID")
    ),
    request_body = StudentItemDto,
    responses(
        (status = 204, description = "Student item updated"),
        (status = 404, description = "Student item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_student_item<D: Database, R: PaymentReferenceSource + Send + Sync>(
    State(state): State<AppState<D, R>>,
    Path(id): Path<Id>,
    Json(dto): Json<StudentItemDto>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let mut student = state
        .db()
        .student_items()
        .find_by_id(id)
        .await
        .map_err(db_error_response)?
        .ok_or_else(|| not_found(ENTITY, id))?;

    student.first_name = dto.first_name;
    student.last_name = dto.last_name;

    match state.db().student_items().save(&student).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(e @ DbError::Conflict { .. }) => {
            let still_exists = state
                .db()
                .student_items()
                .exists(id)
                .await
                .map_err(db_error_response)?;
            if !still_exists {
                return Err(not_found(ENTITY, id));
            }
            warn!(error = %e, "Ignoring concurrency conflict on student item");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(db_error_response(e)),
    }
}

/// Delete a student item
#[utoipa::path(
    delete,
    path = "/api/v1/StudentItems/{id}",
    tag = "student-items",
    params(
        ("id" = i64, Path, description = "Student item ID")
    ),
    responses(
        (status = 204, description = "Student item deleted"),
        (status = 404, description = "Student item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_student_item<D: Database, R: PaymentReferenceSource + Send + Sync>(
    State(state): State<AppState<D, R>>,
    Path(id): Path<Id>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .db()
        .student_items()
        .delete(id)
        .await
        .map_err(db_error_response)?;

    info!("Deleted student item");
    Ok(StatusCode::NO_CONTENT)
}
