//! Task item handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderName, StatusCode, header},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::db::{Database, DbError, Id, TaskItem, TaskItemRepository};
use crate::payment::PaymentReferenceSource;

use super::{ErrorResponse, db_error_response, error_response, not_found};

const ENTITY: &str = "TaskItem";

/// Collection path, used for `Location` headers.
pub const TASK_ITEMS_PATH: &str = "/api/v1/TaskItems";

// =============================================================================
// DTOs
// =============================================================================

/// Task item as seen by clients. `secret` is never part of it.
///
/// Also accepted as the PUT body; extra fields such as `secret` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskItemDto {
    /// Store-generated identifier (ignored on create)
    #[serde(default)]
    #[schema(example = 1)]
    pub id: Id,
    #[schema(example = "buy milk")]
    pub name: Option<String>,
    #[serde(default)]
    #[schema(example = false)]
    pub is_complete: bool,
}

impl From<TaskItem> for TaskItemDto {
    fn from(t: TaskItem) -> Self {
        Self {
            id: t.id,
            name: t.name,
            is_complete: t.is_complete,
        }
    }
}

impl From<TaskItemDto> for TaskItem {
    fn from(dto: TaskItemDto) -> Self {
        Self {
            id: dto.id,
            ..TaskItem::new(dto.name, dto.is_complete)
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// List all task items
///
/// Returns every task item ordered by ID
#[utoipa::path(
    get,
    path = "/api/v1/TaskItems",
    tag = "task-items",
    responses(
        (status = 200, description = "All task items", body = Vec<TaskItemDto>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_task_items<D: Database, R: PaymentReferenceSource + Send + Sync>(
    State(state): State<AppState<D, R>>,
) -> Result<Json<Vec<TaskItemDto>>, (StatusCode, Json<ErrorResponse>)> {
    let items = state
        .db()
        .task_items()
        .find_all()
        .await
        .map_err(db_error_response)?;

    Ok(Json(items.into_iter().map(TaskItemDto::from).collect()))
}

/// Get a task item by ID
///
/// Returns the task item without its server-side secret
#[utoipa::path(
    get,
    path = "/api/v1/TaskItems/{id}",
    tag = "task-items",
    params(
        ("id" = i64, Path, description = "Task item ID")
    ),
    responses(
        (status = 200, description = "Task item found", body = TaskItemDto),
        (status = 404, description = "Task item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_task_item<D: Database, R: PaymentReferenceSource + Send + Sync>(
    State(state): State<AppState<D, R>>,
    Path(id): Path<Id>,
) -> Result<Json<TaskItemDto>, (StatusCode, Json<ErrorResponse>)> {
    let item = state
        .db()
        .task_items()
        .find_by_id(id)
        .await
        .map_err(db_error_response)?
        .ok_or_else(|| not_found(ENTITY, id))?;

    Ok(Json(TaskItemDto::from(item)))
}

/// Create a task item
///
/// The store assigns the ID; any ID in the body is ignored
#[utoipa::path(
    post,
    path = "/api/v1/TaskItems",
    tag = "task-items",
    request_body = TaskItemDto,
    responses(
        (status = 201, description = "Task item created", body = TaskItemDto,
            headers(("Location" = String, description = "URL of the new task item"))),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_task_item<D: Database, R: PaymentReferenceSource + Send + Sync>(
    State(state): State<AppState<D, R>>,
    Json(dto): Json<TaskItemDto>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<TaskItemDto>), (StatusCode, Json<ErrorResponse>)>
{
    let item = state
        .db()
        .task_items()
        .save(&TaskItem {
            id: 0,
            ..TaskItem::from(dto)
        })
        .await
        .map_err(db_error_response)?;

    info!(id = item.id, "Created task item");

    let location = format!("{}/{}", TASK_ITEMS_PATH, item.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(TaskItemDto::from(item)),
    ))
}

/// Replace name and completion of a task item.
///
/// A concurrency conflict on save resolves to 404 when the row is gone;
/// if it still exists the conflict is reported as a server error.
#[utoipa::path(
    put,
    path = "/api/v1/TaskItems/{id}",
    tag = "task-items",
    params(
        ("id" = i64, Path, description = "Task item ID")
    ),
    request_body = TaskItemDto,
    responses(
        (status = 204, description = "Task item updated"),
        (status = 400, description = "Path and body IDs differ", body = ErrorResponse),
        (status = 404, description = "Task item not found", body = ErrorResponse),
        (status = 500, description = "Unresolved concurrency conflict", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_task_item<D: Database, R: PaymentReferenceSource + Send + Sync>(
    State(state): State<AppState<D, R>>,
    Path(id): Path<Id>,
    Json(dto): Json<TaskItemDto>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    if id != dto.id {
        warn!(body_id = dto.id, "Task item id mismatch");
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("Path id {} does not match body id {}", id, dto.id),
        ));
    }

    let mut item = state
        .db()
        .task_items()
        .find_by_id(id)
        .await
        .map_err(db_error_response)?
        .ok_or_else(|| not_found(ENTITY, id))?;

    item.name = dto.name;
    item.is_complete = dto.is_complete;

    match state.db().task_items().save(&item).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(e @ DbError::Conflict { .. }) => {
            let still_exists = state
                .db()
                .task_items()
                .exists(id)
                .await
                .map_err(db_error_response)?;
            if !still_exists {
                return Err(not_found(ENTITY, id));
            }
            warn!(error = %e, "Unresolved concurrency conflict");
            Err(db_error_response(e))
        }
        Err(e) => Err(db_error_response(e)),
    }
}

/// Delete a task item
///
/// Returns 404 when no task item has the given ID
#[utoipa::path(
    delete,
    path = "/api/v1/TaskItems/{id}",
    tag = "task-items",
    params(
        ("id" = i64, Path, description = "Task item ID")
    ),
    responses(
        (status = 204, description = "Task item deleted"),
        (status = 404, description = "Task item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_task_item<D: Database, R: PaymentReferenceSource + Send + Sync>(
    State(state): State<AppState<D, R>>,
    Path(id): Path<Id>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .db()
        .task_items()
        .delete(id)
        .await
        .map_err(db_error_response)?;

    info!("Deleted task item");
    Ok(StatusCode::NO_CONTENT)
}
