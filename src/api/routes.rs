//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::state::AppState;
use super::system::{self, HealthResponse};
use super::v1::{self, ErrorResponse, StudentItemDto, TaskItemDto};
use crate::db::Database;
use crate::payment::PaymentReferenceSource;

/// Build routes with generic database and reference source types.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over `Database` and `PaymentReferenceSource`. It applies the turbofish
/// operator automatically.
macro_rules! routes {
    ($D:ty, $R:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D, $R>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Task API",
        version = "0.1.0",
        description = "CRUD API for task items and student items",
        license(name = "GPL-2.0")
    ),
    paths(
        system::health,
        v1::list_task_items,
        v1::get_task_item,
        v1::create_task_item,
        v1::update_task_item,
        v1::delete_task_item,
        v1::list_student_items,
        v1::get_student_item,
        v1::create_student_item,
        v1::update_student_item,
        v1::delete_student_item,
    ),
    components(
        schemas(
            HealthResponse,
            TaskItemDto,
            StudentItemDto,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "task-items", description = "Task item endpoints"),
        (name = "student-items", description = "Student item endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D, R>(state: AppState<D, R>) -> Router
where
    D: Database + 'static,
    R: PaymentReferenceSource + Send + Sync + 'static,
{
    let api = ApiDoc::openapi();

    // System routes (non-generic)
    let system_routes = Router::new().route("/health", get(system::health));

    let task_item_routes = routes!(D, R => {
        get "/api/v1/TaskItems" => v1::list_task_items,
        get "/api/v1/TaskItems/{id}" => v1::get_task_item,
        post "/api/v1/TaskItems" => v1::create_task_item,
        put "/api/v1/TaskItems/{id}" => v1::update_task_item,
        delete "/api/v1/TaskItems/{id}" => v1::delete_task_item,
    });

    let student_item_routes = routes!(D, R => {
        get "/api/v1/StudentItems" => v1::list_student_items,
        get "/api/v1/StudentItems/{id}" => v1::get_student_item,
        post "/api/v1/StudentItems" => v1::create_student_item,
        put "/api/v1/StudentItems/{id}" => v1::update_student_item,
        delete "/api/v1/StudentItems/{id}" => v1::delete_student_item,
    });

    system_routes
        .merge(task_item_routes)
        .merge(student_item_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
