//! Integration tests for TaskItem API endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{AppState, routes};
use crate::db::{Database, SqliteDatabase, TaskItem, TaskItemRepository};
use crate::payment::SeededReferenceSource;

use super::TaskItemDto;

/// Create a test app with an in-memory database
async fn test_app() -> axum::Router {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create test database");
    db.migrate().expect("Failed to run migrations");
    let state = AppState::new(db, SeededReferenceSource::from_seed(1));
    routes::create_router(state)
}

/// Helper to parse JSON response body
async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// =============================================================================
// GET /api/v1/TaskItems - List Task Items
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn list_task_items_initially_empty() {
    let app = test_app().await;

    let response = app
        .oneshot(empty_request("GET", "/api/v1/TaskItems"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_task_items_returns_all_created() {
    let app = test_app().await;

    for name in ["first", "second"] {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/TaskItems",
                json!({"name": name, "isComplete": false}),
            ))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(empty_request("GET", "/api/v1/TaskItems"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let items = body.as_array().expect("Expected array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "first");
    assert_eq!(items[1]["name"], "second");
}

// =============================================================================
// POST /api/v1/TaskItems - Create Task Item
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn create_task_item_returns_created_with_location() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/TaskItems",
            json!({"name": "buy milk", "isComplete": false}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/api/v1/TaskItems/1"
    );

    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({"id": 1, "name": "buy milk", "isComplete": false})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn create_task_item_ignores_client_id() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/TaskItems",
            json!({"id": 77, "name": "walk dog", "isComplete": true}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["isComplete"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_task_item_without_name() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/TaskItems",
            json!({"isComplete": false}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert!(body["name"].is_null());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_task_item_rejects_malformed_json() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/TaskItems")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// =============================================================================
// GET /api/v1/TaskItems/{id} - Get Task Item
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn get_task_item_not_found() {
    let app = test_app().await;

    let response = app
        .oneshot(empty_request("GET", "/api/v1/TaskItems/999"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_task_item_never_exposes_secret() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().unwrap();

    let mut item = TaskItem::new(Some("classified".to_string()), false);
    item.secret = Some("s3cr3t".to_string());
    let saved = db.task_items().save(&item).await.unwrap();

    let app = routes::create_router(AppState::new(db, SeededReferenceSource::from_seed(1)));

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/v1/TaskItems/{}", saved.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body.get("secret").is_none());
    assert!(body.get("version").is_none());

    let response = app
        .oneshot(empty_request("GET", "/api/v1/TaskItems"))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert!(body[0].get("secret").is_none());
}

// =============================================================================
// PUT /api/v1/TaskItems/{id} - Update Task Item
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn update_task_item_id_mismatch_is_bad_request() {
    let app = test_app().await;

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/TaskItems",
            json!({"name": "original", "isComplete": false}),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/TaskItems/1",
            json!({"id": 2, "name": "hijacked", "isComplete": true}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was mutated
    let response = app
        .oneshot(empty_request("GET", "/api/v1/TaskItems/1"))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["name"], "original");
    assert_eq!(body["isComplete"], false);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_task_item_missing_body_id_is_bad_request() {
    let app = test_app().await;

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/TaskItems",
            json!({"name": "original", "isComplete": false}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/v1/TaskItems/1",
            json!({"name": "no id", "isComplete": true}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_task_item_not_found() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/v1/TaskItems/5",
            json!({"id": 5, "name": "ghost", "isComplete": false}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_task_item_keeps_secret() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().unwrap();

    let mut item = TaskItem::new(Some("classified".to_string()), false);
    item.secret = Some("s3cr3t".to_string());
    let saved = db.task_items().save(&item).await.unwrap();

    let state = AppState::new(db, SeededReferenceSource::from_seed(1));
    let app = routes::create_router(state.clone());

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/TaskItems/{}", saved.id),
            json!({"id": saved.id, "name": "declassified", "isComplete": true, "secret": "overwritten"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let stored = state
        .db()
        .task_items()
        .find_by_id(saved.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name.as_deref(), Some("declassified"));
    assert!(stored.is_complete);
    assert_eq!(stored.secret.as_deref(), Some("s3cr3t"));
}

// =============================================================================
// DELETE /api/v1/TaskItems/{id} - Delete Task Item
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn delete_task_item_not_found() {
    let app = test_app().await;

    let response = app
        .oneshot(empty_request("DELETE", "/api/v1/TaskItems/3"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn non_numeric_id_is_rejected() {
    let app = test_app().await;

    let response = app
        .oneshot(empty_request("GET", "/api/v1/TaskItems/abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Full lifecycle
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn task_item_lifecycle() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/TaskItems",
            json!({"name": "buy milk", "isComplete": false}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(
        created,
        json!({"id": 1, "name": "buy milk", "isComplete": false})
    );

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/v1/TaskItems/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, created);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/TaskItems/1",
            json!({"id": 1, "name": "buy milk", "isComplete": true}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/v1/TaskItems/1"))
        .await
        .unwrap();
    assert_eq!(
        json_body(response).await,
        json!({"id": 1, "name": "buy milk", "isComplete": true})
    );

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/api/v1/TaskItems/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(empty_request("GET", "/api/v1/TaskItems/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Mapping
// =============================================================================

#[test]
fn dto_entity_dto_preserves_visible_fields() {
    let dto = TaskItemDto {
        id: 12,
        name: Some("water plants".to_string()),
        is_complete: true,
    };

    let entity = TaskItem::from(dto.clone());
    assert!(entity.secret.is_none());
    assert_eq!(TaskItemDto::from(entity), dto);
}

#[test]
fn dto_serializes_camel_case_without_secret() {
    let entity = TaskItem {
        id: 4,
        name: Some("file taxes".to_string()),
        is_complete: false,
        secret: Some("never".to_string()),
        version: 3,
    };

    let value = serde_json::to_value(TaskItemDto::from(entity)).unwrap();
    assert_eq!(
        value,
        json!({"id": 4, "name": "file taxes", "isComplete": false})
    );
}
