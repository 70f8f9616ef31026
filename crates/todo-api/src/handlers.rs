use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{validate_create, validate_id, validate_update_request, Todo};
use serde::Serialize;

use crate::envelope::{self, ApiSuccess};
use crate::error::{ApiError, METHOD_NOT_ALLOWED_MESSAGE, ROUTE_NOT_FOUND_MESSAGE};
use crate::extract::{JsonBody, RawId};
use crate::AppState;

/// POST /api/todos
pub async fn create_todo(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<ApiSuccess<Todo>, ApiError> {
    let input = validate_create(&body).inspect_err(log_rejected)?;
    let todo = state.store().create(input.title);
    tracing::info!(todo_id = %todo.id, "todo created");
    Ok(ApiSuccess::created(todo))
}

/// GET /api/todos
pub async fn list_todos(State(state): State<AppState>) -> ApiSuccess<Vec<Todo>> {
    ApiSuccess::ok(state.store().list())
}

/// GET /api/todos/:id
pub async fn get_todo(
    State(state): State<AppState>,
    RawId(raw_id): RawId,
) -> Result<ApiSuccess<Todo>, ApiError> {
    let id = validate_id(&raw_id).inspect_err(log_rejected)?;
    match state.store().find_by_id(&id) {
        Some(todo) => Ok(ApiSuccess::ok(todo)),
        None => {
            tracing::debug!(todo_id = %id, "todo not found");
            Err(ApiError::todo_not_found())
        }
    }
}

/// PUT /api/todos/:id
pub async fn update_todo(
    State(state): State<AppState>,
    RawId(raw_id): RawId,
    JsonBody(body): JsonBody,
) -> Result<ApiSuccess<Todo>, ApiError> {
    let (id, patch) = validate_update_request(&raw_id, &body).inspect_err(log_rejected)?;
    match state.store().update(&id, &patch) {
        Some(todo) => {
            tracing::info!(
                todo_id = %todo.id,
                title_changed = patch.title.is_some(),
                completed = ?patch.completed,
                "todo updated"
            );
            Ok(ApiSuccess::ok(todo))
        }
        None => {
            tracing::debug!(todo_id = %id, "todo not found");
            Err(ApiError::todo_not_found())
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
}

/// ヘルスチェック（エンベロープなし）
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthBody { status: "ok" }))
}

/// 未定義のルート
pub async fn route_not_found() -> Response {
    envelope::fail(StatusCode::NOT_FOUND, ROUTE_NOT_FOUND_MESSAGE, None)
}

/// 既知のパスに対する未対応のメソッド
pub async fn method_not_allowed() -> Response {
    envelope::fail(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE, None)
}

fn log_rejected(errors: &domain::ValidationErrors) {
    tracing::debug!(error_count = errors.len(), "request rejected by validation");
}
