use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use models::todo::{Model as Todo, TodoPatch};
use service::pagination::Listing;
use service::todo::CreateTodo;

use crate::errors::ApiError;
use crate::extract::{query_params, RequiredJson};
use crate::state::ServerState;

type RawQuery = Query<Vec<(String, String)>>;

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: u64,
}

#[utoipa::path(
    post, path = "/v1/todo", tag = "todo",
    request_body = crate::openapi::CreateTodoDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::TodoDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Create Failed", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    RequiredJson(input): RequiredJson<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = state.todos.create(input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

#[utoipa::path(
    get, path = "/v1/todo", tag = "todo",
    params(
        ("page" = Option<u64>, Query, description = "1-based page, default 1"),
        ("per_page" = Option<u64>, Query, description = "page size, 1..=100"),
        ("itemized" = Option<bool>, Query, description = "return every match without paging"),
        ("title" = Option<String>, Query, description = "exact title"),
        ("completed" = Option<bool>, Query, description = "completion state")
    ),
    responses(
        (status = 200, description = "List OK", body = crate::openapi::TodoListingDoc),
        (status = 500, description = "List Failed", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn list(State(state): State<ServerState>, query: RawQuery) -> Result<Json<Listing<Todo>>, ApiError> {
    let params = query_params(query);
    let listing = state.todos.get_all(params.as_ref()).await?;
    Ok(Json(listing))
}

#[utoipa::path(
    delete, path = "/v1/todo", tag = "todo",
    params(
        ("title" = Option<String>, Query, description = "exact title"),
        ("completed" = Option<bool>, Query, description = "completion state")
    ),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::DeletedCountDoc),
        (status = 400, description = "Query parameters are required", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn delete_all(State(state): State<ServerState>, query: RawQuery) -> Result<Json<Deleted>, ApiError> {
    let params = query_params(query);
    let deleted = state.todos.delete_all(params.as_ref()).await?;
    info!(deleted, "bulk delete");
    Ok(Json(Deleted { deleted }))
}

#[utoipa::path(
    get, path = "/v1/todo/{id}", tag = "todo",
    params(("id" = i32, Path, description = "todo id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::TodoDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn retrieve(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Todo>, ApiError> {
    Ok(Json(state.todos.get(id).await?))
}

#[utoipa::path(
    patch, path = "/v1/todo/{id}", tag = "todo",
    params(("id" = i32, Path, description = "todo id")),
    request_body = crate::openapi::UpdateTodoDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::TodoDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    RequiredJson(patch): RequiredJson<TodoPatch>,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(state.todos.update(id, patch).await?))
}

#[utoipa::path(
    delete, path = "/v1/todo/{id}", tag = "todo",
    params(("id" = i32, Path, description = "todo id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    state.todos.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
