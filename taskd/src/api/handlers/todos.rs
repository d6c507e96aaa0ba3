//! Owner-gated todo CRUD handlers.
//!
//! Every handler resolves the caller through the bearer-token extractor
//! first. Reads are scoped to the caller unless `todos.scope_reads` is
//! disabled; writes are always scoped. A todo owned by someone else produces
//! the same 404 as one that does not exist.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{
        todos::{TodoCreate, TodoResponse, TodoUpdate},
        users::CurrentUser,
    },
    db::{
        errors::DbError,
        handlers::{OwnedRepository, Todos},
        models::todos::TodoUpdateDBRequest,
    },
    errors::Error,
    types::TodoId,
};

fn todo_not_found(id: TodoId) -> Error {
    Error::NotFound {
        resource: "todo".to_string(),
        id: id.to_string(),
    }
}

/// Create a todo owned by the caller
#[utoipa::path(
    post,
    path = "/todos/",
    request_body = TodoCreate,
    tag = "todos",
    security(("bearer_token" = [])),
    responses(
        (status = 201, description = "Todo created", body = TodoResponse),
        (status = 401, description = "Missing, invalid, or expired token"),
    )
)]
#[tracing::instrument(skip_all, fields(user_id = user.id))]
pub async fn create_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<TodoCreate>,
) -> Result<(StatusCode, Json<TodoResponse>), Error> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let todo = Todos::new(&mut conn).create(user.id, &request.into()).await?;

    Ok((StatusCode::CREATED, Json(todo.into())))
}

/// List todos
#[utoipa::path(
    get,
    path = "/todos/",
    tag = "todos",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Todos visible to the caller", body = [TodoResponse]),
        (status = 401, description = "Missing, invalid, or expired token"),
    )
)]
#[tracing::instrument(skip_all, fields(user_id = user.id))]
pub async fn list_todos(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<TodoResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let mut repo = Todos::new(&mut conn);

    let todos = if state.config.todos.scope_reads {
        repo.list(user.id).await?
    } else {
        repo.list_all().await?
    };

    Ok(Json(todos.into_iter().map(Into::into).collect()))
}

/// Get a single todo by id
#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "todos",
    security(("bearer_token" = [])),
    params(("id" = i64, Path, description = "Todo id")),
    responses(
        (status = 200, description = "The todo", body = TodoResponse),
        (status = 404, description = "No such todo visible to the caller"),
    )
)]
#[tracing::instrument(skip_all, fields(user_id = user.id, todo_id = id))]
pub async fn get_todo(State(state): State<AppState>, user: CurrentUser, Path(id): Path<TodoId>) -> Result<Json<TodoResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let mut repo = Todos::new(&mut conn);

    let todo = if state.config.todos.scope_reads {
        repo.get(user.id, id).await?
    } else {
        repo.get_any(id).await?
    };

    todo.map(|t| Json(t.into())).ok_or_else(|| todo_not_found(id))
}

/// Overwrite a todo's title, description, and completed flag
#[utoipa::path(
    put,
    path = "/todos/{id}",
    request_body = TodoUpdate,
    tag = "todos",
    security(("bearer_token" = [])),
    params(("id" = i64, Path, description = "Todo id")),
    responses(
        (status = 200, description = "The updated todo", body = TodoResponse),
        (status = 404, description = "No such todo owned by the caller"),
    )
)]
#[tracing::instrument(skip_all, fields(user_id = user.id, todo_id = id))]
pub async fn update_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<TodoId>,
    Json(request): Json<TodoUpdate>,
) -> Result<Json<TodoResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let request: TodoUpdateDBRequest = request.into();

    let updated = Todos::new(&mut conn).update(user.id, id, &request).await?;

    updated.map(|t| Json(t.into())).ok_or_else(|| todo_not_found(id))
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    security(("bearer_token" = [])),
    params(("id" = i64, Path, description = "Todo id")),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 404, description = "No such todo owned by the caller"),
    )
)]
#[tracing::instrument(skip_all, fields(user_id = user.id, todo_id = id))]
pub async fn delete_todo(State(state): State<AppState>, user: CurrentUser, Path(id): Path<TodoId>) -> Result<StatusCode, Error> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;

    let removed = Todos::new(&mut conn).delete(user.id, id).await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(todo_not_found(id))
    }
}
