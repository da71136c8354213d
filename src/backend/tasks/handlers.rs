//! HTTP handlers for `/tasks`

use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::error::{ApiJson, ApiPath, ApiQuery, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::store::Store;
use crate::backend::tasks::service;
use crate::shared::response::SuccessResponse;
use crate::shared::task::{CreateTaskRequest, MoveTaskRequest, Task, TaskQuery, UpdateTaskRequest};

/// POST /tasks
pub async fn create_task(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiJson(request): ApiJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), BackendError> {
    let task = service::create_task(store.as_ref(), user.id(), request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /tasks
pub async fn search_tasks(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<TaskQuery>,
) -> Result<Json<Vec<Task>>, BackendError> {
    Ok(Json(service::search_tasks(store.as_ref(), user.id(), query).await?))
}

/// GET /tasks/{id}
pub async fn get_task(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Task>, BackendError> {
    Ok(Json(service::get_task(store.as_ref(), user.id(), id).await?))
}

/// PATCH /tasks/{id}
pub async fn update_task(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateTaskRequest>,
) -> Result<Json<Task>, BackendError> {
    Ok(Json(service::update_task(store.as_ref(), user.id(), id, request).await?))
}

/// PATCH /tasks/{id}/move
pub async fn move_task(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<MoveTaskRequest>,
) -> Result<Json<Task>, BackendError> {
    Ok(Json(service::move_task(store.as_ref(), user.id(), id, request).await?))
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SuccessResponse>, BackendError> {
    service::delete_task(store.as_ref(), user.id(), id).await?;
    Ok(Json(SuccessResponse::ok()))
}
