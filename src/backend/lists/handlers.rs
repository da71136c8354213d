//! HTTP handlers for `/lists`

use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::error::{ApiJson, ApiPath, ApiQuery, BackendError};
use crate::backend::lists::service;
use crate::backend::middleware::AuthUser;
use crate::backend::store::Store;
use crate::shared::list::{CreateListRequest, List, ListQuery, MoveListRequest, UpdateListRequest};
use crate::shared::response::SuccessResponse;

/// POST /lists
pub async fn create_list(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiJson(request): ApiJson<CreateListRequest>,
) -> Result<(StatusCode, Json<List>), BackendError> {
    let list = service::create_list(store.as_ref(), user.id(), request).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

/// GET /lists
pub async fn search_lists(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Vec<List>>, BackendError> {
    Ok(Json(service::search_lists(store.as_ref(), user.id(), query).await?))
}

/// GET /lists/{id}
pub async fn get_list(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<List>, BackendError> {
    Ok(Json(service::get_list(store.as_ref(), user.id(), id).await?))
}

/// PATCH /lists/{id}
pub async fn update_list(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateListRequest>,
) -> Result<Json<List>, BackendError> {
    Ok(Json(service::update_list(store.as_ref(), user.id(), id, request).await?))
}

/// PATCH /lists/{id}/move
pub async fn move_list(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<MoveListRequest>,
) -> Result<Json<List>, BackendError> {
    Ok(Json(service::move_list(store.as_ref(), user.id(), id, request).await?))
}

/// DELETE /lists/{id}
pub async fn delete_list(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SuccessResponse>, BackendError> {
    service::delete_list(store.as_ref(), user.id(), id).await?;
    Ok(Json(SuccessResponse::ok()))
}
