//! HTTP handlers for `/boards`

use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::boards::service;
use crate::backend::error::{ApiJson, ApiPath, ApiQuery, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::store::Store;
use crate::shared::board::{Board, BoardQuery, CreateBoardRequest, UpdateBoardRequest};
use crate::shared::list::ListWithTasks;
use crate::shared::response::SuccessResponse;

/// POST /boards
pub async fn create_board(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiJson(request): ApiJson<CreateBoardRequest>,
) -> Result<(StatusCode, Json<Board>), BackendError> {
    let board = service::create_board(store.as_ref(), user.id(), request).await?;
    Ok((StatusCode::CREATED, Json(board)))
}

/// GET /boards
pub async fn search_boards(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<BoardQuery>,
) -> Result<Json<Vec<Board>>, BackendError> {
    Ok(Json(service::search_boards(store.as_ref(), user.id(), query).await?))
}

/// GET /boards/{id}
pub async fn get_board(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Board>, BackendError> {
    Ok(Json(service::get_board(store.as_ref(), user.id(), id).await?))
}

/// GET /boards/{id}/lists
pub async fn board_lists(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vec<ListWithTasks>>, BackendError> {
    Ok(Json(service::board_lists(store.as_ref(), user.id(), id).await?))
}

/// PATCH /boards/{id}
pub async fn update_board(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateBoardRequest>,
) -> Result<Json<Board>, BackendError> {
    Ok(Json(service::update_board(store.as_ref(), user.id(), id, request).await?))
}

/// DELETE /boards/{id}
pub async fn delete_board(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SuccessResponse>, BackendError> {
    service::delete_board(store.as_ref(), user.id(), id).await?;
    Ok(Json(SuccessResponse::ok()))
}
