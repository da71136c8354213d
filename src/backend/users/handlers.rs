//! HTTP handlers for `/users`

use axum::{extract::State, response::Json};
use uuid::Uuid;

use crate::backend::auth::users::{hash_password, normalize_email};
use crate::backend::error::{ApiJson, ApiPath, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::response::SuccessResponse;
use crate::shared::user::{UpdateUserRequest, UserChanges, UserResponse};

fn ensure_self(user: &AuthUser, id: Uuid) -> Result<(), BackendError> {
    if user.id() != id {
        tracing::warn!(caller = %user.id(), target = %id, "Attempt to modify another user");
        return Err(BackendError::forbidden("You can only modify your own account"));
    }
    Ok(())
}

/// GET /users
pub async fn list_users(State(state): State<AppState>, _user: AuthUser) -> Result<Json<Vec<UserResponse>>, BackendError> {
    let users = state.store.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/me
pub async fn current_user(State(state): State<AppState>, user: AuthUser) -> Result<Json<UserResponse>, BackendError> {
    get_user(State(state), user.clone(), ApiPath(user.id())).await
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<UserResponse>, BackendError> {
    let user = state
        .store
        .find_user(id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("User {} not found", id)))?;
    Ok(Json(UserResponse::from(user)))
}

/// PATCH /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, BackendError> {
    ensure_self(&user, id)?;
    request.validate()?;

    let password_hash = match &request.password {
        Some(password) => Some(hash_password(password, state.config.bcrypt_cost).await?),
        None => None,
    };
    let changes = UserChanges {
        name: request.name.map(|n| n.trim().to_string()),
        email: request.email.as_deref().map(normalize_email),
        password_hash,
    };

    let updated = state
        .store
        .update_user(id, changes)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("User {} not found", id)))?;
    tracing::info!(user_id = %id, "User updated");
    Ok(Json(UserResponse::from(updated)))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SuccessResponse>, BackendError> {
    ensure_self(&user, id)?;
    if !state.store.delete_user(id).await? {
        return Err(BackendError::not_found(format!("User {} not found", id)));
    }
    tracing::info!(user_id = %id, "User deleted");
    Ok(Json(SuccessResponse::ok()))
}
