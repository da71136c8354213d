//! GET /auth/me

use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::store::Store;
use crate::shared::user::UserResponse;

/// Profile of the caller
pub async fn get_me(
    State(store): State<Arc<dyn Store>>,
    user: AuthUser,
) -> Result<Json<UserResponse>, BackendError> {
    let user = store
        .find_user(user.id())
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;
    Ok(Json(UserResponse::from(user)))
}
