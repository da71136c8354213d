/**
 * Login Handler
 *
 * POST /auth/login
 *
 * An unknown email and a wrong password produce the same 401 so the
 * response does not reveal which accounts exist.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::users::{normalize_email, verify_password};
use crate::backend::error::{ApiJson, BackendError};
use crate::backend::server::state::AppState;
use crate::shared::user::UserResponse;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    request.validate()?;
    let email = normalize_email(&request.email);

    let Some(user) = state.store.find_user_by_email(&email).await? else {
        tracing::warn!("Login for unknown email");
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(&request.password, &user.password_hash).await? {
        tracing::warn!(user_id = %user.id, "Login with wrong password");
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let access_token = state.sessions.issue(user.id, &user.email)?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        access_token,
        user: UserResponse::from(user),
    }))
}
