/**
 * Register Handler
 *
 * POST /auth/register
 *
 * 1. Validate name, email and password
 * 2. Reject an email that is already registered (409)
 * 3. Hash the password with the configured bcrypt cost
 * 4. Create the user and return a token for immediate use
 *
 * # Example Request
 *
 * ```text
 * POST /auth/register HTTP/1.1
 * Content-Type: application/json
 *
 * { "name": "Ana", "email": "ana@example.com", "password": "secret1" }
 * ```
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::backend::auth::users::{hash_password, normalize_email};
use crate::backend::error::{ApiJson, BackendError};
use crate::backend::server::state::AppState;
use crate::backend::store::NewUser;
use crate::shared::user::UserResponse;

pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    request.validate()?;
    let email = normalize_email(&request.email);
    tracing::info!("Register request for {}", email);

    if state.store.find_user_by_email(&email).await?.is_some() {
        tracing::warn!("Email already registered: {}", email);
        return Err(BackendError::conflict("Email already registered"));
    }

    let password_hash = hash_password(&request.password, state.config.bcrypt_cost).await?;
    let user = state
        .store
        .insert_user(NewUser {
            name: request.name.trim().to_string(),
            email,
            password_hash,
        })
        .await?;

    let access_token = state.sessions.issue(user.id, &user.email)?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            access_token,
            user: UserResponse::from(user),
        }),
    ))
}
