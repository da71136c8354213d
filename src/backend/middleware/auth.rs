/**
 * Authentication Middleware
 *
 * Protects every board, list, task and user route. The bearer token is
 * verified, the user it names must still exist, and the result is stored in
 * the request extensions for the `AuthUser` extractor.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from the token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let claims = {
        let token = bearer_token(&request)?;
        app_state.sessions.verify(token)?
    };
    let user_id = claims.user_id()?;

    if app_state.store.find_user(user_id).await?.is_none() {
        tracing::warn!(%user_id, "Token refers to a deleted user");
        return Err(BackendError::unauthorized("User no longer exists"));
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
    });
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Result<&str, BackendError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized("Missing Authorization header")
        })?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            BackendError::unauthorized("Authorization header must be a bearer token")
        })
}

/// Extractor for the user set by `auth_middleware`
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.user_id
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Not authenticated")
            })
    }
}
