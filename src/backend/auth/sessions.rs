/**
 * Session Management and JWT Tokens
 *
 * Issues and verifies HS256 access tokens. The secret and lifetime come from
 * `ServerConfig`; one `SessionKeys` is built at startup and shared through
 * `AppState`.
 */

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::BackendError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, BackendError> {
        Uuid::parse_str(&self.sub).map_err(|_| BackendError::unauthorized("Invalid token subject"))
    }
}

/// Signing keys and token lifetime
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Create a token for a user
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, BackendError> {
        let now = Utc::now().timestamp().max(0) as u64;
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: now + self.ttl_secs,
            iat: now,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!("Failed to create token: {:?}", e);
            BackendError::internal("token encoding failed")
        })
    }

    /// Verify signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, BackendError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::warn!("Invalid token: {:?}", e.kind());
                BackendError::unauthorized("Invalid or expired token")
            })
    }
}
