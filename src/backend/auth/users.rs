/**
 * Account Helpers
 *
 * Password hashing and email normalisation shared by registration, login
 * and profile updates. Hashing runs on the blocking pool since bcrypt is
 * deliberately slow.
 */

use crate::backend::error::BackendError;

/// Emails are stored trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn hash_password(password: &str, cost: u32) -> Result<String, BackendError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| BackendError::internal(format!("hashing task failed: {}", e)))?
        .map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            BackendError::internal("password hashing failed")
        })
}

/// `false` for a mismatch or an unreadable hash
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, BackendError> {
    let password = password.to_string();
    let hash = hash.to_string();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| BackendError::internal(format!("hashing task failed: {}", e)))?;
    Ok(verified.unwrap_or_else(|e| {
        tracing::warn!("Stored password hash could not be verified: {:?}", e);
        false
    }))
}
