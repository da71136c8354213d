//! User Data Structure
//!
//! The stored user record and the request used to edit a profile.
//! Registration and login bodies live with the auth handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::validation::{check_email, check_length, MAX_TITLE_LEN};

/// Minimum password length accepted at registration and on update
pub const MIN_PASSWORD_LEN: usize = 6;

/// Maximum password length (bcrypt only looks at the first 72 bytes)
pub const MAX_PASSWORD_LEN: usize = 72;

/// User record as stored
///
/// Not serializable on purpose: responses go through `UserResponse`,
/// which leaves out the password hash.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Request body for `PATCH /users/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if let Some(name) = &self.name {
            check_name(name)?;
        }
        if let Some(email) = &self.email {
            check_email(email)?;
        }
        if let Some(password) = &self.password {
            check_password(password)?;
        }
        Ok(())
    }
}

/// Display names: 2..=100 characters
pub fn check_name(name: &str) -> Result<(), SharedError> {
    check_length("name", name, 2, MAX_TITLE_LEN)
}

pub fn check_password(password: &str) -> Result<(), SharedError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at most {} bytes", MAX_PASSWORD_LEN),
        ));
    }
    Ok(())
}

/// Changes applied by the store on update; the password is already hashed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}
