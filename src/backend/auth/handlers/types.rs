/**
 * Authentication Handler Types
 *
 * Request and response bodies for register, login and me.
 */

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::user::{check_name, check_password, UserResponse};
use crate::shared::validation::check_email;

/// Register request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    /// Plain password, hashed before storage
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        check_name(self.name.trim())?;
        check_email(self.email.trim())?;
        check_password(&self.password)
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        check_email(self.email.trim())?;
        if self.password.is_empty() {
            return Err(SharedError::validation("password", "Password is required"));
        }
        Ok(())
    }
}

/// Returned by register and login
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserResponse,
}
