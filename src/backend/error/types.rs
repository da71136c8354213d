/**
 * Backend Error Types
 *
 * Errors returned by HTTP handlers. Every lower-layer error converts into
 * `BackendError` with `?`, and each variant maps to one status code.
 *
 * # Status Mapping
 *
 * - `Validation` / `BadRequest` / `OutOfRange` - 400
 * - `Unauthorized` - 401
 * - `Forbidden` - 403
 * - `NotFound` - 404
 * - `Conflict` - 409
 * - `Internal` - 500, the detail is logged but not returned
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::ordering::OrderingError;
use crate::backend::store::StoreError;
use crate::shared::SharedError;

#[derive(Debug, Error)]
pub enum BackendError {
    /// Request field failed validation
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// Malformed request body, path or query
    #[error("{0}")]
    BadRequest(String),

    /// Requested position lies outside the allowed range
    #[error("{0}")]
    OutOfRange(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Duplicate value or concurrent modification
    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BackendError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) | Self::OutOfRange(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code for the response body
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::OutOfRange(_) => "POSITION_OUT_OF_RANGE",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message shown to the client
    pub fn message(&self) -> String {
        match self {
            Self::Validation(err) => err.message(),
            Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Offending field, for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation(err) => err.field(),
            _ => None,
        }
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(field) => Self::Conflict(format!("A user with this {} already exists", field)),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<OrderingError> for BackendError {
    fn from(err: OrderingError) -> Self {
        match err {
            OrderingError::ParentNotFound { .. } | OrderingError::ChildNotFound { .. } => {
                Self::NotFound(err.to_string())
            }
            OrderingError::OutOfRange { .. } => Self::OutOfRange(err.to_string()),
            OrderingError::Conflict { .. } => Self::Conflict(err.to_string()),
            OrderingError::Store(store) => store.into(),
        }
    }
}
