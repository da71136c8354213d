/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError` plus conversions from axum's extractor
 * rejections, so handlers can return `Result<_, BackendError>` and take
 * `ApiJson`/`ApiQuery` arguments whose failures share the same body shape.
 *
 * # Response Format
 *
 * ```text
 * {
 *   "error": "Title is required",
 *   "status": 400,
 *   "code": "VALIDATION_ERROR",
 *   "field": "title"
 * }
 * ```
 */

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::backend::error::types::BackendError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.message(),
            status: status.as_u16(),
            code: self.code(),
            field: self.field().map(str::to_string),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// `Json` extractor whose rejection is a `BackendError`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(BackendError))]
pub struct ApiJson<T>(pub T);

/// `Query` extractor whose rejection is a `BackendError`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(BackendError))]
pub struct ApiQuery<T>(pub T);

/// `Path` extractor whose rejection is a `BackendError`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(BackendError))]
pub struct ApiPath<T>(pub T);
