//! Conversion of core errors into HTTP responses.
//!
//! Every handler returns `ApiResult`; no core error crosses the API
//! boundary unmapped. Unexpected failures produce a generic body and the
//! detail is logged server-side only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use giftwise_core::errors::{DatabaseError, Error};

pub type ApiResult<T> = Result<T, ApiError>;

pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError(Error::Unexpected(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Error::ConstraintViolation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::Database(DatabaseError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, msg.clone())
            }
            Error::Database(DatabaseError::ForeignKeyViolation(_)) => (
                StatusCode::BAD_REQUEST,
                "Referenced record does not exist".to_string(),
            ),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            other => {
                tracing::error!("Internal error: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
