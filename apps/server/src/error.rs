//! API error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use billfold_core::errors::{DatabaseError, Error, ValidationError};

pub type ApiResult<T> = Result<T, ApiError>;

/// Wrapper turning core errors into HTTP responses with a definitive status
/// and message.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError(Error::Validation(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
            Error::Database(DatabaseError::UniqueViolation(_)) => StatusCode::CONFLICT,
            Error::Channel(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("API error: {}", self.0);
        }
        (status, Json(json!({ "message": self.0.to_string() }))).into_response()
    }
}
