use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use classlog_api_types::ErrorResponse;

use crate::repository::StoreError;

/// Terminal error for GET views and path-id lookups. Write handlers recover
/// into flash redirects instead; only not-found and unexpected read failures
/// end up here.
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Duplicate | StoreError::Db(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "not_found",
                "record not found".to_string(),
            ),
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };

        let body = Json(ErrorResponse {
            code: code.to_string(),
            message,
        });
        (status, body).into_response()
    }
}
