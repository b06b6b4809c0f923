//! Error handlers
//!
//! Converts `ApiError` into HTTP responses carrying the uniform JSON
//! error envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use serde::Serialize;

use crate::error::types::ApiError;

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub status: String,
}

/// Convert error to HTTP status code
pub fn error_to_status(err: &ApiError) -> StatusCode {
    match err {
        ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
        ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        ApiError::Conflict(_) => StatusCode::CONFLICT,
        ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Writes `message` as an error envelope with the given status
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        error: message.into(),
        status: status.canonical_reason().unwrap_or("Unknown").to_string(),
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = error_to_status(&self);
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("{}", self);
        }
        error_response(status, self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::PathError;
    use std::io;

    #[test]
    fn maps_every_variant_to_its_status() {
        let cases = [
            (ApiError::BadRequest("x".into()), 400),
            (ApiError::Forbidden("x".into()), 403),
            (ApiError::NotFound("x".into()), 404),
            (ApiError::MethodNotAllowed("x".into()), 405),
            (ApiError::Conflict("x".into()), 409),
            (ApiError::Internal("x".into()), 500),
        ];
        for (err, code) in cases {
            assert_eq!(error_to_status(&err).as_u16(), code);
        }
    }

    #[test]
    fn storage_errors_map_to_api_errors() {
        let err = ApiError::from(PathError::OutsideRoot);
        assert!(matches!(err, ApiError::Forbidden(ref msg) if msg == "invalid path"));

        let err = ApiError::from(StorageError::RootProtected);
        assert!(matches!(err, ApiError::Forbidden(_)));

        let err = ApiError::from(StorageError::AlreadyExists("a.txt".into()));
        assert!(matches!(err, ApiError::Conflict(_)));

        let err = ApiError::from(StorageError::NotFound("/missing".into()));
        assert!(matches!(err, ApiError::NotFound(_)));

        // A file vanishing mid-operation is still an internal failure.
        let err = ApiError::from(StorageError::IoError(io::Error::from(
            io::ErrorKind::NotFound,
        )));
        assert!(matches!(err, ApiError::Internal(_)));

        let err = ApiError::from(StorageError::IoError(io::Error::from(
            io::ErrorKind::PermissionDenied,
        )));
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn envelope_uses_canonical_status_text() {
        let response = ApiError::Conflict("file already exists".into()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = ErrorBody {
            error: "file already exists".into(),
            status: StatusCode::CONFLICT.canonical_reason().unwrap().into(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"error": "file already exists", "status": "Conflict"})
        );
    }
}
