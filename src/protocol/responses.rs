//! Response shaping
//!
//! Success envelopes and JSON serialization for the HTTP routes.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::ApiError;

pub const API_MESSAGE: &str = "API Response";
pub const API_STATUS_SUCCESS: &str = "Success";
pub const UPLOAD_SUCCESS_MESSAGE: &str = "file uploaded successfully";
pub const DELETE_SUCCESS_MESSAGE: &str = "deleted successfully";

/// Body of the `/api` health response
#[derive(Debug, Serialize)]
pub struct ApiStatus {
    pub message: &'static str,
    pub status: &'static str,
}

impl Default for ApiStatus {
    fn default() -> Self {
        Self {
            message: API_MESSAGE,
            status: API_STATUS_SUCCESS,
        }
    }
}

/// Serializes `value` as a 200 JSON response.
///
/// Serialization failures surface as an internal error envelope instead
/// of a bare 500.
pub fn json_response<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value)
        .map_err(|e| ApiError::Internal(format!("failed to convert into JSON: {}", e)))?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
