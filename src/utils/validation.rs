//! Input validation utilities
//!
//! Checks raw request parameters before they reach the path resolver.

use crate::error::ApiError;

/// Validate that input is not empty and doesn't contain dangerous characters
pub fn is_valid_input(input: &str) -> bool {
    !input.trim().is_empty()
        && input.len() <= 4096
        && !input.contains('\0')
        && !input.contains('\r')
        && !input.contains('\n')
}

/// Extracts a required `path` parameter.
///
/// Missing or blank values and values with control characters are
/// rejected with 400 before any path resolution happens.
pub fn require_path(path: Option<&str>) -> Result<&str, ApiError> {
    match path {
        Some(path) if !path.trim().is_empty() => {
            if is_valid_input(path) {
                Ok(path)
            } else {
                Err(ApiError::BadRequest("invalid 'path' parameter".into()))
            }
        }
        _ => Err(ApiError::BadRequest("missing 'path' parameter".into())),
    }
}
