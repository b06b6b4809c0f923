//! Error types
//!
//! Defines the storage-layer and HTTP-layer error types of the file browser.

use std::fmt;
use std::io;

use crate::storage::PathError;

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    NotFound(String),
    AlreadyExists(String),
    NotAFile(String),
    RootProtected,
    FileTooLarge(u64),
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(p) => write!(f, "file or folder not found: {}", p),
            StorageError::AlreadyExists(p) => write!(f, "file already exists: {}", p),
            StorageError::NotAFile(p) => write!(f, "not a file: {}", p),
            StorageError::RootProtected => write!(f, "the root directory cannot be removed"),
            StorageError::FileTooLarge(limit) => {
                write!(f, "file exceeds maximum upload size of {} bytes", limit)
            }
            StorageError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors surfaced to HTTP clients.
///
/// Each variant corresponds to exactly one status code and is rendered as
/// the uniform `{"error", "status"}` envelope.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed request input (400)
    BadRequest(String),
    /// Path refused by confinement (403)
    Forbidden(String),
    /// Target does not exist (404)
    NotFound(String),
    /// Route called with the wrong verb (405)
    MethodNotAllowed(String),
    /// Upload target already exists (409)
    Conflict(String),
    /// Serialization or I/O failure mid-operation (500)
    Internal(String),
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::MethodNotAllowed(msg)
            | ApiError::Conflict(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::MethodNotAllowed(msg) => write!(f, "Method not allowed: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PathError> for ApiError {
    fn from(error: PathError) -> Self {
        ApiError::Forbidden(error.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound(_) => ApiError::NotFound(error.to_string()),
            StorageError::AlreadyExists(_) => ApiError::Conflict("file already exists".into()),
            StorageError::NotAFile(_) => ApiError::BadRequest(error.to_string()),
            StorageError::RootProtected => ApiError::Forbidden(error.to_string()),
            StorageError::FileTooLarge(_) => ApiError::BadRequest(error.to_string()),
            // Missing targets and collisions have their own variants.
            StorageError::IoError(e) => ApiError::Internal(e.to_string()),
        }
    }
}
