//! Route handlers for the file browser.
//!
//! Each handler validates its `path` parameter, confines it beneath the
//! storage root, performs a single filesystem action and shapes the
//! response. Errors are returned as [`ApiError`] and rendered as the
//! uniform JSON envelope.

use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use log::info;

use crate::error::{ApiError, StorageError};
use crate::protocol::requests::{PathParams, form_path, query_path};
use crate::protocol::responses::{
    ApiStatus, DELETE_SUCCESS_MESSAGE, UPLOAD_SUCCESS_MESSAGE, json_response,
};
use crate::server::AppState;
use crate::storage::{
    DeleteResult, ResolvedPath, UploadResult, delete_path, ensure_directory, list_directory,
    stat_path,
};
use crate::transfer::{UploadFile, download_body, open_download};
use crate::utils::require_path;

/// Handles `GET /api`: reports that the service is up.
pub async fn handle_api() -> Result<Response, ApiError> {
    json_response(&ApiStatus::default())
}

/// Handles `GET /list`: lists one directory level.
///
/// Any failure to open the directory (missing, not a directory, no
/// permission) is a 404.
pub async fn handle_list(
    State(state): State<AppState>,
    query: Result<Query<PathParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let raw = query_path(query)?;
    let path = require_path(raw.as_deref())?;
    let dir = state.root.resolve(path)?;

    let entries = list_directory(&dir).await.map_err(|e| match e {
        StorageError::NotFound(msg) => {
            ApiError::NotFound(format!("directory not found or inaccessible: {}", msg))
        }
        other => ApiError::from(other),
    })?;

    json_response(&entries)
}

/// Handles `GET /stat`: metadata of a single file or folder.
pub async fn handle_stat(
    State(state): State<AppState>,
    query: Result<Query<PathParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let raw = query_path(query)?;
    let path = require_path(raw.as_deref())?;
    let target = state.root.resolve(path)?;

    let stat = stat_path(&target).await?;
    json_response(&stat)
}

/// Handles `POST /upload`: stores one multipart `file` part under the
/// directory named by the `path` field.
///
/// The `path` field must precede the file part (or be given in the query
/// string) so the target can be resolved and created before any file data
/// is read. The destination directory is created if needed, the filename
/// must be a single plain component resolved again beneath the root, and
/// an existing target is never overwritten. File data is written to disk
/// chunk by chunk.
pub async fn handle_upload(
    State(state): State<AppState>,
    query: Result<Query<PathParams>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let mut multipart =
        multipart.map_err(|e| ApiError::BadRequest(format!("failed to parse form: {}", e)))?;
    let query_value = query_path(query)?;

    let mut form_path_value: Option<String> = None;
    let mut stored: Option<(String, ResolvedPath, u64)> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("failed to parse form: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("path") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("failed to parse form: {}", e)))?;
                form_path_value = Some(value);
            }
            Some("file") => {
                let raw = form_path_value.as_deref().or(query_value.as_deref());
                let path = require_path(raw)?;
                let dir = state.root.resolve(path)?;

                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|name| !name.trim().is_empty())
                    .ok_or_else(|| {
                        ApiError::BadRequest("failed to get file: missing filename".into())
                    })?;
                let target = state.root.resolve_child(&dir, &filename)?;

                ensure_directory(&dir).await?;
                let upload = UploadFile::create(&target, state.max_upload_bytes).await?;
                let size = receive_file(&mut field, upload).await?;

                stored = Some((filename, dir, size));
                break;
            }
            _ => {}
        }
    }

    let Some((filename, dir, size)) = stored else {
        let raw = form_path_value.as_deref().or(query_value.as_deref());
        state.root.resolve(require_path(raw)?)?;
        return Err(ApiError::BadRequest("failed to get file: no 'file' part in form".into()));
    };

    info!("Uploaded {} to /{} ({} bytes)", filename, dir.relative(), size);

    json_response(&UploadResult {
        message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        filename,
        size,
    })
}

/// Handles `GET /download`: streams a file as an attachment.
pub async fn handle_download(
    State(state): State<AppState>,
    query: Result<Query<PathParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let raw = query_path(query)?;
    let path = require_path(raw.as_deref())?;
    let target = state.root.resolve(path)?;

    let (file, length) = open_download(&target).await?;

    let filename = target.file_name().unwrap_or("download").replace('"', "");
    let value = format!("attachment; filename=\"{}\"", filename);
    let disposition = HeaderValue::from_bytes(value.as_bytes())
        .map_err(|_| ApiError::Internal("failed to build response headers".into()))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_DISPOSITION, disposition),
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/octet-stream"),
            ),
            (header::CONTENT_LENGTH, HeaderValue::from(length)),
        ],
        download_body(file),
    )
        .into_response())
}

/// Handles `POST /delete`: removes a file, or a folder recursively.
///
/// `path` is read from a urlencoded or multipart body, then the query string.
pub async fn handle_delete(
    State(state): State<AppState>,
    query: Result<Query<PathParams>, QueryRejection>,
    request: Request,
) -> Result<Response, ApiError> {
    let raw = form_path(query, request, &state).await?;
    let path = require_path(raw.as_deref())?;
    let target = state.root.resolve(path)?;

    delete_path(&target).await?;

    json_response(&DeleteResult {
        message: DELETE_SUCCESS_MESSAGE.to_string(),
        path: target.display().to_string(),
    })
}

/// Fallback for read-only routes called with another verb
pub async fn method_not_allowed_get() -> ApiError {
    ApiError::MethodNotAllowed("method not allowed, use GET".into())
}

/// Fallback for mutating routes called with another verb
pub async fn method_not_allowed_post() -> ApiError {
    ApiError::MethodNotAllowed("method not allowed, use POST".into())
}

// Streams a file part into `upload`, removing the partial file on any error.
async fn receive_file(field: &mut Field<'_>, mut upload: UploadFile) -> Result<u64, ApiError> {
    loop {
        let chunk = match field.chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => {
                upload.abort().await;
                return Err(ApiError::BadRequest(format!("failed to get file: {}", e)));
            }
        };
        if let Err(e) = upload.write_chunk(&chunk).await {
            upload.abort().await;
            return Err(e.into());
        }
    }
    Ok(upload.finish().await?)
}
