//! Request parameter types
//!
//! Raw, untrusted inputs extracted from query strings and form bodies.

use axum::Form;
use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequest, Multipart, Query, Request};
use axum::http::header;
use serde::Deserialize;

use crate::error::ApiError;

/// The `path` parameter shared by every file route
#[derive(Debug, Default, Deserialize)]
pub struct PathParams {
    #[serde(default)]
    pub path: Option<String>,
}

/// Takes `path` from the query string
pub fn query_path(
    query: Result<Query<PathParams>, QueryRejection>,
) -> Result<Option<String>, ApiError> {
    let Query(params) = query
        .map_err(|e| ApiError::BadRequest(format!("failed to parse query string: {}", e)))?;
    Ok(params.path)
}

/// Takes `path` from a urlencoded or multipart body, falling back to the
/// query string
pub async fn form_path<S>(
    query: Result<Query<PathParams>, QueryRejection>,
    request: Request,
    state: &S,
) -> Result<Option<String>, ApiError>
where
    S: Send + Sync,
{
    let from_body = if is_multipart(&request) {
        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed to parse form: {}", e)))?;
        multipart_text(&mut multipart, "path").await?
    } else {
        match Form::<PathParams>::from_request(request, state).await {
            Ok(Form(params)) => params.path,
            Err(_) => None,
        }
    };

    match from_body {
        Some(path) => Ok(Some(path)),
        None => query_path(query),
    }
}

/// Reads the first text field called `name`, skipping any others
async fn multipart_text(
    multipart: &mut Multipart,
    name: &str,
) -> Result<Option<String>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("failed to parse form: {}", e)))?
    {
        if field.name() == Some(name) {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::BadRequest(format!("failed to parse form: {}", e)))?;
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}
