//! Logging middleware
//!
//! Provides request logging functionality.

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use log::{Level, log};
use std::time::Instant;

/// Logs method, URI, status and elapsed time of every request
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    log!(
        level_for_status(status),
        "{} {} -> {} ({:?})",
        method,
        uri,
        status.as_u16(),
        started.elapsed()
    );

    response
}

/// Server failures log at error, client errors at warn
pub fn level_for_status(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::Error
    } else if status.is_client_error() {
        Level::Warn
    } else {
        Level::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_follows_status_class() {
        assert_eq!(level_for_status(StatusCode::OK), Level::Info);
        assert_eq!(level_for_status(StatusCode::FOUND), Level::Info);
        assert_eq!(level_for_status(StatusCode::NOT_FOUND), Level::Warn);
        assert_eq!(level_for_status(StatusCode::CONFLICT), Level::Warn);
        assert_eq!(
            level_for_status(StatusCode::INTERNAL_SERVER_ERROR),
            Level::Error
        );
    }
}
