//! HTTP protocol implementation
//!
//! Handles request parameter extraction, route handlers and response shaping.

pub mod handlers;
pub mod requests;
pub mod responses;

pub use handlers::{
    handle_api, handle_delete, handle_download, handle_list, handle_stat, handle_upload,
    method_not_allowed_get, method_not_allowed_post,
};
pub use requests::PathParams;
pub use responses::{ApiStatus, json_response};
