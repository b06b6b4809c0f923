//! Error handling
//!
//! Defines error types and their HTTP rendering for the file browser.

pub mod handlers;
pub mod types;

pub use handlers::{ErrorBody, error_response, error_to_status};
pub use types::*;
