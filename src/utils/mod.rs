//! Utility functions
//!
//! Provides request input validation.

pub mod validation;

pub use validation::{is_valid_input, require_path};
