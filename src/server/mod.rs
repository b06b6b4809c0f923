//! Server core functionality
//!
//! This module contains the shared handler state, the router and the
//! listener lifecycle.

pub mod core;

pub use self::core::{AppState, Server, build_router};
