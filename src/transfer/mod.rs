//! Transfer module for the file browser
//!
//! Handles moving file contents between HTTP bodies and storage.

pub mod file_ops;

pub use file_ops::{UploadFile, download_body, open_download};
