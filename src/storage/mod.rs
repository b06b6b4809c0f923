//! File system storage management
//!
//! Handles path confinement, filesystem operations and their result types.

pub mod operations;
pub mod results;
pub mod validation;

pub use operations::{delete_path, ensure_directory, list_directory, stat_path};
pub use results::{
    DeleteResult, EntryKind, FileEntry, MODIFIED_TIME_FORMAT, StatResult, UploadResult,
};
pub use validation::{PathError, ResolvedPath, StorageRoot, is_plain_file_name, resolve_path};
