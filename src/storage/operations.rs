//! Storage operations
//!
//! Filesystem actions behind the list, stat and delete routes. Every
//! function takes a [`ResolvedPath`], so nothing here can be reached with
//! a path that skipped confinement.

use log::{debug, error, info};
use std::io;
use tokio::fs;

use crate::error::StorageError;
use crate::storage::results::{FileEntry, StatResult};
use crate::storage::validation::ResolvedPath;

/// Lists the entries directly inside a directory.
///
/// Failing to open the directory is reported as `NotFound`. Failing on any
/// single entry aborts the listing with an internal error; partial results
/// are dropped. Order follows the underlying directory enumeration.
pub async fn list_directory(dir: &ResolvedPath) -> Result<Vec<FileEntry>, StorageError> {
    let mut entries = fs::read_dir(dir).await.map_err(|e| {
        debug!("read_dir failed for {}: {}", dir.display(), e);
        StorageError::NotFound(format!("/{} ({})", dir.relative(), e))
    })?;

    let mut file_list = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(|e| {
        error!("Failed to enumerate {}: {}", dir.display(), e);
        StorageError::IoError(io::Error::other(format!("failed to read directory: {e}")))
    })? {
        let name = entry.file_name().to_string_lossy().to_string();

        let file_entry = match entry.metadata().await {
            Ok(metadata) => FileEntry::from_metadata(name.clone(), &metadata),
            Err(e) => Err(e),
        }
        .map_err(|e| {
            error!("Failed to read file info for '{}': {}", name, e);
            StorageError::IoError(io::Error::other(format!(
                "failed to read file info for '{name}': {e}"
            )))
        })?;

        file_list.push(file_entry);
    }

    info!(
        "Listed directory /{} (real: {}) - {} entries",
        dir.relative(),
        dir.display(),
        file_list.len()
    );

    Ok(file_list)
}

/// Returns the metadata of a single file or folder
pub async fn stat_path(target: &ResolvedPath) -> Result<StatResult, StorageError> {
    let metadata = fs::metadata(target).await.map_err(|e| {
        debug!("stat failed for {}: {}", target.display(), e);
        StorageError::NotFound(format!("/{} ({})", target.relative(), e))
    })?;

    let result = StatResult::from_metadata(target.display().to_string(), &metadata)
        .map_err(|e| StorageError::IoError(io::Error::other(e.to_string())))?;

    info!("Stat /{} (real: {})", target.relative(), target.display());

    Ok(result)
}

/// Creates a directory and any missing parents
pub async fn ensure_directory(dir: &ResolvedPath) -> Result<(), StorageError> {
    fs::create_dir_all(dir).await.map_err(|e| {
        error!("Failed to create directory {}: {}", dir.display(), e);
        StorageError::IoError(io::Error::other(format!("failed to create directory: {e}")))
    })
}

/// Deletes a file, or a folder together with everything inside it.
///
/// The root itself is never removed.
pub async fn delete_path(target: &ResolvedPath) -> Result<(), StorageError> {
    if target.is_root() {
        return Err(StorageError::RootProtected);
    }

    let metadata = match fs::symlink_metadata(target).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StorageError::NotFound(format!("/{}", target.relative())));
        }
        Err(e) => return Err(StorageError::IoError(io::Error::other(e.to_string()))),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(target).await
    } else {
        fs::remove_file(target).await
    };

    match result {
        Ok(()) => {
            info!(
                "Deleted /{} (real: {})",
                target.relative(),
                target.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Failed to delete {}: {}", target.display(), e);
            Err(StorageError::IoError(io::Error::other(format!(
                "failed to delete: {e}"
            ))))
        }
    }
}
