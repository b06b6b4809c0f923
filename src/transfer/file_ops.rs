//! Module `file_ops`
//!
//! Handles writing uploaded files into storage and opening stored files
//! for download streaming.

use axum::body::Body;
use log::{error, info};
use std::io;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

use crate::error::StorageError;
use crate::storage::ResolvedPath;

/// A file being written from an upload stream.
///
/// The target is created exclusively, so an existing file (or folder) yields
/// `AlreadyExists` and is left untouched. Chunks are written as they arrive
/// and counted against `limit`; callers must [`abort`](Self::abort) on any
/// error so the partial file is removed.
pub struct UploadFile {
    file: File,
    target: ResolvedPath,
    written: u64,
    limit: u64,
}

impl UploadFile {
    pub async fn create(target: &ResolvedPath, limit: u64) -> Result<Self, StorageError> {
        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(target)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(format!("/{}", target.relative())));
            }
            Err(e) => {
                error!("Failed to create file {}: {}", target.display(), e);
                return Err(StorageError::IoError(io::Error::other(format!(
                    "failed to create file: {e}"
                ))));
            }
        };

        info!("Ready to receive data for {}", target.display());

        Ok(Self {
            file,
            target: target.clone(),
            written: 0,
            limit,
        })
    }

    /// Appends one chunk, failing before the write if it would pass the limit
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), StorageError> {
        let total = self.written + chunk.len() as u64;
        if total > self.limit {
            error!(
                "File size limit exceeded for {}: {} bytes > {} bytes",
                self.target.display(),
                total,
                self.limit
            );
            return Err(StorageError::FileTooLarge(self.limit));
        }

        if let Err(e) = self.file.write_all(chunk).await {
            error!("Failed to write to {}: {}", self.target.display(), e);
            return Err(StorageError::IoError(io::Error::other(format!(
                "failed to save file: {e}"
            ))));
        }

        self.written = total;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flushes the file and returns the number of bytes stored
    pub async fn finish(mut self) -> Result<u64, StorageError> {
        if let Err(e) = self.file.flush().await {
            error!("Failed to flush {}: {}", self.target.display(), e);
            self.abort().await;
            return Err(StorageError::IoError(io::Error::other(format!(
                "failed to save file: {e}"
            ))));
        }

        info!(
            "File upload completed successfully: {} ({} bytes)",
            self.target.display(),
            self.written
        );

        Ok(self.written)
    }

    /// Closes and removes the partially written file
    pub async fn abort(self) {
        let UploadFile { file, target, .. } = self;
        drop(file);
        if let Err(e) = fs::remove_file(&target).await {
            error!("Failed to remove partial upload {}: {}", target.display(), e);
        }
    }
}

/// Opens a regular file for download, returning it with its length
pub async fn open_download(target: &ResolvedPath) -> Result<(File, u64), StorageError> {
    let metadata = match fs::metadata(target).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StorageError::NotFound(format!("/{}", target.relative())));
        }
        Err(e) => {
            return Err(StorageError::IoError(io::Error::other(format!(
                "failed to open file: {e}"
            ))));
        }
    };

    if metadata.is_dir() {
        return Err(StorageError::NotAFile(format!("/{}", target.relative())));
    }

    let file = match File::open(target).await {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StorageError::NotFound(format!("/{}", target.relative())));
        }
        Err(e) => {
            error!("Failed to open file {}: {}", target.display(), e);
            return Err(StorageError::IoError(io::Error::other(format!(
                "failed to open file: {e}"
            ))));
        }
    };

    info!(
        "Starting file download: {} ({} bytes)",
        target.display(),
        metadata.len()
    );

    Ok((file, metadata.len()))
}

/// Wraps an open file as a streaming response body.
///
/// Headers are sent before the first chunk, so a read failure mid-stream
/// can only abort the connection, not change the status.
pub fn download_body(file: File) -> Body {
    Body::from_stream(ReaderStream::new(file))
}
