//! Storage result types
//!
//! Defines the entries and outcomes returned by storage operations. These
//! serialize directly into the JSON bodies of the list, stat, upload and
//! delete routes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::Metadata;
use std::io;
use std::time::SystemTime;

/// Format applied to every `modified` field (UTC)
pub const MODIFIED_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Whether an entry is a regular file or a folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

impl EntryKind {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        if metadata.is_dir() {
            EntryKind::Folder
        } else {
            EntryKind::File
        }
    }
}

/// One file or folder found directly inside a listed directory
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub size: u64,
    pub modified: String,
}

impl FileEntry {
    pub fn from_metadata(name: String, metadata: &Metadata) -> io::Result<Self> {
        let (kind, size, modified) = describe(metadata)?;
        Ok(Self {
            name,
            kind,
            size,
            modified,
        })
    }
}

/// Metadata of a single path, as returned by `/stat`
#[derive(Debug, Clone, Serialize)]
pub struct StatResult {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub size: u64,
    pub modified: String,
}

impl StatResult {
    pub fn from_metadata(path: String, metadata: &Metadata) -> io::Result<Self> {
        let (kind, size, modified) = describe(metadata)?;
        Ok(Self {
            path,
            kind,
            size,
            modified,
        })
    }
}

/// Result of a completed upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadResult {
    pub message: String,
    pub filename: String,
    pub size: u64,
}

/// Result of a completed deletion
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResult {
    pub message: String,
    pub path: String,
}

/// Formats a timestamp with [`MODIFIED_TIME_FORMAT`]
pub fn format_modified(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format(MODIFIED_TIME_FORMAT)
        .to_string()
}

// Folders always report size 0.
fn describe(metadata: &Metadata) -> io::Result<(EntryKind, u64, String)> {
    let kind = EntryKind::from_metadata(metadata);
    let size = match kind {
        EntryKind::Folder => 0,
        EntryKind::File => metadata.len(),
    };
    let modified = format_modified(metadata.modified()?);
    Ok((kind, size, modified))
}
