//! Path validation
//!
//! Confines untrusted request paths beneath the storage root. Resolution is
//! purely lexical: nothing here touches the filesystem, and symlinks inside
//! the root are not followed or checked.

use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Separators accepted in request paths, regardless of platform
const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

/// Reasons a request path was refused.
///
/// `Display` is deliberately the same for every variant so that error
/// envelopes never describe the layout under the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// Empty or whitespace-only input
    Empty,
    /// Input would resolve above the root
    OutsideRoot,
    /// A filename that is not a single plain component
    InvalidName,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid path")
    }
}

impl std::error::Error for PathError {}

/// The configured directory every request is confined to.
///
/// Created once at startup; the stored path is absolute and canonical.
#[derive(Debug, Clone)]
pub struct StorageRoot {
    path: PathBuf,
}

impl StorageRoot {
    /// Ensures the directory exists and canonicalizes it
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        std::fs::create_dir_all(path.as_ref())?;
        let path = path.as_ref().canonicalize()?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolves an untrusted request path beneath this root
    pub fn resolve(&self, requested: &str) -> Result<ResolvedPath, PathError> {
        resolve_path(&self.path, requested)
    }

    /// Resolves `filename` as a direct child of an already resolved directory.
    ///
    /// The name must be one plain component; the composed path is run
    /// through the resolver again before it is handed out.
    pub fn resolve_child(
        &self,
        dir: &ResolvedPath,
        filename: &str,
    ) -> Result<ResolvedPath, PathError> {
        if !is_plain_file_name(filename) {
            return Err(PathError::InvalidName);
        }
        let composed = if dir.relative.is_empty() {
            filename.to_string()
        } else {
            format!("{}/{}", dir.relative, filename)
        };
        self.resolve(&composed)
    }
}

/// An absolute path that is the root or one of its descendants.
///
/// Only the resolver constructs these, so every filesystem operation that
/// takes one has gone through confinement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    absolute: PathBuf,
    relative: String,
}

impl ResolvedPath {
    pub fn as_path(&self) -> &Path {
        &self.absolute
    }

    /// Root-relative form using `/` separators; empty for the root itself
    pub fn relative(&self) -> &str {
        &self.relative
    }

    pub fn is_root(&self) -> bool {
        self.relative.is_empty()
    }

    /// Final component, or `None` for the root
    pub fn file_name(&self) -> Option<&str> {
        self.relative.rsplit('/').next().filter(|name| !name.is_empty())
    }

    pub fn display(&self) -> std::path::Display<'_> {
        self.absolute.display()
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.absolute
    }
}

/// Resolves `requested` beneath `root` without touching the filesystem.
///
/// Leading separators do not make the input absolute; it is always taken
/// relative to `root`. `.` and empty segments are dropped and `..` pops the
/// previous segment. A `..` above the top of a relative input is rejected;
/// above the top of a rooted input (`/../x`) it stays at the root.
/// Inputs that collapse to nothing (`/`, `.`, `a/..`) denote the root.
pub fn resolve_path(root: &Path, requested: &str) -> Result<ResolvedPath, PathError> {
    if requested.trim().is_empty() {
        return Err(PathError::Empty);
    }
    if requested.contains('\0') {
        return Err(PathError::InvalidName);
    }

    let rooted = requested.starts_with(PATH_SEPARATORS);
    let mut segments: Vec<&str> = Vec::new();

    for segment in requested.split(PATH_SEPARATORS) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() && !rooted {
                    return Err(PathError::OutsideRoot);
                }
            }
            name => segments.push(name),
        }
    }

    let mut absolute = root.to_path_buf();
    absolute.extend(&segments);

    // The joined path must still be the root or sit strictly below it.
    let relative = absolute
        .strip_prefix(root)
        .map_err(|_| PathError::OutsideRoot)?;
    if relative
        .components()
        .any(|component| !matches!(component, Component::Normal(_)))
    {
        return Err(PathError::OutsideRoot);
    }

    Ok(ResolvedPath {
        absolute,
        relative: segments.join("/"),
    })
}

/// True when `name` is exactly one normal path component
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(PATH_SEPARATORS)
        && !name.contains('\0')
}
