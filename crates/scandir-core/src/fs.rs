//! Filesystem abstraction used by the traversal engine.
//!
//! The engine never touches `std::fs` or `tokio::fs` directly. Every path
//! operation goes through a [`FileSystem`], whose methods all default to the
//! host operating system. An implementor overrides only the operations it
//! cares about (for instrumentation or a virtual tree) and inherits the rest:
//!
//! ```rust,no_run
//! use std::ffi::OsString;
//! use std::path::Path;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use scandir_core::{FileSystem, OsFileSystem, ScanError, async_trait};
//!
//! #[derive(Default)]
//! struct CountingFs {
//!     listed: AtomicUsize,
//! }
//!
//! #[async_trait]
//! impl FileSystem for CountingFs {
//!     async fn read_dir(&self, path: &Path) -> Result<Vec<OsString>, ScanError> {
//!         self.listed.fetch_add(1, Ordering::Relaxed);
//!         OsFileSystem.read_dir(path).await
//!     }
//! }
//! ```

use std::ffi::{OsStr, OsString};
use std::fs::Metadata;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Classification of a stated path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Anything else (sockets, fifos, devices).
    Other,
}

/// Metadata returned by [`FileSystem::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    /// What the path is.
    pub kind: FileKind,
    /// Size in bytes (0 for directories in virtual filesystems).
    pub len: u64,
}

impl FileStat {
    /// Stat for a regular file of `len` bytes.
    pub fn file(len: u64) -> Self {
        Self {
            kind: FileKind::File,
            len,
        }
    }

    /// Stat for a directory.
    pub fn directory() -> Self {
        Self {
            kind: FileKind::Directory,
            len: 0,
        }
    }

    /// Stat for a path that is neither a file nor a directory.
    pub fn other() -> Self {
        Self {
            kind: FileKind::Other,
            len: 0,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }
}

impl From<&Metadata> for FileStat {
    fn from(metadata: &Metadata) -> Self {
        let kind = if metadata.is_file() {
            FileKind::File
        } else if metadata.is_dir() {
            FileKind::Directory
        } else {
            FileKind::Other
        };
        Self {
            kind,
            len: metadata.len(),
        }
    }
}

/// The four operations the traversal engine needs from a filesystem.
///
/// Every method has a default that delegates to the host OS, so an
/// implementation only spells out the operations it replaces.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Append an entry name to a directory path. Never fails.
    fn join(&self, base: &Path, name: &OsStr) -> PathBuf {
        base.join(name)
    }

    /// Final segment of `path`, or an empty string if it has none.
    fn basename(&self, path: &Path) -> OsString {
        path.file_name().map(OsStr::to_os_string).unwrap_or_default()
    }

    /// Classify `path`. Symlinks are followed.
    async fn stat(&self, path: &Path) -> Result<FileStat, ScanError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| ScanError::io(path, e))?;
        Ok(FileStat::from(&metadata))
    }

    /// Names of the entries directly inside `path`, in the order the
    /// filesystem returns them. Only called on directories.
    async fn read_dir(&self, path: &Path) -> Result<Vec<OsString>, ScanError> {
        let mut dir = tokio::fs::read_dir(path)
            .await
            .map_err(|e| ScanError::io(path, e))?;

        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(|e| ScanError::io(path, e))? {
            names.push(entry.file_name());
        }
        Ok(names)
    }
}

/// The host operating system's filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {}

/// Whether an entry name is a dot-file.
pub fn is_hidden_name(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}
