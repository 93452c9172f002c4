//! Core types and traits for scandir.
//!
//! This crate provides the building blocks shared by the traversal engine:
//! scan options, the error type, the recursion mode, the scan result, and
//! the [`FileSystem`] abstraction the engine performs all I/O through.

mod config;
mod error;
mod fs;
mod mode;
mod result;

pub use config::{
    ScanOptions, ScanOptionsBuilder, ScanOptionsBuilderError, Validate, check_root, skip_hidden,
};
pub use error::ScanError;
pub use fs::{FileKind, FileStat, FileSystem, OsFileSystem, is_hidden_name};
pub use mode::RecursionMode;
pub use result::ScanResult;

// Re-export async_trait for FileSystem implementors
pub use async_trait::async_trait;
