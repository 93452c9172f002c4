//! Traversal engine for scandir.
//!
//! This crate walks a directory tree through a pluggable
//! [`FileSystem`](scandir_core::FileSystem), bounding how many directory
//! listings run at once.
//!
//! # Overview
//!
//! - **Depth control** via [`RecursionMode`]: `recursive: false` lists the
//!   root's direct children only
//! - **Entry filtering** via a validate predicate, dot-files skipped by default
//! - **Bounded concurrency** via [`TaskQueue`]
//! - **Progress updates** via broadcast channels
//!
//! # Example
//!
//! ```rust,no_run
//! use scandir_scan::{ScanOptions, scan};
//!
//! # async fn run() -> Result<(), scandir_scan::ScanError> {
//! let options = ScanOptions::builder()
//!     .concurrency(8usize)
//!     .build()
//!     .expect("valid options");
//! let result = scan("/path/to/scan", options).await?;
//!
//! println!("{} files, {} directories", result.files.len(), result.directories.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Ordering
//!
//! The entries of one directory are always recorded together and in the
//! order the filesystem listed them. How batches of different directories
//! interleave depends on which listing finishes first, so it is only
//! deterministic with `concurrency = Some(1)`, where directories are listed
//! breadth-first.
//!
//! # Progress Monitoring
//!
//! ```rust,no_run
//! use scandir_scan::{ScanOptions, Scanner};
//!
//! # async fn run() -> Result<(), scandir_scan::ScanError> {
//! let scanner = Scanner::new();
//! let mut progress_rx = scanner.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(progress) = progress_rx.recv().await {
//!         println!(
//!             "Found {} entries ({:.0}/s)",
//!             progress.total_items(),
//!             progress.entries_per_second()
//!         );
//!     }
//! });
//!
//! scanner.scan("/path/to/scan", &ScanOptions::default()).await?;
//! # Ok(())
//! # }
//! ```

mod progress;
mod queue;
mod scanner;

pub use progress::ScanProgress;
pub use queue::TaskQueue;
pub use scanner::{Scanner, scan};

// Re-export core types for convenience
pub use scandir_core::{
    FileKind, FileStat, FileSystem, OsFileSystem, RecursionMode, ScanError, ScanOptions,
    ScanOptionsBuilder, ScanResult, Validate, async_trait,
};
