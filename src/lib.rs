//! scandir - recursive, concurrency-bounded directory scanning.
//!
//! Walk a tree, keep the entries a predicate accepts, and get back every
//! file and directory found:
//!
//! ```rust,no_run
//! use scandir::{ScanOptions, scan};
//!
//! # async fn run() -> Result<(), scandir::ScanError> {
//! let result = scan("src", ScanOptions::default()).await?;
//! for file in &result.files {
//!     println!("{}", file.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! All I/O goes through a [`FileSystem`], so callers can scan virtual trees
//! or instrument the real one by overriding only the operations they need.

pub use scandir_core::{
    FileKind, FileStat, FileSystem, OsFileSystem, RecursionMode, ScanError, ScanOptions,
    ScanOptionsBuilder, ScanOptionsBuilderError, ScanResult, Validate, async_trait, is_hidden_name,
    skip_hidden,
};
pub use scandir_scan::{ScanProgress, Scanner, TaskQueue, scan};
