//! Concurrency-bounded recursive directory scanner.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::try_join_all;
use tokio::sync::{Semaphore, broadcast};
use tracing::{debug, trace};

use scandir_core::{
    FileStat, FileSystem, RecursionMode, ScanError, ScanOptions, ScanResult, Validate, check_root,
};

use crate::progress::{ProgressTracker, ScanProgress};
use crate::queue::{TaskQueue, permits_for};

/// Scanner that walks a tree through a [`FileSystem`], running sibling
/// listings and stats concurrently up to the configured bound.
pub struct Scanner {
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl Scanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Scan `path` and everything below it that `options` admits.
    ///
    /// Arguments are checked before any filesystem access. The first
    /// filesystem error at any depth aborts the scan and is returned.
    pub async fn scan(
        &self,
        path: impl AsRef<Path>,
        options: &ScanOptions,
    ) -> Result<ScanResult, ScanError> {
        let root = path.as_ref();
        check_root(root)?;
        options.check()?;

        let file_system = options.resolved_file_system();
        let context = ScanContext {
            validate: options.resolved_validate(&file_system),
            file_system,
            stat_permits: permits_for(options.concurrency),
        };
        let mode = options.recursion_mode();

        debug!(
            path = %root.display(),
            ?mode,
            concurrency = ?options.concurrency,
            "Starting scan"
        );

        let mut tracker = ProgressTracker::new();
        let mut result = ScanResult::new();

        let stat = context.file_system.stat(root).await?;
        if stat.is_file() {
            result.files.push(root.to_path_buf());
        } else if stat.is_dir() {
            result.directories.push(root.to_path_buf());
        }
        tracker.record(result.files.len(), result.directories.len());

        if stat.is_dir() && mode.lists_children() {
            let mut queue = TaskQueue::new(options.concurrency);
            queue.push(scan_directory(context.clone(), root.to_path_buf(), mode));

            queue
                .wait_idle(|queue, batch| {
                    for dir in batch.descend {
                        queue.push(scan_directory(context.clone(), dir, batch.child_mode));
                    }

                    tracker.record(batch.found.files.len(), batch.found.directories.len());
                    result.extend(batch.found);

                    // No subscribers is fine
                    let _ = self.progress_tx.send(tracker.snapshot(&batch.path));
                })
                .await?;
        }

        debug!(
            path = %root.display(),
            files = result.files.len(),
            directories = result.directories.len(),
            elapsed = ?tracker.elapsed(),
            "Scan complete"
        );

        Ok(result)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan `path` with a fresh [`Scanner`].
pub async fn scan(path: impl AsRef<Path>, options: ScanOptions) -> Result<ScanResult, ScanError> {
    Scanner::new().scan(path, &options).await
}

/// Handles shared by every task of one scan.
#[derive(Clone)]
struct ScanContext {
    file_system: Arc<dyn FileSystem>,
    validate: Validate,
    /// Bounds entry stats across all directory tasks. `None` is unbounded.
    stat_permits: Option<Arc<Semaphore>>,
}

impl ScanContext {
    async fn stat(&self, path: &Path) -> Result<FileStat, ScanError> {
        let _permit = match &self.stat_permits {
            Some(permits) => Some(permits.acquire().await.map_err(|e| ScanError::Task {
                message: e.to_string(),
            })?),
            None => None,
        };
        self.file_system.stat(path).await
    }
}

/// Entries recorded for one listed directory.
struct DirectoryBatch {
    path: PathBuf,
    found: ScanResult,
    /// Subdirectories to list next, all in `child_mode`.
    descend: Vec<PathBuf>,
    child_mode: RecursionMode,
}

/// List one directory and classify its accepted entries, in listing order.
async fn scan_directory(
    context: ScanContext,
    dir: PathBuf,
    mode: RecursionMode,
) -> Result<DirectoryBatch, ScanError> {
    let names = context.file_system.read_dir(&dir).await?;
    trace!(path = %dir.display(), entries = names.len(), "Listed directory");

    let accepted: Vec<PathBuf> = names
        .iter()
        .map(|name| context.file_system.join(&dir, name))
        .filter(|path| {
            let keep = (context.validate)(path);
            if !keep {
                trace!(path = %path.display(), "Rejected by validate");
            }
            keep
        })
        .collect();

    // Results come back in input order
    let stats = try_join_all(accepted.iter().map(|path| context.stat(path))).await?;

    let child_mode = mode.descend();
    let mut found = ScanResult::new();
    let mut descend = Vec::new();

    for (path, stat) in accepted.into_iter().zip(stats) {
        if stat.is_file() {
            found.files.push(path);
        } else if stat.is_dir() {
            if child_mode.lists_children() {
                descend.push(path.clone());
            }
            found.directories.push(path);
        }
    }

    Ok(DirectoryBatch {
        path: dir,
        found,
        descend,
        child_mode,
    })
}
