//! Scan progress reporting.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Progress information during a scan.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Number of files recorded so far.
    pub files_found: u64,
    /// Number of directories recorded so far, including the root.
    pub dirs_found: u64,
    /// Directory whose entries were just recorded.
    pub current_path: PathBuf,
    /// Time elapsed since the scan started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            files_found: 0,
            dirs_found: 0,
            current_path: PathBuf::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Calculate scan rate in entries per second.
    pub fn entries_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.total_items() as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Get total items found (files + dirs).
    pub fn total_items(&self) -> u64 {
        self.files_found + self.dirs_found
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Running totals for one scan.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    files_found: u64,
    dirs_found: u64,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            files_found: 0,
            dirs_found: 0,
        }
    }

    pub fn record(&mut self, files: usize, dirs: usize) {
        self.files_found += files as u64;
        self.dirs_found += dirs as u64;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn snapshot(&self, current_path: &Path) -> ScanProgress {
        ScanProgress {
            files_found: self.files_found,
            dirs_found: self.dirs_found,
            current_path: current_path.to_path_buf(),
            elapsed: self.elapsed(),
        }
    }
}
