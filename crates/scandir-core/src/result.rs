//! Scan result container.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Files and directories found by a scan, in discovery order.
///
/// Entries of one directory always appear in the order its listing returned
/// them. Order between different directories is only deterministic for
/// sequential scans (`concurrency = Some(1)`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Paths classified as regular files.
    pub files: Vec<PathBuf>,
    /// Paths classified as directories, including the root.
    pub directories: Vec<PathBuf>,
}

impl ScanResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append another batch, keeping its internal order.
    pub fn extend(&mut self, other: ScanResult) {
        self.files.extend(other.files);
        self.directories.extend(other.directories);
    }

    /// Total number of recorded paths.
    pub fn len(&self) -> usize {
        self.files.len() + self.directories.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }

    /// Whether `path` was recorded as either a file or a directory.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.files.iter().any(|p| p == path) || self.directories.iter().any(|p| p == path)
    }

    /// A copy with both lists sorted, for order-insensitive comparison.
    pub fn sorted(&self) -> Self {
        let mut sorted = self.clone();
        sorted.files.sort();
        sorted.directories.sort();
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_keeps_order() {
        let mut result = ScanResult::new();
        result.directories.push("root".into());

        result.extend(ScanResult {
            files: vec!["root/b".into(), "root/a".into()],
            directories: vec!["root/c".into()],
        });

        assert_eq!(result.files, vec![PathBuf::from("root/b"), PathBuf::from("root/a")]);
        assert_eq!(
            result.directories,
            vec![PathBuf::from("root"), PathBuf::from("root/c")]
        );
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_contains_and_sorted() {
        let result = ScanResult {
            files: vec!["z".into(), "a".into()],
            directories: vec!["d".into()],
        };
        assert!(result.contains("a"));
        assert!(result.contains("d"));
        assert!(!result.contains("missing"));

        let sorted = result.sorted();
        assert_eq!(sorted.files, vec![PathBuf::from("a"), PathBuf::from("z")]);
        assert_ne!(sorted, result);
        assert_eq!(sorted, result.sorted().sorted());
    }

    #[test]
    fn test_serializes_as_lists() {
        let result = ScanResult {
            files: vec!["a".into()],
            directories: vec!["root".into()],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({ "files": ["a"], "directories": ["root"] }));
    }
}
