//! Scan options.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ScanError;
use crate::fs::{FileSystem, OsFileSystem, is_hidden_name};
use crate::mode::RecursionMode;

/// Predicate deciding whether a directory entry is visited at all.
pub type Validate = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

pub(crate) const PATH_MESSAGE: &str = "path must be a valid string";
const OPTIONS_MESSAGE: &str = "options must be a valid object";
const RECURSIVE_MESSAGE: &str = "options.recursive must be a valid boolean";
const VALIDATE_MESSAGE: &str = "options.validate must be a valid function";
const CONCURRENCY_MESSAGE: &str = "options.concurrency must be a valid number";
const FILE_SYSTEM_MESSAGE: &str = "options.fileSystem must be a valid object";

/// Options for a single scan.
///
/// `validate` and `file_system` cannot be serialized; they are skipped by
/// serde and left at their defaults when deserializing.
#[derive(Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::check"))]
#[serde(rename_all = "camelCase")]
pub struct ScanOptions {
    /// Descend into subdirectories without limit (`false` = one level).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub recursive: bool,

    /// Entry filter. `None` skips dot-files.
    #[builder(default, setter(custom))]
    #[serde(skip)]
    pub validate: Option<Validate>,

    /// Maximum directory scans in flight (`None` = unbounded).
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub concurrency: Option<usize>,

    /// Filesystem to scan. `None` uses the host OS.
    #[builder(default, setter(custom))]
    #[serde(skip)]
    pub file_system: Option<Arc<dyn FileSystem>>,
}

fn default_true() -> bool {
    true
}

impl ScanOptionsBuilder {
    /// Set the entry filter.
    pub fn validate<F>(&mut self, validate: F) -> &mut Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        self.validate = Some(Some(Arc::new(validate)));
        self
    }

    /// Scan through `file_system` instead of the host OS.
    pub fn file_system(&mut self, file_system: impl FileSystem + 'static) -> &mut Self {
        self.file_system = Some(Some(Arc::new(file_system)));
        self
    }

    /// Scan through an already shared filesystem handle.
    pub fn shared_file_system(&mut self, file_system: Arc<dyn FileSystem>) -> &mut Self {
        self.file_system = Some(Some(file_system));
        self
    }

    fn check(&self) -> Result<(), String> {
        check_concurrency(self.concurrency.flatten()).map_err(str::to_string)
    }
}

impl ScanOptions {
    /// Create a new options builder.
    pub fn builder() -> ScanOptionsBuilder {
        ScanOptionsBuilder::default()
    }

    /// Parse dynamically typed options, rejecting mistyped values.
    ///
    /// `null` stands for "absent" where the option allows it. Callables and
    /// filesystem overrides have no JSON form, so `validate` must be absent
    /// or `null` and `fileSystem` must be absent or an empty object.
    pub fn from_json(value: &Value) -> Result<Self, ScanError> {
        let map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            _ => return Err(ScanError::invalid_argument(OPTIONS_MESSAGE)),
        };

        let mut options = Self::default();

        match map.get("recursive") {
            None => {}
            Some(Value::Bool(recursive)) => options.recursive = *recursive,
            Some(_) => return Err(ScanError::invalid_argument(RECURSIVE_MESSAGE)),
        }

        match map.get("validate") {
            None | Some(Value::Null) => {}
            Some(_) => return Err(ScanError::invalid_argument(VALIDATE_MESSAGE)),
        }

        match map.get("concurrency") {
            None => {}
            Some(Value::Number(n)) => match n.as_u64() {
                Some(n) => {
                    let n = usize::try_from(n)
                        .map_err(|_| ScanError::invalid_argument(CONCURRENCY_MESSAGE))?;
                    check_concurrency(Some(n)).map_err(ScanError::invalid_argument)?;
                    options.concurrency = Some(n);
                }
                _ => return Err(ScanError::invalid_argument(CONCURRENCY_MESSAGE)),
            },
            Some(_) => return Err(ScanError::invalid_argument(CONCURRENCY_MESSAGE)),
        }

        match map.get("fileSystem") {
            None => {}
            Some(Value::Object(overrides)) if overrides.is_empty() => {}
            Some(_) => return Err(ScanError::invalid_argument(FILE_SYSTEM_MESSAGE)),
        }

        Ok(options)
    }

    /// Reject values the type system cannot rule out.
    pub fn check(&self) -> Result<(), ScanError> {
        check_concurrency(self.concurrency).map_err(ScanError::invalid_argument)
    }

    /// Recursion mode for the root of the scan.
    pub fn recursion_mode(&self) -> RecursionMode {
        RecursionMode::from_recursive(self.recursive)
    }

    /// The filesystem to scan through.
    pub fn resolved_file_system(&self) -> Arc<dyn FileSystem> {
        match &self.file_system {
            Some(file_system) => Arc::clone(file_system),
            None => Arc::new(OsFileSystem),
        }
    }

    /// The entry filter, falling back to [`skip_hidden`] over `file_system`.
    pub fn resolved_validate(&self, file_system: &Arc<dyn FileSystem>) -> Validate {
        match &self.validate {
            Some(validate) => Arc::clone(validate),
            None => skip_hidden(Arc::clone(file_system)),
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            validate: None,
            concurrency: None,
            file_system: None,
        }
    }
}

impl fmt::Debug for ScanOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanOptions")
            .field("recursive", &self.recursive)
            .field("validate", &self.validate.as_ref().map(|_| "<fn>"))
            .field("concurrency", &self.concurrency)
            .field("file_system", &self.file_system.as_ref().map(|_| "<dyn FileSystem>"))
            .finish()
    }
}

/// Default entry filter: reject entries whose base name starts with `.`.
pub fn skip_hidden(file_system: Arc<dyn FileSystem>) -> Validate {
    Arc::new(move |path: &Path| !is_hidden_name(&file_system.basename(path)))
}

/// Zero is the only invalid bound; `None` is unbounded.
fn check_concurrency(concurrency: Option<usize>) -> Result<(), &'static str> {
    match concurrency {
        Some(0) => Err(CONCURRENCY_MESSAGE),
        _ => Ok(()),
    }
}

/// Check the scan root before any I/O.
pub fn check_root(path: &Path) -> Result<(), ScanError> {
    if path.as_os_str().is_empty() {
        return Err(ScanError::invalid_argument(PATH_MESSAGE));
    }
    Ok(())
}
