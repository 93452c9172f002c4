//! Depth control for recursive descent.

use serde::{Deserialize, Serialize};

/// How far a scan may descend below a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecursionMode {
    /// Record the directory but do not list its children.
    None,
    /// List this directory's children, then stop.
    Shallow,
    /// Descend without limit.
    Deep,
}

impl RecursionMode {
    /// Mode for the root of a scan.
    pub fn from_recursive(recursive: bool) -> Self {
        if recursive { Self::Deep } else { Self::Shallow }
    }

    /// Mode a child inherits when entered from a parent in this mode.
    pub fn descend(self) -> Self {
        match self {
            Self::None | Self::Shallow => Self::None,
            Self::Deep => Self::Deep,
        }
    }

    /// Whether a directory in this mode has its entries listed.
    pub fn lists_children(self) -> bool {
        self != Self::None
    }
}
