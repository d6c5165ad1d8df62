//! Validated hook names
//!
//! A [`HookName`] is the path of an installed hook relative to its timing
//! directory. Hooks may live in subdirectories, so a name can contain `/`,
//! but it can never point outside the timing directory.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Relative path of an installed hook inside `hooks/installed/<timing>`
///
/// Names order byte-wise on their path, which is the order hooks are
/// dispatched in.
///
/// # Examples
///
/// ```
/// use githook_core::HookName;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let name = HookName::parse("lint/eslint")?;
/// assert_eq!(name.to_string(), "lint/eslint");
///
/// assert!(HookName::parse("../escape").is_err());
/// assert!(HookName::parse("/etc/passwd").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HookName(PathBuf);

impl HookName {
    /// Create a `HookName` from a relative path
    ///
    /// # Errors
    ///
    /// Returns `InvalidHookName` if the path is empty or contains anything
    /// other than normal components (root, `.`, `..`, drive prefixes).
    pub fn new(path: PathBuf) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidHookName {
            name: path.display().to_string(),
            reason: reason.to_string(),
        };

        if path.as_os_str().is_empty() {
            return Err(invalid("name is empty"));
        }

        for component in path.components() {
            match component {
                Component::Normal(_) => {}
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("name must be relative"));
                }
                Component::CurDir | Component::ParentDir => {
                    return Err(invalid("name must not contain '.' or '..'"));
                }
            }
        }

        // Normalize away trailing or doubled separators
        let normalized: PathBuf = path.components().collect();
        Ok(Self(normalized))
    }

    /// Parse a `HookName` from a string
    ///
    /// # Errors
    ///
    /// See [`HookName::new`].
    pub fn parse(name: &str) -> Result<Self> {
        Self::new(PathBuf::from(name))
    }

    /// Get the underlying relative `Path`
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl Ord for HookName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .as_os_str()
            .as_encoded_bytes()
            .cmp(other.0.as_os_str().as_encoded_bytes())
    }
}

impl PartialOrd for HookName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl Serialize for HookName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
