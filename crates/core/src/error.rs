//! Base error types for githook
//!
//! This module provides the foundation error types that all crates can use.

use std::path::PathBuf;
use thiserror::Error;

use crate::timing::Timing;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The specifier does not match any hook source
    #[error("Cannot resolve hook specifier '{specifier}'")]
    UnresolvableSpecifier { specifier: String },

    /// Fetching or copying the hook content failed
    #[error("Hook source unavailable: {location}: {source}")]
    SourceUnavailable {
        location: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A hook with the same name is already installed for this timing
    #[error("Hook '{name}' is already installed for {timing} (use --force to overwrite)")]
    AlreadyInstalled { timing: Timing, name: String },

    /// No hook with this name is installed for this timing
    #[error("Hook '{name}' is not installed for {timing}")]
    NotInstalled { timing: Timing, name: String },

    /// Timing is not one of the recognized git hook names
    #[error("Unrecognized timing '{timing}' (expected one of: {})", Timing::names().join(", "))]
    UnrecognizedTiming { timing: String },

    /// A dispatched hook exited nonzero or could not be started
    #[error("Hook '{hook}' failed with exit code {code}: {reason}")]
    ChildExecutionFailure {
        hook: String,
        code: i32,
        reason: String,
    },

    /// Hook name is empty, absolute or escapes the timing directory
    #[error("Invalid hook name '{name}': {reason}")]
    InvalidHookName { name: String, reason: String },

    /// No name given and none can be derived from the specifier
    #[error("Cannot derive a hook name from '{specifier}', pass --name")]
    MissingHookName { specifier: String },

    /// Symlink installation requested for a remote source
    #[error("Cannot link '{specifier}': only local files can be installed as links")]
    LinkUnsupported { specifier: String },

    /// Git metadata directory could not be located
    #[error("Git error: {0}")]
    GitDir(String),

    /// Configuration file could not be loaded
    #[error("Configuration error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Generic error message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Create a `SourceUnavailable` error from any error type
    pub fn source_unavailable<E>(location: impl Into<String>, err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::SourceUnavailable {
            location: location.into(),
            source: err.into(),
        }
    }

    /// Whether this error stems from bad user input rather than the environment
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::UnresolvableSpecifier { .. }
                | Self::UnrecognizedTiming { .. }
                | Self::InvalidHookName { .. }
                | Self::MissingHookName { .. }
                | Self::LinkUnsupported { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_unrecognized_timing_lists_valid_names() {
        let err = Error::UnrecognizedTiming {
            timing: "pre-comit".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("pre-comit"));
        assert!(msg.contains("pre-commit"));
        assert!(msg.contains("post-rewrite"));
    }

    #[test]
    fn test_already_installed_mentions_force() {
        let err = Error::AlreadyInstalled {
            timing: Timing::PreCommit,
            name: "lint".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Hook 'lint' is already installed for pre-commit (use --force to overwrite)"
        );
    }

    #[test]
    fn test_source_unavailable_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::source_unavailable("./missing.sh", io);
        assert!(err.to_string().contains("./missing.sh"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_usage_classification() {
        assert!(
            Error::UnrecognizedTiming {
                timing: "x".to_string()
            }
            .is_usage()
        );
        assert!(
            !Error::NotInstalled {
                timing: Timing::PostMerge,
                name: "x".to_string()
            }
            .is_usage()
        );
        assert!(!Error::Message("boom".to_string()).is_usage());
    }
}
