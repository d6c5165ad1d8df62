//! Error types for CLI commands
//!
//! Engine and config failures arrive as `githook_core::Error`. This module
//! wraps them together with the CLI's own failures and decides the process
//! exit code.

use thiserror::Error;

/// Exit code for invalid user input
pub const EXIT_USAGE: i32 = 2;

/// Exit code for every other failure
pub const EXIT_FAILURE: i32 = 1;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// Hook management error
    #[error(transparent)]
    Hook(#[from] githook_core::Error),

    /// JSON serialization error
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;

impl CommandError {
    /// Process exit code for this error
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Hook(err) if err.is_usage() => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}
