//! Configuration management for githook
//!
//! This crate handles:
//! - Configuration loading (`config.toml`)
//! - XDG directory management
//! - Locating the repository's git metadata directory
//! - Logging initialization

pub mod config;
pub mod dirs;
pub mod git;
pub mod logging;

// Re-export error types from core
pub use githook_core::{Error, Result};

// Re-export main types
pub use config::{AutoBool, Config, FetchConfig, GeneralConfig, UiConfig, UiMode};
pub use dirs::{config_dir, default_config_file};
pub use git::{GitDirProvider, resolve_git_dir};
