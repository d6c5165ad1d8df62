//! CLI command implementations
//!
//! This module contains all command implementations for the githook CLI.

pub mod dispatch;
pub mod info;
pub mod install;
pub mod list;
pub mod uninstall;
