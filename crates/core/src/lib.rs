//! Core types and utilities for githook
//!
//! This is the foundation crate (Layer 0) that all other githook crates depend on.
//! It provides:
//! - The closed set of git hook timings ([`Timing`])
//! - Validated names for installed hooks ([`HookName`])
//! - Base error types
//!
//! This crate has no dependencies on other githook crates.

pub mod error;
pub mod name;
pub mod timing;

pub use error::{Error, Result};
pub use name::HookName;
pub use timing::Timing;
