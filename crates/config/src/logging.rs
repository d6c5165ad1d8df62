//! Logging configuration for the githook CLI
//!
//! All terminal output goes to stderr so a hook's stdout reaches git untouched.

use crate::Result;
use githook_core::Error;
use std::path::Path;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events pass the default filter
const TARGETS: [&str; 4] = ["githook", "githook_engine", "githook_config", "githook_core"];

/// Build the default filter directive for `level`
fn default_directive(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable debug level logging
/// * `log_file` - Optional path to append debug logs to
///
/// # Examples
/// ```ignore
/// // Basic usage with info level
/// init(false, None)?;
///
/// // Write logs to file
/// init(true, Some(Path::new("githook.log")))?;
/// ```
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    // RUST_LOG overrides the default directive
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(level)))
        .map_err(|e| Error::Message(format!("Invalid log filter: {e}")))?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .without_time()
        .compact()
        .with_ansi(true)
        .with_filter(env_filter);

    let file_layer = match log_file {
        Some(log_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)?;

            let file_filter = EnvFilter::try_new(default_directive("debug"))
                .map_err(|e| Error::Message(format!("Invalid log filter: {e}")))?;

            Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .with_filter(file_filter),
            )
        }
        None => None,
    };

    // A second init (tests, embedded use) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_directive() {
        assert_eq!(
            default_directive("info"),
            "githook=info,githook_engine=info,githook_config=info,githook_core=info"
        );
    }

    #[test]
    fn test_init_creates_log_file() {
        let temp = TempDir::new().unwrap();
        let log_path = temp.path().join("githook.log");
        init(true, Some(&log_path)).unwrap();
        assert!(log_path.exists());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false, None).unwrap();
        init(true, None).unwrap();
    }

    #[test]
    fn test_unwritable_log_file_is_error() {
        let temp = TempDir::new().unwrap();
        let log_path = temp.path().join("missing-dir/githook.log");
        assert!(init(false, Some(&log_path)).is_err());
    }
}
