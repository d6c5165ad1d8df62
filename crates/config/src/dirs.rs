//! XDG directory utilities
//!
//! `XDG_CONFIG_HOME` defaults to ~/.config.

use std::path::PathBuf;
use xdg::BaseDirectories;

/// Get the githook config directory
///
/// Returns `$XDG_CONFIG_HOME/githook` or `~/.config/githook`
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    // xdg 3.0: with_prefix returns BaseDirectories, get_*_home returns Option<PathBuf>
    BaseDirectories::with_prefix("githook").get_config_home()
}

/// Get the default config file path
///
/// Returns `$XDG_CONFIG_HOME/githook/config.toml`
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_config_dir_contains_prefix() {
        if let Some(path) = config_dir() {
            assert!(
                path.to_string_lossy().contains("githook"),
                "config_dir path should contain 'githook': {path:?}"
            );
            assert!(path.is_absolute());
        }
    }

    #[test]
    fn test_default_config_file_is_child_of_config_dir() {
        if let (Some(dir), Some(file)) = (config_dir(), default_config_file()) {
            assert!(file.starts_with(&dir));
            assert_eq!(file.file_name().and_then(|n| n.to_str()), Some("config.toml"));
        }
    }
}
