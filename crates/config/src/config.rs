//! Configuration management
//!
//! This module handles loading githook configuration from `config.toml`.

use crate::Result;
use githook_core::Error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Auto boolean type supporting "auto", true, or false
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AutoBool {
    /// Automatically determine the appropriate value
    #[default]
    Auto,
    /// Explicitly enable
    #[serde(rename = "true")]
    True,
    /// Explicitly disable
    #[serde(rename = "false")]
    False,
}

/// Terminal feature mode used for colors and icons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UiMode {
    /// Enable when output is a terminal
    #[default]
    #[serde(alias = "automatic")]
    Auto,
    /// Always enable
    Always,
    /// Never enable
    Never,
}

impl UiMode {
    /// Resolve the mode against terminal detection
    #[must_use]
    pub fn enabled(self, is_tty: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_tty,
        }
    }
}

/// General configuration section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Use builtin git (auto, true, or false)
    ///
    /// `false` always shells out to `git rev-parse`.
    #[serde(default, rename = "useBuiltinGit")]
    pub use_builtin_git: AutoBool,
}

/// Network fetch configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent", rename = "userAgent")]
    pub user_agent: String,

    /// Base URL gist ids are appended to
    #[serde(default = "default_gist_base_url", rename = "gistBaseUrl")]
    pub gist_base_url: String,
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("githook/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_gist_base_url() -> String {
    "https://raw.github.com/gist".to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            gist_base_url: default_gist_base_url(),
        }
    }
}

/// UI configuration section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Colored output: "auto", "always", or "never"
    #[serde(default)]
    pub color: UiMode,

    /// Icon display mode: "auto", "always", or "never"
    /// - auto: Show icons when output is a terminal (default)
    /// - always: Always show icons
    /// - never: Never show icons
    #[serde(default)]
    pub icons: UiMode,
}

/// Githook configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General configuration section
    #[serde(default)]
    pub general: GeneralConfig,

    /// Fetch configuration section
    #[serde(default)]
    pub fetch: FetchConfig,

    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns `Config` error if the file cannot be read or TOML parsing fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| config_err(path, &e))?;
        Self::from_toml_str(&content, path)
    }

    /// Parse configuration from a TOML string
    ///
    /// `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns `Config` error if TOML parsing fails
    pub fn from_toml_str(toml_content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(toml_content).map_err(|e| config_err(origin, &e))
    }

    /// Load an explicit config file, or the default one if it exists
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns `Config` error if the selected file cannot be read or parsed
    pub fn load_or_default(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        match crate::dirs::default_config_file() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "Loading config");
                Ok((Self::load(&path)?, Some(path)))
            }
            _ => Ok((Self::default(), None)),
        }
    }
}

fn config_err(path: &Path, err: &dyn std::fmt::Display) -> Error {
    Error::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use tempfile::TempDir;

    // Helper function to create a test directory with a config file
    fn create_test_config(toml_content: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, toml_content).unwrap();
        (temp_dir, config_path)
    }

    #[test]
    fn test_ui_mode_resolution() {
        assert!(UiMode::Always.enabled(false));
        assert!(!UiMode::Never.enabled(true));
        assert!(UiMode::Auto.enabled(true));
        assert!(!UiMode::Auto.enabled(false));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.general.use_builtin_git, AutoBool::Auto);
        assert_eq!(config.fetch.timeout, 30);
        assert_eq!(config.fetch.gist_base_url, "https://raw.github.com/gist");
        assert!(config.fetch.user_agent.starts_with("githook/"));
        assert_eq!(config.ui.color, UiMode::Auto);
        assert_eq!(config.ui.icons, UiMode::Auto);
    }

    #[test]
    fn test_load_empty_config() {
        let (_temp_dir, config_path) = create_test_config("");
        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.fetch.timeout, 30);
    }

    #[test]
    fn test_load_full_config() {
        let (_temp_dir, config_path) = create_test_config(
            r#"
[general]
useBuiltinGit = "false"

[fetch]
timeout = 5
userAgent = "custom/1.0"
gistBaseUrl = "https://gist.example.com/raw"

[ui]
color = "never"
icons = "always"
"#,
        );
        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.general.use_builtin_git, AutoBool::False);
        assert_eq!(config.fetch.timeout, 5);
        assert_eq!(config.fetch.user_agent, "custom/1.0");
        assert_eq!(config.fetch.gist_base_url, "https://gist.example.com/raw");
        assert_eq!(config.ui.color, UiMode::Never);
        assert_eq!(config.ui.icons, UiMode::Always);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let (_temp_dir, config_path) = create_test_config("[fetch]\ntimeout = 10\n");
        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.fetch.timeout, 10);
        assert_eq!(config.fetch.gist_base_url, "https://raw.github.com/gist");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let (_temp_dir, config_path) = create_test_config("[fetch\ntimeout = ");
        let err = Config::load(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config { ref path, .. } if path == &config_path));
    }

    #[test]
    fn test_invalid_mode_is_config_error() {
        let err = Config::from_toml_str("[ui]\ncolor = \"sometimes\"", Path::new("x.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("x.toml"));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        let err = Config::load_or_default(Some(&missing)).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_explicit_file_is_reported() {
        let (_temp_dir, config_path) = create_test_config("[ui]\nicons = \"never\"\n");
        let (config, path) = Config::load_or_default(Some(&config_path)).unwrap();
        assert_eq!(config.ui.icons, UiMode::Never);
        assert_eq!(path.as_deref(), Some(config_path.as_path()));
    }

    #[test]
    fn test_auto_bool_deserialization() {
        #[derive(Deserialize)]
        struct Wrapper {
            value: AutoBool,
        }

        for (input, expected) in [
            ("auto", AutoBool::Auto),
            ("true", AutoBool::True),
            ("false", AutoBool::False),
        ] {
            let w: Wrapper = toml::from_str(&format!("value = \"{input}\"")).unwrap();
            assert_eq!(w.value, expected);
        }
    }
}
