//! Git metadata directory discovery
//!
//! Hooks live under the repository's git directory, so every command needs
//! to find it first. Two implementations are available:
//! - Built-in discovery via git2 (libgit2), the default
//! - The external `git rev-parse --git-dir` command, as fallback or when
//!   configured with `useBuiltinGit = "false"`

use crate::Result;
use crate::config::AutoBool;
use githook_core::Error;
use std::path::{Path, PathBuf};

/// Helper function to convert git2 errors to githook_core errors
#[inline]
fn git_err(e: &git2::Error) -> Error {
    Error::GitDir(e.message().to_string())
}

/// Strategy for locating the git metadata directory
pub trait GitDirProvider {
    /// Locate the git directory of the repository containing `start`
    fn git_dir(&self, start: &Path) -> Result<PathBuf>;

    /// Short name used in diagnostics
    fn name(&self) -> &'static str;
}

/// Git directory discovery using git2 (libgit2)
///
/// Honours `GIT_DIR` like the git command-line tools do.
#[derive(Debug, Default, Clone, Copy)]
pub struct Git2Provider;

impl GitDirProvider for Git2Provider {
    fn git_dir(&self, start: &Path) -> Result<PathBuf> {
        use git2::Repository;

        let repo = if std::env::var_os("GIT_DIR").is_some() {
            Repository::open_from_env()
        } else {
            Repository::discover(start)
        }
        .map_err(|e| git_err(&e))?;

        Ok(normalize(repo.path(), start))
    }

    fn name(&self) -> &'static str {
        "git2"
    }
}

/// Git directory discovery by running `git rev-parse --git-dir`
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandProvider;

impl GitDirProvider for CommandProvider {
    fn git_dir(&self, start: &Path) -> Result<PathBuf> {
        let output = duct::cmd!("git", "rev-parse", "--git-dir")
            .dir(start)
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|e| Error::GitDir(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::GitDir(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let dir = stdout.trim();
        if dir.is_empty() {
            return Err(Error::GitDir("git rev-parse printed nothing".to_string()));
        }

        Ok(normalize(Path::new(dir), start))
    }

    fn name(&self) -> &'static str {
        "git"
    }
}

/// Make `dir` absolute relative to `start` and drop trailing separators
fn normalize(dir: &Path, start: &Path) -> PathBuf {
    let absolute = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        start.join(dir)
    };
    absolute.components().collect()
}

/// Create git provider based on the `useBuiltinGit` setting
pub fn create_provider(use_builtin: AutoBool) -> Box<dyn GitDirProvider> {
    match use_builtin {
        AutoBool::False => Box::new(CommandProvider),
        AutoBool::Auto | AutoBool::True => Box::new(Git2Provider),
    }
}

/// Resolve the git directory for `start`
///
/// In `auto` mode a git2 failure falls back to the external command, and the
/// git2 error is reported if both fail.
pub fn resolve_git_dir(start: &Path, use_builtin: AutoBool) -> Result<PathBuf> {
    let provider = create_provider(use_builtin);
    match provider.git_dir(start) {
        Ok(dir) => {
            tracing::debug!(provider = provider.name(), "Found git directory");
            Ok(dir)
        }
        Err(err) if use_builtin == AutoBool::Auto => {
            tracing::debug!(
                error = %err,
                "{} discovery failed, trying {}",
                provider.name(),
                CommandProvider.name()
            );
            CommandProvider.git_dir(start).map_err(|_| err)
        }
        Err(err) => Err(err),
    }
}
