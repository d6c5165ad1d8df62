//! Common utilities and types shared across CLI commands

use githook_config::Config;
use githook_core::Error;
use githook_engine::{HookStore, HttpFetcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::ui::Theme;

/// Runtime context for CLI commands
///
/// Holds the loaded configuration and the located git directory, so each
/// command receives one value instead of re-resolving them.
///
/// # Examples
///
/// ```no_run
/// use githook::common::RuntimeContext;
/// use githook_config::Config;
/// use std::path::PathBuf;
///
/// let context = RuntimeContext::new(Config::default(), None, Ok(PathBuf::from("/repo/.git")));
/// let store = context.store()?;
/// # Ok::<(), githook::error::CommandError>(())
/// ```
#[derive(Clone)]
pub struct RuntimeContext {
    /// Shared configuration (uses Arc to avoid cloning)
    pub config: Arc<Config>,
    /// Config file the configuration was read from, if any
    pub config_path: Option<PathBuf>,
    /// Located git directory, or why it could not be found
    git_dir: std::result::Result<PathBuf, String>,
}

impl RuntimeContext {
    /// Create a context from already-resolved parts
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        git_dir: std::result::Result<PathBuf, String>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            config_path,
            git_dir,
        }
    }

    /// Load configuration and locate the git directory
    ///
    /// A missing repository is not an error here: commands that need one
    /// fail when they ask for [`RuntimeContext::store`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn load(git_dir: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
        let (config, config_path) = Config::load_or_default(config_path)?;

        let git_dir = match git_dir {
            Some(dir) => std::path::absolute(dir).map_err(|e| e.to_string()),
            None => std::env::current_dir()
                .map_err(Error::from)
                .and_then(|cwd| {
                    githook_config::resolve_git_dir(&cwd, config.general.use_builtin_git)
                })
                .map_err(|e| e.to_string()),
        };

        match &git_dir {
            Ok(dir) => tracing::debug!(git_dir = %dir.display(), "Using git directory"),
            Err(reason) => tracing::debug!(%reason, "No git directory"),
        }

        Ok(Self::new(config, config_path, git_dir))
    }

    /// The git directory
    ///
    /// # Errors
    ///
    /// Returns `GitDir` if no repository was found.
    pub fn git_dir(&self) -> Result<&Path> {
        self.git_dir
            .as_deref()
            .map_err(|reason| Error::GitDir(format!("not inside a git repository: {reason}")).into())
    }

    /// Hook store of the current repository
    ///
    /// # Errors
    ///
    /// Returns `GitDir` if no repository was found.
    pub fn store(&self) -> Result<HookStore> {
        Ok(HookStore::new(self.git_dir()?))
    }

    /// HTTP fetcher configured from the `[fetch]` section
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn fetcher(&self) -> Result<HttpFetcher> {
        let fetch = &self.config.fetch;
        Ok(
            HttpFetcher::new(&fetch.user_agent, Duration::from_secs(fetch.timeout))?
                .with_gist_base_url(&fetch.gist_base_url),
        )
    }

    /// Output theme for stdout
    pub fn theme(&self) -> Theme {
        Theme::for_stdout(&self.config.ui)
    }
}
