//! Installed hook storage
//!
//! Hooks live at `<gitdir>/hooks/installed/<timing>/<name>`. The store owns
//! that tree. The dispatcher only reads it.

use crate::fetch::Fetcher;
use crate::source::{HookSource, InstallMode, PARTIAL_PREFIX};
use githook_core::{Error, HookName, Result, Timing};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Options for [`HookStore::install`]
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Replace a hook that is already installed under the same name
    pub overwrite: bool,
    /// Copy the content or link to it
    pub mode: InstallMode,
}

/// Per-repository hook store rooted at the git metadata directory
#[derive(Debug, Clone)]
pub struct HookStore {
    git_dir: PathBuf,
}

impl HookStore {
    /// Create a store for the repository whose git directory is `git_dir`
    pub fn new(git_dir: impl Into<PathBuf>) -> Self {
        Self {
            git_dir: git_dir.into(),
        }
    }

    /// The git metadata directory
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Directory git looks for native hooks in
    #[must_use]
    pub fn hooks_dir(&self) -> PathBuf {
        self.git_dir.join("hooks")
    }

    /// Root of all installed hooks
    #[must_use]
    pub fn installed_root(&self) -> PathBuf {
        self.hooks_dir().join("installed")
    }

    /// Directory holding the hooks installed for `timing`
    #[must_use]
    pub fn installed_dir(&self, timing: Timing) -> PathBuf {
        self.installed_root().join(timing.as_str())
    }

    /// Path an installed hook lives at
    #[must_use]
    pub fn hook_path(&self, timing: Timing, name: &HookName) -> PathBuf {
        self.installed_dir(timing).join(name.as_path())
    }

    /// Install `source` for `timing` under `name`
    ///
    /// Returns the installed path.
    ///
    /// # Errors
    ///
    /// - `AlreadyInstalled` if the name is taken and `overwrite` is off
    /// - `InvalidHookName` if a directory already occupies the name
    /// - `LinkUnsupported` when linking a remote source
    /// - any materialization error of the source
    #[tracing::instrument(skip_all, fields(%timing, %name, %source))]
    pub fn install(
        &self,
        timing: Timing,
        name: &HookName,
        source: &HookSource,
        options: InstallOptions,
        fetcher: &dyn Fetcher,
    ) -> Result<PathBuf> {
        if options.mode == InstallMode::Link && !source.is_local() {
            return Err(Error::LinkUnsupported {
                specifier: source.to_string(),
            });
        }

        let destination = self.hook_path(timing, name);

        match fs::symlink_metadata(&destination) {
            Ok(meta) if meta.is_dir() => {
                return Err(Error::InvalidHookName {
                    name: name.to_string(),
                    reason: "a directory with this name exists".to_string(),
                });
            }
            Ok(_) if !options.overwrite => {
                return Err(Error::AlreadyInstalled {
                    timing,
                    name: name.to_string(),
                });
            }
            // Copies replace the old file by rename, links need the path free
            Ok(_) if options.mode == InstallMode::Link => {
                tracing::debug!("Removing existing hook before linking");
                fs::remove_file(&destination)?;
            }
            Ok(_) => tracing::debug!("Replacing existing hook"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        source.materialize(&destination, options.mode, fetcher)?;
        tracing::debug!(path = %destination.display(), "Installed hook");
        Ok(destination)
    }

    /// Hooks installed for `timing`, in dispatch order
    ///
    /// Walks the timing directory recursively. Regular files and symlinks
    /// that do not resolve to a directory are listed, dangling links
    /// included. A missing directory yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory tree cannot be read.
    pub fn list(&self, timing: Timing) -> Result<Vec<HookName>> {
        let dir = self.installed_dir(timing);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).follow_links(false) {
            let entry = entry.map_err(io::Error::from)?;
            let file_type = entry.file_type();

            let listed = file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir());
            if !listed || is_partial(entry.path()) {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&dir)
                .map_err(|e| Error::Message(format!("Unexpected path in store: {e}")))?;
            names.push(HookName::new(relative.to_path_buf())?);
        }

        names.sort();
        Ok(names)
    }

    /// Remove the hook installed for `timing` under `name`
    ///
    /// Subdirectories left empty by the removal are pruned.
    ///
    /// # Errors
    ///
    /// Returns `NotInstalled` if nothing (or only a directory) exists there.
    pub fn uninstall(&self, timing: Timing, name: &HookName) -> Result<()> {
        let path = self.hook_path(timing, name);
        let not_installed = || Error::NotInstalled {
            timing,
            name: name.to_string(),
        };

        match fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_dir() => return Err(not_installed()),
            Ok(_) => fs::remove_file(&path)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(not_installed()),
            Err(e) => return Err(e.into()),
        }
        tracing::debug!(path = %path.display(), "Removed hook");

        self.prune_empty_parents(timing, &path);
        Ok(())
    }

    fn prune_empty_parents(&self, timing: Timing, removed: &Path) {
        let root = self.installed_dir(timing);
        let mut current = removed.parent();
        while let Some(dir) = current {
            if dir == root || fs::remove_dir(dir).is_err() {
                break;
            }
            current = dir.parent();
        }
    }
}

fn is_partial(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(PARTIAL_PREFIX))
}
