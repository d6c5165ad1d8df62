//! Native hook stubs
//!
//! git only runs the single file at `hooks/<timing>`. The stub written there
//! hands control to `githook dispatch`, which runs every installed hook.

use crate::dispatch::{HookInput, run_executable, spawn_failure_code};
use githook_core::{Error, Result, Timing};
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const STUB_TMP_PREFIX: &str = ".githook-stub-";

/// Result of [`ensure_stub`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubStatus {
    /// The stub was written
    Created,
    /// A file already existed and was left alone
    AlreadyPresent,
}

/// What currently occupies the native hook path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubState {
    /// Nothing
    Missing,
    /// The githook stub
    Generated,
    /// Some other hook
    Foreign,
}

/// Stub content for `timing`
#[must_use]
pub fn render_stub(timing: Timing) -> String {
    format!(
        "#!/bin/sh\n\
         # Generated by githook. Runs every hook in hooks/installed/{timing}.\n\
         exec githook dispatch {timing} \"$@\"\n"
    )
}

/// Native hook path for `timing`
#[must_use]
pub fn stub_path(hooks_dir: &Path, timing: Timing) -> PathBuf {
    hooks_dir.join(timing.as_str())
}

/// Write the stub for `timing` unless something already exists there
///
/// Existing files are never modified, even when they are stale or foreign.
///
/// # Errors
///
/// Returns an error if the hooks directory or stub cannot be written.
pub fn ensure_stub(hooks_dir: &Path, timing: Timing) -> Result<StubStatus> {
    let path = stub_path(hooks_dir, timing);
    if fs::symlink_metadata(&path).is_ok() {
        tracing::debug!(path = %path.display(), "Native hook already present");
        return Ok(StubStatus::AlreadyPresent);
    }

    fs::create_dir_all(hooks_dir)?;
    if !write_new(hooks_dir, &path, render_stub(timing).as_bytes())? {
        return Ok(StubStatus::AlreadyPresent);
    }

    tracing::debug!(path = %path.display(), "Created native hook stub");
    Ok(StubStatus::Created)
}

/// Write `content` to `path` unless it exists, returning whether it was written
///
/// The content goes to a temporary file in `dir` first. A failed write
/// leaves nothing at `path`.
fn write_new(dir: &Path, path: &Path, content: &[u8]) -> Result<bool> {
    let mut tmp = tempfile::Builder::new()
        .prefix(STUB_TMP_PREFIX)
        .tempfile_in(dir)?;
    tmp.write_all(content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o755))?;
    }

    match tmp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        // Lost a race with another writer
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.error.into()),
    }
}

/// Classify the file at the native hook path for `timing`
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn inspect_stub(hooks_dir: &Path, timing: Timing) -> Result<StubState> {
    let path = stub_path(hooks_dir, timing);
    match fs::read(&path) {
        Ok(content) if content == render_stub(timing).as_bytes() => Ok(StubState::Generated),
        Ok(_) => Ok(StubState::Foreign),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(StubState::Missing),
        // A directory or unreadable file is still something we must not touch
        Err(_) if fs::symlink_metadata(&path).is_ok() => Ok(StubState::Foreign),
        Err(e) => Err(e.into()),
    }
}

/// Run the native hook for `timing` the way git would
///
/// Returns the hook's exit code.
///
/// # Errors
///
/// - `NotInstalled` if there is no native hook
/// - `ChildExecutionFailure` if it cannot be started
pub fn run_stub(hooks_dir: &Path, timing: Timing, args: &[OsString]) -> Result<i32> {
    let path = stub_path(hooks_dir, timing);
    if fs::symlink_metadata(&path).is_err() {
        return Err(Error::NotInstalled {
            timing,
            name: timing.to_string(),
        });
    }

    tracing::debug!(path = %path.display(), "Running native hook");
    run_executable(&path, args, &HookInput::Inherit).map_err(|err| Error::ChildExecutionFailure {
        hook: path.display().to_string(),
        code: spawn_failure_code(&err),
        reason: err.to_string(),
    })
}
