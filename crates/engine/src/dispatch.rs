//! Hook dispatch
//!
//! Runs every hook installed for a timing, in sorted order, as an AND-chain:
//! the first hook that exits nonzero (or cannot be started) stops the chain
//! and its code becomes the result.

use crate::store::HookStore;
use githook_core::{Error, HookName, Result, Timing};
use std::ffi::OsString;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitStatus;

/// Exit code for a hook that exists but cannot be executed
const CODE_CANNOT_EXECUTE: i32 = 126;

/// Exit code for a hook (or its interpreter) that cannot be found
const CODE_NOT_FOUND: i32 = 127;

/// Standard input handed to each hook
#[derive(Debug, Clone, Default)]
pub enum HookInput {
    /// Inherit the dispatcher's stdin
    #[default]
    Inherit,
    /// Feed every hook the same bytes
    Bytes(Vec<u8>),
}

impl HookInput {
    /// Capture stdin for timings git feeds data to, inherit it otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read.
    pub fn capture(timing: Timing) -> Result<Self> {
        if !timing.reads_stdin() {
            return Ok(Self::Inherit);
        }

        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        tracing::debug!(bytes = buf.len(), "Buffered hook input");
        Ok(Self::Bytes(buf))
    }
}

/// Result of a dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Every hook exited 0 (or there were none)
    Completed {
        /// Number of hooks run
        ran: usize,
    },
    /// A hook failed and later hooks were skipped
    Stopped {
        /// The failing hook
        hook: HookName,
        /// Its exit code
        code: i32,
    },
}

impl DispatchOutcome {
    /// Process exit code to report back to git
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Completed { .. } => 0,
            Self::Stopped { code, .. } => *code,
        }
    }
}

/// Runs the hooks installed in a [`HookStore`]
pub struct Dispatcher<'a> {
    store: &'a HookStore,
    input: HookInput,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher whose hooks inherit stdin
    #[must_use]
    pub fn new(store: &'a HookStore) -> Self {
        Self {
            store,
            input: HookInput::Inherit,
        }
    }

    /// Set the standard input given to hooks
    #[must_use]
    pub fn with_input(mut self, input: HookInput) -> Self {
        self.input = input;
        self
    }

    /// Run all hooks for `timing` with `args`
    ///
    /// Hooks inherit stdout, stderr, the working directory and environment.
    ///
    /// # Errors
    ///
    /// Returns an error only if the installed hooks cannot be listed. Hook
    /// failures are reported through [`DispatchOutcome::Stopped`].
    #[tracing::instrument(skip_all, fields(%timing))]
    pub fn run(&self, timing: Timing, args: &[OsString]) -> Result<DispatchOutcome> {
        let names = self.store.list(timing)?;
        tracing::debug!(count = names.len(), "Dispatching hooks");

        for name in &names {
            let path = self.store.hook_path(timing, name);
            let code = self.run_hook(&path, name, args);
            if code != 0 {
                tracing::debug!(hook = %name, code, "Hook failed, stopping");
                return Ok(DispatchOutcome::Stopped {
                    hook: name.clone(),
                    code,
                });
            }
        }

        Ok(DispatchOutcome::Completed { ran: names.len() })
    }

    fn run_hook(&self, path: &Path, name: &HookName, args: &[OsString]) -> i32 {
        tracing::debug!(hook = %name, "Running hook");

        run_executable(path, args, &self.input).unwrap_or_else(|err| {
            let code = spawn_failure_code(&err);
            let failure = Error::ChildExecutionFailure {
                hook: name.to_string(),
                code,
                reason: err.to_string(),
            };
            tracing::error!("{failure}");
            code
        })
    }
}

/// Run `path` with `args` to completion and return its exit code
///
/// stdout, stderr, the working directory and environment are inherited.
pub(crate) fn run_executable(path: &Path, args: &[OsString], input: &HookInput) -> io::Result<i32> {
    let mut expression = duct::cmd(path, args).unchecked();
    if let HookInput::Bytes(bytes) = input {
        expression = expression.stdin_bytes(bytes.clone());
    }
    expression.run().map(|output| exit_code(output.status))
}

/// Exit code reported for a child that could not be started
pub(crate) fn spawn_failure_code(err: &io::Error) -> i32 {
    if err.kind() == io::ErrorKind::NotFound {
        CODE_NOT_FOUND
    } else {
        CODE_CANNOT_EXECUTE
    }
}

/// Exit code of a finished child, `128 + signal` if it was killed
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
