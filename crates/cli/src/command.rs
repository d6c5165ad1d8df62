//! Command trait for the githook CLI
//!
//! This module defines the `Command` trait that all githook commands implement.
//! It provides a uniform interface for command execution, making it easier to
//! test, extend, and maintain commands.

use crate::common::RuntimeContext;
use crate::error::Result;

/// Trait for all githook commands
///
/// The `execute` method receives a `RuntimeContext` containing the loaded
/// configuration and the repository's git directory.
///
/// Commands can specify their return type via the `Output` associated type.
/// Most commands return `()`. `dispatch` and `test` return the exit code of
/// the hooks they ran.
///
/// # Example
///
/// ```rust,ignore
/// use crate::command::Command;
/// use crate::common::RuntimeContext;
/// use crate::error::Result;
/// use clap::Args;
///
/// #[derive(Debug, Args)]
/// pub struct MyCommand {
///     #[arg(short, long)]
///     pub some_flag: bool,
/// }
///
/// impl Command for MyCommand {
///     type Output = ();
///
///     fn execute(&self, context: &RuntimeContext) -> Result<()> {
///         let store = context.store()?;
///         Ok(())
///     }
/// }
/// ```
pub trait Command {
    /// The type returned by this command
    type Output;

    /// Execute the command with the given runtime context
    ///
    /// # Errors
    ///
    /// Returns a `CommandError` if the command fails to execute. Error messages should
    /// be descriptive enough for the user to understand what went wrong.
    fn execute(&self, context: &RuntimeContext) -> Result<Self::Output>;
}
