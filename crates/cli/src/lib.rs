//! githook CLI library
//!
//! This library contains all the CLI logic for githook, making it reusable
//! for testing and integration with other tools.

pub mod cmd;
pub mod command;
pub mod common;
pub mod error;
pub mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use command::Command;
use common::RuntimeContext;
use error::Result;

/// githook - run several hooks per git hook timing
#[derive(Parser)]
#[command(name = "githook")]
#[command(about = "Install and run multiple git hooks per timing")]
#[command(version)]
#[command(long_about = "Install and run multiple git hooks per timing

git runs exactly one hook file per event. githook keeps any number of hooks
under .git/hooks/installed/<timing>/ and installs a small stub at
.git/hooks/<timing> that runs them in name order, stopping at the first
failure.

Hooks can be installed from:
  • a local file        githook install pre-commit ./scripts/lint.sh
  • an http(s) URL      githook install pre-push https://example.com/check
  • a GitHub gist       githook install commit-msg gist:123456")]
pub struct Cli {
    /// Use this git directory instead of discovering one
    #[arg(long, env = "GITHOOK_GIT_DIR", value_name = "DIR", global = true)]
    pub git_dir: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, env = "GITHOOK_CONFIG", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "GITHOOK_LOG_FILE", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the githook CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Install a hook from a file, URL or gist
    Install(cmd::install::InstallCommand),

    /// Remove an installed hook
    Uninstall(cmd::uninstall::UninstallCommand),

    /// List installed hooks
    List(cmd::list::ListCommand),

    /// Run every hook installed for a timing (called by the native hook stub)
    #[command(hide = true)]
    Dispatch(cmd::dispatch::DispatchCommand),

    /// Run the native hook for a timing the way git would
    Test(cmd::test::TestCommand),

    /// Show version, repository and hook status
    Info(cmd::info::InfoCommand),
}

/// Execute a command, returning the process exit code
fn execute_command(command: Commands, context: &RuntimeContext) -> Result<i32> {
    match command {
        Commands::Install(cmd) => cmd.execute(context).map(|()| 0),
        Commands::Uninstall(cmd) => cmd.execute(context).map(|()| 0),
        Commands::List(cmd) => cmd.execute(context).map(|()| 0),
        Commands::Dispatch(cmd) => cmd.execute(context),
        Commands::Test(cmd) => cmd.execute(context),
        Commands::Info(cmd) => cmd.execute(context).map(|()| 0),
    }
}

/// Main entry point for the CLI application
///
/// # Errors
///
/// Returns an error if logging, configuration or the command itself fails.
pub fn run(cli: Cli) -> Result<i32> {
    // Initialize logging based on verbosity
    githook_config::logging::init(cli.verbose, cli.log_file.as_deref())?;

    let context = RuntimeContext::load(cli.git_dir.as_deref(), cli.config.as_deref())?;

    execute_command(cli.command, &context)
}
