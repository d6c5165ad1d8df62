//! Uninstall command implementation

use clap::Args;
use githook_core::{HookName, Timing};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use crate::ui::StatusIcon;

/// Uninstall command
#[derive(Debug, Args)]
pub struct UninstallCommand {
    /// Hook timing (e.g. pre-commit)
    #[arg(value_name = "TIMING")]
    pub timing: Timing,

    /// Installed hook name, as shown by `githook list`
    #[arg(value_name = "NAME")]
    pub name: String,
}

impl Command for UninstallCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let name = HookName::parse(&self.name)?;
        context.store()?.uninstall(self.timing, &name)?;

        // The native stub stays: it is harmless with no hooks installed
        let theme = context.theme();
        println!(
            "{}",
            theme.status(
                StatusIcon::Success,
                &format!("Removed {} from {}", theme.name(&self.name), self.timing)
            )
        );
        Ok(())
    }
}
