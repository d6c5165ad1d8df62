//! Dispatch command implementation
//!
//! This is what the native hook stub execs. It must stay quiet on success:
//! git shows the hook's own output to the user.

use clap::Args;
use githook_core::Timing;
use githook_engine::{Dispatcher, HookInput};
use std::ffi::OsString;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Dispatch command
#[derive(Debug, Args)]
pub struct DispatchCommand {
    /// Hook timing git invoked
    #[arg(value_name = "TIMING")]
    pub timing: Timing,

    /// Arguments git passed to the native hook
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<OsString>,
}

impl Command for DispatchCommand {
    type Output = i32;

    fn execute(&self, context: &RuntimeContext) -> Result<i32> {
        let store = context.store()?;
        let input = HookInput::capture(self.timing)?;

        let outcome = Dispatcher::new(&store)
            .with_input(input)
            .run(self.timing, &self.args)?;

        Ok(outcome.code())
    }
}
