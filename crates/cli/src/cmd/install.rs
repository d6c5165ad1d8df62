//! Install command implementation
//!
//! Resolves a specifier into a hook source, stores it under
//! `hooks/installed/<timing>/<name>` and makes sure git will call it.

use clap::Args;
use githook_core::{Error, HookName, Timing};
use githook_engine::stub::{self, StubState, StubStatus};
use githook_engine::{HookSource, InstallMode, InstallOptions};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use crate::ui::StatusIcon;

/// Install command
#[derive(Debug, Args)]
pub struct InstallCommand {
    /// Hook timing (e.g. pre-commit)
    #[arg(value_name = "TIMING")]
    pub timing: Timing,

    /// Local path, http(s) URL or gist:<id>
    #[arg(value_name = "SPECIFIER")]
    pub specifier: String,

    /// Install under this name instead of the one derived from the specifier
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Replace a hook already installed under the same name
    #[arg(short, long)]
    pub force: bool,

    /// Symlink a local file instead of copying it
    #[arg(long)]
    pub link: bool,
}

impl InstallCommand {
    fn hook_name(&self, source: &HookSource) -> Result<HookName> {
        match &self.name {
            Some(name) => Ok(HookName::parse(name)?),
            None => source.default_name().ok_or_else(|| {
                Error::MissingHookName {
                    specifier: self.specifier.clone(),
                }
                .into()
            }),
        }
    }
}

impl Command for InstallCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let source = HookSource::resolve(&self.specifier)?;
        let name = self.hook_name(&source)?;
        let options = InstallOptions {
            overwrite: self.force,
            mode: if self.link {
                InstallMode::Link
            } else {
                InstallMode::Copy
            },
        };

        let store = context.store()?;
        let fetcher = context.fetcher()?;
        let path = store.install(self.timing, &name, &source, options, &fetcher)?;

        let theme = context.theme();
        println!(
            "{}",
            theme.status(
                StatusIcon::Success,
                &format!(
                    "Installed {} for {} {}",
                    theme.name(&name.to_string()),
                    self.timing,
                    theme.dim(&format!("({})", path.display()))
                )
            )
        );

        let hooks_dir = store.hooks_dir();
        match stub::ensure_stub(&hooks_dir, self.timing)? {
            StubStatus::Created => println!(
                "{}",
                theme.status(
                    StatusIcon::Hook,
                    &format!(
                        "Created native hook {}",
                        theme.dim(&stub::stub_path(&hooks_dir, self.timing).display().to_string())
                    )
                )
            ),
            StubStatus::AlreadyPresent => {
                if stub::inspect_stub(&hooks_dir, self.timing)? == StubState::Foreign {
                    tracing::warn!(
                        "{} was not created by githook, installed {} hooks only run if it calls `githook dispatch {}`",
                        stub::stub_path(&hooks_dir, self.timing).display(),
                        self.timing,
                        self.timing
                    );
                }
            }
        }

        Ok(())
    }
}
