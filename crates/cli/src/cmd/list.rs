//! List command implementation

use clap::{Args, ValueEnum};
use githook_core::{HookName, Timing};
use serde::Serialize;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use crate::ui::Theme;

/// Output format for `githook list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ListFormat {
    /// `timing:` followed by indented hook names
    #[default]
    Simple,
    /// Machine-readable JSON
    Json,
}

/// List command
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show these timings (default: all)
    #[arg(value_name = "TIMING")]
    pub timings: Vec<Timing>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Simple)]
    pub format: ListFormat,
}

#[derive(Debug, Serialize)]
struct TimingHooks {
    timing: Timing,
    hooks: Vec<HookName>,
}

impl Command for ListCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let store = context.store()?;

        let listing = Timing::ALL
            .into_iter()
            .filter(|timing| self.timings.is_empty() || self.timings.contains(timing))
            .map(|timing| -> Result<TimingHooks> {
                Ok(TimingHooks {
                    timing,
                    hooks: store.list(timing)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        match self.format {
            ListFormat::Json => println!("{}", serde_json::to_string_pretty(&listing)?),
            ListFormat::Simple => print!("{}", render_simple(&listing, &context.theme())),
        }
        Ok(())
    }
}

fn render_simple(listing: &[TimingHooks], theme: &Theme) -> String {
    let mut out = String::new();
    for entry in listing {
        out.push_str(&theme.heading(&format!("{}:", entry.timing)));
        out.push('\n');
        for name in &entry.hooks {
            out.push_str("  ");
            out.push_str(&theme.name(&name.to_string()));
            out.push('\n');
        }
    }
    out
}
