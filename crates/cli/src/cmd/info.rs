//! Info command implementation
//!
//! Display githook build information and the hook status of the current
//! repository.

use clap::Args;
use githook_core::Timing;
use githook_engine::stub::{self, StubState};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use crate::ui::{StatusIcon, Theme};

const NOT_FOUND: &str = "not found";
const DEFAULT_CONFIG: &str = "defaults (no config file)";

/// Information about githook and the repository
#[derive(Debug, Serialize)]
struct InfoData {
    version: &'static str,
    build: BuildInfo,
    config: Option<String>,
    git_dir: Option<String>,
    timings: Vec<TimingInfo>,
}

#[derive(Debug, Serialize)]
struct BuildInfo {
    rustc: Option<&'static str>,
    timestamp: Option<&'static str>,
    git_sha: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct TimingInfo {
    timing: Timing,
    stub: StubLabel,
    hooks: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum StubLabel {
    Missing,
    Generated,
    Foreign,
}

impl From<StubState> for StubLabel {
    fn from(state: StubState) -> Self {
        match state {
            StubState::Missing => Self::Missing,
            StubState::Generated => Self::Generated,
            StubState::Foreign => Self::Foreign,
        }
    }
}

/// Info command
#[derive(Debug, Args)]
pub struct InfoCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

impl Command for InfoCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let info = gather_info(context)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&info)?);
        } else {
            print!("{}", render_text(&info, &context.theme()));
        }
        Ok(())
    }
}

fn gather_info(context: &RuntimeContext) -> Result<InfoData> {
    debug!("Gathering info");

    let build = BuildInfo {
        rustc: option_env!("VERGEN_RUSTC_SEMVER"),
        timestamp: option_env!("VERGEN_BUILD_TIMESTAMP"),
        git_sha: option_env!("VERGEN_GIT_SHA"),
    };

    let (git_dir, timings) = match context.store() {
        Ok(store) => {
            let timings = timing_info(&store.hooks_dir(), |timing| store.list(timing))?;
            (Some(store.git_dir().display().to_string()), timings)
        }
        Err(err) => {
            debug!(error = %err, "No repository");
            (None, Vec::new())
        }
    };

    Ok(InfoData {
        version: env!("CARGO_PKG_VERSION"),
        build,
        config: context
            .config_path
            .as_ref()
            .map(|p| p.display().to_string()),
        git_dir,
        timings,
    })
}

fn timing_info<F, T>(hooks_dir: &Path, list: F) -> Result<Vec<TimingInfo>>
where
    F: Fn(Timing) -> githook_core::Result<Vec<T>>,
{
    Timing::ALL
        .into_iter()
        .map(|timing| -> Result<TimingInfo> {
            Ok(TimingInfo {
                timing,
                stub: stub::inspect_stub(hooks_dir, timing)?.into(),
                hooks: list(timing)?.len(),
            })
        })
        .collect()
}

fn render_text(info: &InfoData, theme: &Theme) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}{}",
        theme.heading("githook"),
        info.version,
        info.build
            .git_sha
            .map(|sha| format!(" ({})", sha.get(..8).unwrap_or(sha)))
            .unwrap_or_default()
    );
    let _ = writeln!(
        out,
        "  config:  {}",
        info.config.as_deref().unwrap_or(DEFAULT_CONFIG)
    );
    let _ = writeln!(
        out,
        "  git dir: {}",
        info.git_dir.as_deref().unwrap_or(NOT_FOUND)
    );

    // Only timings with something to report
    let active: Vec<&TimingInfo> = info
        .timings
        .iter()
        .filter(|t| t.stub != StubLabel::Missing || t.hooks > 0)
        .collect();

    if info.git_dir.is_some() {
        if active.is_empty() {
            let _ = writeln!(out, "{}", theme.status(StatusIcon::Info, "No hooks installed"));
        } else {
            let _ = writeln!(out, "{}", theme.heading("Hooks:"));
        }
    }

    for t in active {
        let (icon, label) = match t.stub {
            StubLabel::Generated => (StatusIcon::Success, "stub"),
            StubLabel::Foreign => (StatusIcon::Warning, "foreign hook"),
            StubLabel::Missing => (StatusIcon::Warning, "no stub"),
        };
        let line = format!(
            "{:<20} {:>3} installed, {label}",
            theme.name(t.timing.as_str()),
            t.hooks
        );
        let _ = writeln!(out, "  {}", theme.status(icon, &line));
    }

    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_timing_info_reports_stub_and_count() {
        let temp = TempDir::new().unwrap();
        stub::ensure_stub(temp.path(), Timing::PreCommit).unwrap();
        fs::write(stub::stub_path(temp.path(), Timing::PostMerge), "custom").unwrap();

        let info = timing_info(temp.path(), |timing| {
            Ok(if timing == Timing::PreCommit { vec![(); 2] } else { Vec::new() })
        })
        .unwrap();

        let pre_commit = info.iter().find(|t| t.timing == Timing::PreCommit).unwrap();
        assert_eq!(pre_commit.stub, StubLabel::Generated);
        assert_eq!(pre_commit.hooks, 2);

        let post_merge = info.iter().find(|t| t.timing == Timing::PostMerge).unwrap();
        assert_eq!(post_merge.stub, StubLabel::Foreign);
        assert_eq!(info.len(), Timing::ALL.len());
    }

    #[test]
    fn test_render_text_without_repository() {
        let info = InfoData {
            version: "1.2.3",
            build: BuildInfo {
                rustc: None,
                timestamp: None,
                git_sha: Some("0123456789abcdef"),
            },
            config: None,
            git_dir: None,
            timings: Vec::new(),
        };

        let text = render_text(&info, &Theme::default());
        assert!(text.starts_with("githook 1.2.3 (01234567)\n"));
        assert!(text.contains("git dir: not found"));
        assert!(text.contains(DEFAULT_CONFIG));
    }

    #[test]
    fn test_render_text_lists_active_timings() {
        let info = InfoData {
            version: "1.2.3",
            build: BuildInfo {
                rustc: None,
                timestamp: None,
                git_sha: None,
            },
            config: Some("/home/u/.config/githook/config.toml".to_string()),
            git_dir: Some("/repo/.git".to_string()),
            timings: vec![
                TimingInfo {
                    timing: Timing::PreCommit,
                    stub: StubLabel::Generated,
                    hooks: 2,
                },
                TimingInfo {
                    timing: Timing::PostMerge,
                    stub: StubLabel::Missing,
                    hooks: 0,
                },
            ],
        };

        let text = render_text(&info, &Theme::default());
        assert!(text.contains("pre-commit"));
        assert!(text.contains("2 installed, stub"));
        assert!(!text.contains("post-merge"));
    }
}
