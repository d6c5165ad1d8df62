//! Terminal output helpers
//!
//! Colors and icons follow the `[ui]` config section and are only turned on
//! automatically when stdout is a terminal.

pub mod icons;

pub use icons::StatusIcon;

use githook_config::UiConfig;
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Resolved output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
    /// Emit ANSI colors
    pub color: bool,
    /// Use Nerd Font icons
    pub icons: bool,
}

impl Theme {
    /// Resolve the UI config against stdout
    #[must_use]
    pub fn for_stdout(ui: &UiConfig) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        Self {
            color: ui.color.enabled(is_tty),
            icons: ui.icons.enabled(is_tty),
        }
    }

    /// Section heading
    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Hook or timing name
    pub fn name(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    /// Secondary detail such as a path
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// A line prefixed with a status icon
    pub fn status(&self, icon: StatusIcon, message: &str) -> String {
        let glyph = icon.get(self.icons);
        if self.color {
            format!("{} {message}", icon.paint(glyph))
        } else {
            format!("{glyph} {message}")
        }
    }
}
