//! Status icons
//!
//! Nerd Font glyphs when icons are enabled, bracketed text otherwise.

use owo_colors::OwoColorize;

/// Icon constants
pub struct Icons;

impl Icons {
    // Nerd Font symbols
    pub const NERD_SUCCESS: &'static str = "\u{f00c}";
    pub const NERD_WARNING: &'static str = "\u{f071}";
    pub const NERD_INFO: &'static str = "\u{f05a}";
    pub const NERD_HOOK: &'static str = "\u{f0c1}";

    // Status icons (simple text)
    pub const STATUS_SUCCESS: &'static str = "[OK]";
    pub const STATUS_WARNING: &'static str = "[!]";
    pub const STATUS_INFO: &'static str = "[i]";
    pub const STATUS_HOOK: &'static str = "[*]";
}

/// Status indicator shown in front of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Success,
    Warning,
    Info,
    Hook,
}

impl StatusIcon {
    /// Get icon based on nerd_fonts setting
    pub fn get(self, use_nerd_fonts: bool) -> &'static str {
        match (self, use_nerd_fonts) {
            (Self::Success, true) => Icons::NERD_SUCCESS,
            (Self::Warning, true) => Icons::NERD_WARNING,
            (Self::Info, true) => Icons::NERD_INFO,
            (Self::Hook, true) => Icons::NERD_HOOK,
            (Self::Success, false) => Icons::STATUS_SUCCESS,
            (Self::Warning, false) => Icons::STATUS_WARNING,
            (Self::Info, false) => Icons::STATUS_INFO,
            (Self::Hook, false) => Icons::STATUS_HOOK,
        }
    }

    /// Color a glyph the way this status is shown
    pub fn paint(self, glyph: &str) -> String {
        match self {
            Self::Success => glyph.green().to_string(),
            Self::Warning => glyph.yellow().to_string(),
            Self::Info => glyph.blue().to_string(),
            Self::Hook => glyph.magenta().to_string(),
        }
    }
}
