//! Color theme system for lazarus.
//!
//! Two built-in themes:
//!
//! - `github-dark`: the GitHub dark palette in RGB; requires truecolor.
//! - `dark`: ANSI 16 colors, safe on any terminal.

use lazarus_core::presentation::{Badge, Tone};
use ratatui::style::Color;

/// All color values used across the lazarus UI.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // Panel borders
    pub border_active: Color,
    pub border_inactive: Color,

    // Agent log
    /// Failure and error-detail lines.
    pub log_alert: Color,
    /// Success lines.
    pub log_success: Color,
    /// Everything else.
    pub log_neutral: Color,

    // Trigger control
    pub trigger_idle: Color,
    pub trigger_busy: Color,

    // Metrics panel
    /// Legacy complexity card.
    pub metric_bad: Color,
    /// Modern complexity card.
    pub metric_good: Color,
    /// Improvement badge.
    pub metric_badge: Color,

    // Verification table
    pub badge_pass: Color,
    pub badge_fail: Color,
    pub table_header: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_accent: Color,

    /// Placeholder text in empty panels.
    pub muted: Color,
}

impl Theme {
    /// ANSI 16-color theme. The fallback for unknown names.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            log_alert: Color::Red,
            log_success: Color::Green,
            log_neutral: Color::Reset,

            trigger_idle: Color::Cyan,
            trigger_busy: Color::Yellow,

            metric_bad: Color::Red,
            metric_good: Color::Green,
            metric_badge: Color::Magenta,

            badge_pass: Color::Green,
            badge_fail: Color::Red,
            table_header: Color::Cyan,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_accent: Color::Cyan,

            muted: Color::DarkGray,
        }
    }

    /// GitHub dark palette. Log colors match the web dashboard this client replaces.
    pub fn github_dark() -> Self {
        let red = Color::Rgb(255, 123, 114); // #ff7b72
        let green = Color::Rgb(126, 231, 135); // #7ee787
        let fg = Color::Rgb(201, 209, 217); // #c9d1d9
        let blue = Color::Rgb(88, 166, 255); // #58a6ff
        let purple = Color::Rgb(210, 168, 255); // #d2a8ff
        let yellow = Color::Rgb(227, 179, 65); // #e3b341
        let gray = Color::Rgb(139, 148, 158); // #8b949e
        let border = Color::Rgb(48, 54, 61); // #30363d
        let canvas = Color::Rgb(22, 27, 34); // #161b22

        Self {
            border_active: blue,
            border_inactive: border,

            log_alert: red,
            log_success: green,
            log_neutral: fg,

            trigger_idle: blue,
            trigger_busy: yellow,

            metric_bad: red,
            metric_good: green,
            metric_badge: purple,

            badge_pass: green,
            badge_fail: red,
            table_header: blue,

            status_bar_bg: canvas,
            status_bar_fg: fg,
            status_accent: blue,

            muted: gray,
        }
    }

    /// Resolves a theme name from config. Unknown names fall back to `dark()`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "github-dark" | "github_dark" => Self::github_dark(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }

    /// Foreground for an agent log line of the given tone.
    pub fn tone(&self, tone: Tone) -> Color {
        match tone {
            Tone::Alert => self.log_alert,
            Tone::Success => self.log_success,
            Tone::Neutral => self.log_neutral,
        }
    }

    /// Foreground for a verification badge.
    pub fn badge(&self, badge: Badge) -> Color {
        match badge {
            Badge::Match => self.badge_pass,
            Badge::Fail => self.badge_fail,
        }
    }
}
