//! Screen layout for lazarus.
//!
//! Pure layout arithmetic, recomputed on every draw so each frame reflects
//! the live terminal size.
//!
//! ```text
//! ┌ trigger ┐┌ metrics ──────────────────────────────┐
//! ┌ code ─────────────────┐┌ agent log ─────────────┐
//! │ legacy / modern       ││                        │
//! │ (or diff)             │├ verification ──────────┤
//! └───────────────────────┘└────────────────────────┘
//!  status bar
//! ```
//!
//! Below 100 columns the code panel stacks above the log and table.

use ratatui::{
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use crate::app::{AppState, Mode, PanelFocus};
use crate::theme::Theme;

/// Rects for every region of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub controls: Rect,
    pub code: Rect,
    pub log: Rect,
    pub results: Rect,
    pub status_bar: Rect,
}

/// Computes the layout for `area`.
///
/// The verification table gets one row per result plus header and borders,
/// bounded to 5..=12 rows; the agent log takes the rest of its column.
pub fn compute_layout(area: Rect, result_count: usize) -> AppLayout {
    let [controls, main, status_bar] = area.layout(&Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]));

    let [code, side] = if area.width >= 100 {
        main.layout(
            &Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .spacing(Spacing::Overlap(1)),
        )
    } else {
        main.layout(&Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]))
    };

    let table_height = u16::try_from(result_count + 3).unwrap_or(u16::MAX).clamp(5, 12);
    let [log, results] = side.layout(
        &Layout::vertical([Constraint::Fill(1), Constraint::Length(table_height)])
            .spacing(Spacing::Overlap(1)),
    );

    AppLayout { controls, code, log, results, status_bar }
}

/// The inner `Rect` of a bordered panel.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Bordered panel block; thick and accent-colored when focused.
///
/// `MergeStrategy::Fuzzy` keeps junctions correct where thick and plain
/// borders of overlapping panels meet.
pub fn panel_block<'a>(title: impl Into<Line<'a>>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let color = if is_focused { theme.border_active } else { theme.border_inactive };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(Style::default().fg(color))
        .merge_borders(MergeStrategy::Fuzzy)
}

/// One-row status bar: backend URL, focused panel, and key hints.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    base_url: &str,
    theme: &Theme,
) {
    let focus = match state.focus {
        PanelFocus::Code => " CODE ",
        PanelFocus::Log => " LOG ",
        PanelFocus::Results => " RESULTS ",
    };
    let hints = match state.mode {
        Mode::HelpOverlay => "  j/k scroll  ? close",
        Mode::Normal => "  Enter run  Tab focus  d diff  ? help  q quit",
    };

    let line = Line::from(vec![
        Span::styled(
            focus,
            Style::default().fg(theme.status_accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {base_url}")),
        Span::styled(hints, Style::default().fg(theme.muted)),
    ]);

    frame.render_widget(
        Paragraph::new(line)
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
