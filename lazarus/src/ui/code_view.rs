//! Code panel: legacy and modern source, or their diff.
//!
//! Lines come pre-highlighted from the highlight worker. Until a matching
//! payload arrives the raw snapshot text is shown unstyled, so code appears
//! the moment the orchestrator reveals it.

use lazarus_core::presentation::{self, Side};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::Paragraph,
    Frame,
};

use crate::app::{AppState, CodeView, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

pub fn render_code(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.focus == PanelFocus::Code;
    match state.code_view {
        CodeView::Split => {
            let [top, bottom] = area
                .layout(&Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]));
            render_side(frame, top, Side::Legacy, focused, state, theme);
            render_side(frame, bottom, Side::Modern, focused, state, theme);
        }
        CodeView::Diff => render_diff(frame, area, focused, state, theme),
    }
}

fn render_side(
    frame: &mut Frame,
    area: Rect,
    side: Side,
    focused: bool,
    state: &AppState,
    theme: &Theme,
) {
    let title = presentation::code_title(side, state.view.metrics.as_ref());
    frame.render_widget(panel_block(title, focused, theme), area);

    let (raw, highlighted) = match side {
        Side::Legacy => (&state.view.legacy_code, &state.highlighted.legacy),
        Side::Modern => (&state.view.modern_code, &state.highlighted.modern),
    };
    let inner = inner_rect(area);
    let paragraph = if raw.is_empty() {
        Paragraph::new(Line::styled("(waiting for agent)", Style::default().fg(theme.muted)))
    } else if highlighted.is_empty() {
        Paragraph::new(Text::raw(raw.as_str())).scroll((state.code_scroll, 0))
    } else {
        Paragraph::new(visible(highlighted, state.code_scroll, inner.height))
    };
    frame.render_widget(paragraph, inner);
}

fn render_diff(frame: &mut Frame, area: Rect, focused: bool, state: &AppState, theme: &Theme) {
    frame.render_widget(panel_block("Legacy → Modern Diff", focused, theme), area);
    let inner = inner_rect(area);
    let text = if state.highlighted.diff.is_empty() {
        Text::from(Line::styled(
            "(diff appears once the modern source is generated)",
            Style::default().fg(theme.muted),
        ))
    } else {
        visible(&state.highlighted.diff, state.code_scroll, inner.height)
    };
    frame.render_widget(Paragraph::new(text), inner);
}

/// Only the lines inside the viewport, so each frame clones O(viewport) lines.
fn visible(lines: &[Line<'static>], scroll: u16, height: u16) -> Text<'static> {
    let start = usize::from(scroll).min(lines.len().saturating_sub(1));
    let end = (start + usize::from(height)).min(lines.len());
    Text::from(lines[start..end].to_vec())
}
