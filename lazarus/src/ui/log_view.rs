//! Agent decision log panel.
//!
//! Each line is colored and indented by `presentation::classify`. While
//! `follow_log` is set the panel stays pinned to the newest line.

use lazarus_core::presentation::{self, Tone};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

pub fn render_log(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let title = if state.view.busy {
        format!("Agent Decision Logs {}", state.spinner())
    } else {
        "Agent Decision Logs".to_owned()
    };
    frame.render_widget(panel_block(title, state.focus == PanelFocus::Log, theme), area);

    let inner = inner_rect(area);
    let lines: Vec<Line> = state.view.logs.iter().map(|l| log_line(l, theme)).collect();
    let scroll = if state.follow_log {
        u16::try_from(lines.len().saturating_sub(usize::from(inner.height))).unwrap_or(u16::MAX)
    } else {
        state.log_scroll
    };
    frame.render_widget(Paragraph::new(Text::from(lines)).scroll((scroll, 0)), inner);
}

/// One styled log line.
pub fn log_line<'a>(text: &'a str, theme: &Theme) -> Line<'a> {
    let style = presentation::classify(text);
    let mut fg = Style::default().fg(theme.tone(style.tone));
    if style.tone == Tone::Success {
        fg = fg.add_modifier(Modifier::BOLD);
    }
    Line::from(vec![
        Span::raw(" ".repeat(style.indent.columns())),
        Span::styled(text.trim_start(), fg),
    ])
}
