//! Top bar: the trigger control and the metrics dashboard.

use lazarus_core::presentation::{self, MetricsPanel};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::app::AppState;
use crate::theme::Theme;

/// Renders the trigger button and, once metrics exist, the metrics cards.
pub fn render_controls(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let trigger = presentation::trigger(&state.view);
    let button_width = u16::try_from(trigger.caption.len() + 8).unwrap_or(u16::MAX);
    let [button, metrics] =
        area.layout(&Layout::horizontal([Constraint::Length(button_width), Constraint::Fill(1)]));

    let (color, label) = if trigger.enabled {
        (theme.trigger_idle, format!("⏎ {}", trigger.caption))
    } else {
        (theme.trigger_busy, format!("{} {}", state.spinner(), trigger.caption))
    };
    let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if !trigger.enabled {
        style = style.add_modifier(Modifier::DIM);
    }
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(label, style)))
            .centered()
            .block(Block::bordered().border_style(Style::default().fg(color))),
        button,
    );

    if let Some(panel) = presentation::metrics_panel(&state.view) {
        frame.render_widget(metrics_line(&panel, theme), metrics);
    }
}

fn metrics_line<'a>(panel: &MetricsPanel, theme: &Theme) -> Paragraph<'a> {
    let label = Style::default().fg(theme.muted);
    let line = Line::from(vec![
        Span::styled("Legacy Complexity ", label),
        Span::styled(
            panel.legacy.clone(),
            Style::default().fg(theme.metric_bad).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ➔  ", label),
        Span::styled("Modern Complexity ", label),
        Span::styled(
            panel.modern.clone(),
            Style::default().fg(theme.metric_good).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!(" {} ", panel.badge),
            Style::default().fg(theme.metric_badge).add_modifier(Modifier::REVERSED | Modifier::BOLD),
        ),
    ]);
    Paragraph::new(line).block(Block::bordered().border_style(Style::default().fg(theme.border_inactive)))
}
